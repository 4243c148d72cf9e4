use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chats;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chats", get(chats::list_chats).post(chats::create_chat))
        .route(
            "/chats/{id}",
            get(chats::get_chat).delete(chats::delete_chat),
        )
        .route("/chats/{id}/messages", post(chats::append_message))
}
