use axum::routing::post;
use axum::Router;

use crate::handlers::relay;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(relay::chat))
}
