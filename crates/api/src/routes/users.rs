use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route(
            "/users/me",
            get(users::get_profile)
                .put(users::update_profile)
                .delete(users::delete_account),
        )
        .route("/users/me/api-key", put(users::update_api_key))
        .route("/users/me/offline-mode", put(users::set_offline_mode))
}
