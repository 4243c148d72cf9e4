use axum::routing::post;
use axum::Router;

use crate::handlers::keys;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/keys/verify", post(keys::verify_key))
}
