pub mod chat;
pub mod chats;
pub mod health;
pub mod keys;
pub mod models;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register              register (public)
/// /users/login                 login (public)
/// /users/me                    get, update, delete profile (requires auth)
/// /users/me/api-key            replace stored GLHF key (requires auth)
/// /users/me/offline-mode       toggle offline mode (requires auth)
///
/// /chats                       list, create (requires auth)
/// /chats/{id}                  get with messages, delete (requires auth)
/// /chats/{id}/messages         append message (requires auth)
///
/// /chat                        relay one exchange (auth optional)
/// /keys/verify                 verify a GLHF key (public)
/// /models                      static model catalog (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(chats::router())
        .merge(chat::router())
        .merge(keys::router())
        .merge(models::router())
}
