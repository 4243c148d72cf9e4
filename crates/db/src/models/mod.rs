pub mod chat;
pub mod offline_response;
pub mod user;
