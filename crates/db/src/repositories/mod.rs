mod chat_repo;
mod offline_response_repo;
mod user_repo;

pub use chat_repo::ChatRepo;
pub use offline_response_repo::OfflineResponseRepo;
pub use user_repo::UserRepo;
