mod connection;
mod sqlite_repository;

pub use connection::{Database, DbPool};
pub use sqlite_repository::SqliteRepository;
