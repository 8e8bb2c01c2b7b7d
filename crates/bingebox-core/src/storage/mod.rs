mod database;
mod kv_repo;

pub use database::Database;
pub use kv_repo::{open_favorites, KvRepository};
