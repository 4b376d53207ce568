//! Relational (SQLite) storage

pub mod manager;
pub mod profile_store;

pub use manager::{DbManager, SqliteConnection};
pub use profile_store::SqliteProfileStore;
