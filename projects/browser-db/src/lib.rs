pub mod cache;
pub mod database;
pub mod errors;
pub mod favorites;
pub mod history;
pub mod migrations;
pub mod options;
pub mod store;
pub mod types;

// Re-export main types and the database
pub use cache::OrderedCache;
pub use database::Database;
pub use errors::DatabaseError;
pub use favorites::Favorites;
pub use history::History;
pub use options::Options;
pub use store::{OrderedStore, SqliteStore};
pub use types::*;

use std::path::PathBuf;

/// Get the default database path
pub fn get_database_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".browser-shell")
        .join("browser.db")
}
