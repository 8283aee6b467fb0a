use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Index {index} out of range for {len} cached entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl DatabaseError {
    /// True for every failure that originated in the backing store rather
    /// than in a cache lookup.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            DatabaseError::Sqlite(_)
                | DatabaseError::Io(_)
                | DatabaseError::Migration(_)
                | DatabaseError::Persistence(_)
                | DatabaseError::Connection(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
