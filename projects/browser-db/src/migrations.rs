use crate::errors::{DatabaseError, Result};
use rusqlite::Connection;

/// Initialize the database schema
pub fn apply_migrations(conn: &Connection) -> Result<()> {
    // Enable WAL mode
    conn.pragma_update(None, "journal_mode", "WAL")?;

    log::info!("Creating database schema...");

    conn.execute_batch(FULL_SCHEMA)
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    log::info!("Database schema created successfully");
    Ok(())
}

// One table per entity kind, keyed by the entity key.
const FULL_SCHEMA: &str = r#"
-- Browser Shell Schema v1

-- Visited addresses, keyed by visit time (epoch milliseconds)
CREATE TABLE IF NOT EXISTS history (
    key          INTEGER PRIMARY KEY,
    value        TEXT NOT NULL       -- address
);

-- Bookmarks, keyed by address
CREATE TABLE IF NOT EXISTS favorites (
    key          TEXT PRIMARY KEY,   -- address
    value        TEXT NOT NULL       -- user alias
);

-- User options
CREATE TABLE IF NOT EXISTS options (
    key          TEXT PRIMARY KEY,   -- option name, e.g. 'homePage'
    value        TEXT NOT NULL
);

-- Install bookkeeping
CREATE TABLE IF NOT EXISTS meta (
    key          TEXT PRIMARY KEY,
    val          TEXT
);
"#;
