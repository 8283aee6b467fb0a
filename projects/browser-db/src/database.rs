use crate::errors::{DatabaseError, Result};
use crate::migrations::apply_migrations;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Transaction};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

const FIRST_INSTALL_KEY: &str = "first_install_timestamp";

/// Main database manager
pub struct Database {
    connection: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Create a database instance at a specific path
    pub async fn open_at_path(path: PathBuf) -> Result<Self> {
        // Ensure the directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        log::info!("Opening database at: {:?}", path);

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| DatabaseError::Connection(format!("{}: {}", path.display(), e)))?;

        if let Err(e) = apply_migrations(&conn) {
            log::error!("Failed to apply migrations: {}", e);
            return Err(e);
        }

        log::info!("Database initialized successfully");
        Ok(Database {
            connection: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Create an in-memory database instance for testing
    pub async fn new_in_memory() -> Result<Self> {
        log::info!("Creating in-memory database");

        let conn = Connection::open_in_memory()?;

        if let Err(e) = apply_migrations(&conn) {
            log::error!("Failed to apply migrations to in-memory database: {}", e);
            return Err(e);
        }

        Ok(Database {
            connection: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        })
    }

    /// Get the database path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Health check - ensure database is accessible
    pub async fn health_check(&self) -> Result<()> {
        let conn = self.connection.lock().await;
        match conn.query_row("SELECT 1", [], |_| Ok(())) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("Health check failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Execute a closure with database connection
    pub async fn with_connection<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R> + Send,
        R: Send,
    {
        let conn = self.connection.lock().await;
        f(&conn)
    }

    /// Execute a closure inside a transaction. The transaction commits only
    /// when the closure succeeds; on any error it is dropped, which rolls it
    /// back.
    pub async fn transaction<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction<'_>) -> Result<R> + Send,
        R: Send,
    {
        let mut conn = self.connection.lock().await;
        let tx = conn.transaction()?;

        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Current UNIX time in milliseconds
    pub fn current_timestamp_millis() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    // ========== Install Bookkeeping ==========

    /// Check if this is a first-time install (no install marker recorded yet)
    pub async fn is_first_time_install(&self) -> Result<bool> {
        self.with_connection(|conn| {
            let result: Option<String> = conn
                .query_row(
                    "SELECT val FROM meta WHERE key = ?1",
                    [FIRST_INSTALL_KEY],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(result.is_none())
        })
        .await
    }

    /// Record the install marker so later starts reload instead of seeding
    pub async fn mark_installed(&self) -> Result<()> {
        let timestamp = Self::current_timestamp_millis();

        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO meta (key, val) VALUES (?1, ?2)",
                rusqlite::params![FIRST_INSTALL_KEY, timestamp.to_string()],
            )?;
            log::info!("Install marker recorded");
            Ok(())
        })
        .await
    }
}
