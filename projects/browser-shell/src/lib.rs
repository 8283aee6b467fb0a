pub mod browse;
pub mod commands;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod navigation;
pub mod render;
pub mod services;
pub mod window;

pub use config::ShellConfig;
pub use errors::{FetchError, ShellError};
pub use fetch::{Fetcher, HttpFetcher, Page};
pub use navigation::{NavButtons, NavigationStack};
pub use render::{extract_title, Render, TerminalRenderer};
pub use services::BrowserServices;
pub use window::{TabWindow, VisitedEntry, WindowHandle};

use browser_db::Database;
use std::sync::Arc;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        log::debug!("Logging already initialized");
    }
}

/// Open the database named by `config` and bring every cache up to date
pub async fn start(config: &ShellConfig) -> errors::Result<Arc<BrowserServices>> {
    log::info!("🚀 Browser shell starting up...");

    log::info!("🗄️ Initializing database...");
    let database = Database::open_at_path(config.database_path()).await.map_err(|e| {
        log::error!("Failed to initialize database: {}", e);
        e
    })?;

    let services = BrowserServices::bootstrap(Arc::new(database)).await?;
    log::info!("✅ Browser shell setup completed");
    Ok(Arc::new(services))
}
