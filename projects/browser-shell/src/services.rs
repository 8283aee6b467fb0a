// services.rs - Process-wide caches, constructed once and shared by reference

use crate::errors::Result;
use browser_db::{Database, Favorites, History, Options};
use std::sync::Arc;

/// The three caches every window works against
pub struct BrowserServices {
    pub database: Arc<Database>,
    pub options: Options,
    pub history: History,
    pub favorites: Favorites,
}

impl BrowserServices {
    /// Empty caches over `database`; nothing is loaded yet
    pub fn new(database: Arc<Database>) -> Self {
        Self {
            options: Options::new(database.clone()),
            history: History::new(database.clone()),
            favorites: Favorites::new(database.clone()),
            database,
        }
    }

    /// Startup: reload every cache, seed defaults on a fresh store, then
    /// record the install marker. A run that stopped before the marker was
    /// written finds its seeded rows already in place and only adds what is
    /// missing.
    pub async fn bootstrap(database: Arc<Database>) -> Result<Self> {
        let services = Self::new(database);

        let first_run = services.database.is_first_time_install().await?;
        services.options.reload().await?;
        services.history.reload().await?;
        services.favorites.reload().await?;

        if first_run && services.options.is_empty() {
            log::info!("🆕 First run detected, seeding defaults");
            services.options.load_defaults().await?;
        } else {
            services.options.ensure_defaults().await?;
        }

        if first_run {
            services.database.mark_installed().await?;
        }

        log::info!(
            "✅ Loaded {} options, {} history entries, {} bookmarks",
            services.options.count(),
            services.history.count(),
            services.favorites.count()
        );
        Ok(services)
    }
}
