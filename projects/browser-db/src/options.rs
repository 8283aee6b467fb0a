use crate::cache::OrderedCache;
use crate::errors::Result;
use crate::store::SqliteStore;
use crate::types::{EntityKind, Setting};
use crate::Database;
use std::ops::Deref;
use std::sync::Arc;

pub const HOME_PAGE: &str = "homePage";
pub const DEFAULT_HOME_PAGE: &str = "https://www.hw.ac.uk";

pub type OptionsCache = OrderedCache<String, String, SqliteStore<String, String>>;

/// Options manager - user settings keyed by option name
pub struct Options {
    cache: OptionsCache,
}

impl Options {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            cache: OrderedCache::new(SqliteStore::new(db, EntityKind::Options)),
        }
    }

    pub fn defaults() -> Vec<Setting> {
        vec![Setting::new(HOME_PAGE.to_string(), DEFAULT_HOME_PAGE.to_string())]
    }

    /// Seed the default options on first run
    pub async fn load_defaults(&self) -> Result<Vec<Setting>> {
        log::info!("Seeding default options");
        self.cache.add_batch(Self::defaults()).await
    }

    /// Add any default option missing from the cache. Returns what was added.
    pub async fn ensure_defaults(&self) -> Result<Vec<Setting>> {
        let missing: Vec<Setting> = Self::defaults()
            .into_iter()
            .filter(|setting| !self.cache.contains(&setting.key))
            .collect();

        if missing.is_empty() {
            return Ok(missing);
        }

        log::warn!("Restoring {} missing default option(s)", missing.len());
        self.cache.add_batch(missing).await
    }

    pub fn home_page(&self) -> Result<String> {
        self.cache.get(&HOME_PAGE.to_string())
    }

    pub async fn set_home_page(&self, address: &str) -> Result<Setting> {
        self.cache.update(&HOME_PAGE.to_string(), address.to_string()).await
    }
}

impl Deref for Options {
    type Target = OptionsCache;

    fn deref(&self) -> &Self::Target {
        &self.cache
    }
}
