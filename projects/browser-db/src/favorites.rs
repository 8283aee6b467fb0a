use crate::cache::OrderedCache;
use crate::errors::Result;
use crate::store::SqliteStore;
use crate::types::{Bookmark, EntityKind};
use crate::Database;
use std::ops::Deref;
use std::sync::Arc;

pub type FavoritesCache = OrderedCache<String, String, SqliteStore<String, String>>;

/// Favorites manager - bookmarks keyed by address
pub struct Favorites {
    cache: FavoritesCache,
}

impl Favorites {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            cache: OrderedCache::new(SqliteStore::new(db, EntityKind::Favorites)),
        }
    }

    /// Bookmark `address` under `alias`. Bookmarking the same address twice
    /// is a persistence error.
    pub async fn bookmark(&self, address: &str, alias: &str) -> Result<Bookmark> {
        self.cache
            .add(Bookmark::new(address.to_string(), alias.to_string()))
            .await
    }

    pub async fn rename(&self, address: &str, alias: &str) -> Result<Bookmark> {
        self.cache.update(&address.to_string(), alias.to_string()).await
    }

    pub fn is_bookmarked(&self, address: &str) -> bool {
        self.cache.contains(&address.to_string())
    }
}

impl Deref for Favorites {
    type Target = FavoritesCache;

    fn deref(&self) -> &Self::Target {
        &self.cache
    }
}
