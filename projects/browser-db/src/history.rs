use crate::cache::OrderedCache;
use crate::errors::Result;
use crate::store::SqliteStore;
use crate::types::{EntityKind, VisitedAddress};
use crate::Database;
use std::ops::Deref;
use std::sync::Arc;

pub type HistoryCache = OrderedCache<i64, String, SqliteStore<i64, String>>;

/// History manager - visited addresses keyed by visit time
pub struct History {
    cache: HistoryCache,
}

impl History {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            cache: OrderedCache::new(SqliteStore::new(db, EntityKind::History)),
        }
    }

    /// Key for a visit made at `now_ms`. Keys only ever grow, so two visits
    /// inside the same millisecond still get distinct keys.
    pub fn next_visit_key(&self, now_ms: i64) -> i64 {
        match self.cache.newest() {
            Some(newest) if newest.key >= now_ms => newest.key + 1,
            _ => now_ms,
        }
    }

    /// Persist a successful visit to `address`
    pub async fn record_visit(&self, address: &str, now_ms: i64) -> Result<VisitedAddress> {
        let key = self.next_visit_key(now_ms);
        let visit = self.cache.add(VisitedAddress::new(key, address.to_string())).await?;
        log::debug!("Recorded visit {} -> {}", visit.key, visit.value);
        Ok(visit)
    }

    /// Newest first, the order history is shown in
    pub fn recent(&self) -> Vec<VisitedAddress> {
        let mut visits = self.cache.list();
        visits.reverse();
        visits
    }

    /// Delete every visit, one write-through call per entry
    pub async fn clear(&self) -> Result<usize> {
        let visits = self.cache.list();
        for visit in &visits {
            self.cache.delete(&visit.key).await?;
        }
        log::info!("Cleared {} history entries", visits.len());
        Ok(visits.len())
    }
}

impl Deref for History {
    type Target = HistoryCache;

    fn deref(&self) -> &Self::Target {
        &self.cache
    }
}
