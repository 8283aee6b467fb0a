use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ========== Entity Types ==========

/// A uniquely keyed record. The key is the primary identity and never
/// changes once the record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueItem<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValueItem<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<(K, V)> for KeyValueItem<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Visit time in epoch milliseconds -> address
pub type VisitedAddress = KeyValueItem<i64, String>;

/// Address -> user chosen alias
pub type Bookmark = KeyValueItem<String, String>;

/// Option name -> option value
pub type Setting = KeyValueItem<String, String>;

impl VisitedAddress {
    pub fn address(&self) -> &str {
        &self.value
    }

    /// Visit time decoded from the key
    pub fn visited_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.key).single()
    }
}

// ========== Entity Kinds ==========

/// The record collections kept by the backing store. Each kind owns exactly
/// one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    History,
    Favorites,
    Options,
}

impl EntityKind {
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::History => "history",
            EntityKind::Favorites => "favorites",
            EntityKind::Options => "options",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
