use crate::errors::{DatabaseError, Result};
use crate::store::OrderedStore;
use crate::types::{EntityKind, KeyValueItem};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;

/// In-memory map of one entity kind, mirrored write-through against its
/// backing store.
///
/// Reads are served from memory and never touch the store. Mutations persist
/// first and only then change the map, so after every successful call the
/// map and the store hold the same `(key, value)` pairs. Mutations are
/// serialised through `write_lock`, which lets several windows share one
/// cache.
pub struct OrderedCache<K, V, S> {
    store: S,
    entries: RwLock<BTreeMap<K, V>>,
    write_lock: Mutex<()>,
}

impl<K, V, S> OrderedCache<K, V, S>
where
    K: Ord + Clone + Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: OrderedStore<K, V>,
{
    /// Create an empty cache. Call [`reload`](Self::reload) to populate it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: RwLock::new(BTreeMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.store.kind()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<K, V>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<K, V>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Reads ==========

    pub fn contains(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    pub fn get(&self, key: &K) -> Result<V> {
        self.read()
            .get(key)
            .cloned()
            .ok_or_else(|| DatabaseError::KeyNotFound(key.to_string()))
    }

    /// Entity at position `index` in ascending key order. Index 0 is the
    /// smallest key; the newest history entry sits at `count() - 1`.
    pub fn get_by_index(&self, index: usize) -> Result<KeyValueItem<K, V>> {
        let entries = self.read();
        let len = entries.len();
        entries
            .iter()
            .nth(index)
            .map(|(k, v)| KeyValueItem::new(k.clone(), v.clone()))
            .ok_or(DatabaseError::IndexOutOfRange { index, len })
    }

    /// Entity with the largest key
    pub fn newest(&self) -> Option<KeyValueItem<K, V>> {
        self.read()
            .iter()
            .next_back()
            .map(|(k, v)| KeyValueItem::new(k.clone(), v.clone()))
    }

    /// Ascending snapshot of every cached entity
    pub fn list(&self) -> Vec<KeyValueItem<K, V>> {
        self.read()
            .iter()
            .map(|(k, v)| KeyValueItem::new(k.clone(), v.clone()))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // ========== Write-through mutations ==========

    /// Persist one entity, then cache it. A store failure (including a
    /// duplicate key) leaves the cache untouched.
    pub async fn add(&self, item: KeyValueItem<K, V>) -> Result<KeyValueItem<K, V>> {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = self.store.insert(&item).await {
            log::error!("Failed to add {} entry {}: {}", self.kind(), item.key, e);
            return Err(e);
        }

        self.write().insert(item.key.clone(), item.value.clone());
        Ok(item)
    }

    /// Persist a batch atomically, then cache it. On failure the cache is
    /// rebuilt from the store before the error is returned.
    pub async fn add_batch(&self, items: Vec<KeyValueItem<K, V>>) -> Result<Vec<KeyValueItem<K, V>>> {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = self.store.insert_batch(&items).await {
            log::error!(
                "Failed to add batch of {} {} entries, reloading: {}",
                items.len(),
                self.kind(),
                e
            );
            if let Err(reload_err) = self.reload_locked().await {
                log::error!("Reload after failed batch add also failed: {}", reload_err);
                return Err(reload_err);
            }
            return Err(e);
        }

        let mut entries = self.write();
        for item in &items {
            entries.insert(item.key.clone(), item.value.clone());
        }
        Ok(items)
    }

    /// Persist a new value for an existing key, then cache it.
    pub async fn update(&self, key: &K, value: V) -> Result<KeyValueItem<K, V>> {
        let _guard = self.write_lock.lock().await;

        if !self.contains(key) {
            return Err(DatabaseError::KeyNotFound(key.to_string()));
        }

        if let Err(e) = self.store.replace(key, &value).await {
            log::error!("Failed to update {} entry {}: {}", self.kind(), key, e);
            return Err(e);
        }

        self.write().insert(key.clone(), value.clone());
        Ok(KeyValueItem::new(key.clone(), value))
    }

    /// Replace the value of the entity at `index` (ascending key order)
    pub async fn update_by_index(&self, index: usize, value: V) -> Result<KeyValueItem<K, V>> {
        let item = self.get_by_index(index)?;
        self.update(&item.key, value).await
    }

    /// Remove an entity from the store, then from the cache.
    pub async fn delete(&self, key: &K) -> Result<KeyValueItem<K, V>> {
        let _guard = self.write_lock.lock().await;

        let value = self.get(key)?;

        if let Err(e) = self.store.remove_by_key(key).await {
            log::error!("Failed to delete {} entry {}: {}", self.kind(), key, e);
            return Err(e);
        }

        self.write().remove(key);
        Ok(KeyValueItem::new(key.clone(), value))
    }

    /// Drop the cached entities and read every record back from the store.
    pub async fn reload(&self) -> Result<Vec<KeyValueItem<K, V>>> {
        let _guard = self.write_lock.lock().await;
        self.reload_locked().await
    }

    async fn reload_locked(&self) -> Result<Vec<KeyValueItem<K, V>>> {
        let records = self.store.list_all().await?;

        let mut entries = self.write();
        entries.clear();
        for record in &records {
            entries.insert(record.key.clone(), record.value.clone());
        }
        drop(entries);

        log::info!("Loaded {} {} entries", records.len(), self.kind());
        Ok(self.list())
    }
}
