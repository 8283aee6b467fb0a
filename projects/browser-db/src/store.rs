use crate::errors::{DatabaseError, Result};
use crate::types::{EntityKind, KeyValueItem};
use crate::Database;
use async_trait::async_trait;
use rusqlite::types::{FromSql, ToSql};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

/// Record collection for one entity kind. Every call either applies fully
/// or not at all.
#[async_trait]
pub trait OrderedStore<K, V>: Send + Sync
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn kind(&self) -> EntityKind;

    /// All records, ascending by key
    async fn list_all(&self) -> Result<Vec<KeyValueItem<K, V>>>;

    async fn insert(&self, item: &KeyValueItem<K, V>) -> Result<()>;

    /// Insert every item or none of them
    async fn insert_batch(&self, items: &[KeyValueItem<K, V>]) -> Result<()>;

    async fn replace(&self, key: &K, value: &V) -> Result<()>;

    async fn remove_by_key(&self, key: &K) -> Result<()>;
}

/// SQLite table backing one entity kind
pub struct SqliteStore<K, V> {
    db: Arc<Database>,
    kind: EntityKind,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> SqliteStore<K, V> {
    pub fn new(db: Arc<Database>, kind: EntityKind) -> Self {
        Self {
            db,
            kind,
            _marker: PhantomData,
        }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}

impl<K, V> Clone for SqliteStore<K, V> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone(), self.kind)
    }
}

#[async_trait]
impl<K, V> OrderedStore<K, V> for SqliteStore<K, V>
where
    K: ToSql + FromSql + Display + Send + Sync + 'static,
    V: ToSql + FromSql + Send + Sync + 'static,
{
    fn kind(&self) -> EntityKind {
        self.kind
    }

    async fn list_all(&self) -> Result<Vec<KeyValueItem<K, V>>> {
        let sql = format!("SELECT key, value FROM {} ORDER BY key ASC", self.kind.table());

        self.db
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let items = stmt
                    .query_map([], |row| Ok(KeyValueItem::new(row.get(0)?, row.get(1)?)))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(items)
            })
            .await
    }

    async fn insert(&self, item: &KeyValueItem<K, V>) -> Result<()> {
        let sql = format!("INSERT INTO {} (key, value) VALUES (?1, ?2)", self.kind.table());

        self.db
            .transaction(move |tx| {
                tx.execute(&sql, rusqlite::params![item.key, item.value])?;
                Ok(())
            })
            .await?;

        log::debug!("Inserted {} record {}", self.kind, item.key);
        Ok(())
    }

    async fn insert_batch(&self, items: &[KeyValueItem<K, V>]) -> Result<()> {
        let sql = format!("INSERT INTO {} (key, value) VALUES (?1, ?2)", self.kind.table());

        self.db
            .transaction(move |tx| {
                let mut stmt = tx.prepare(&sql)?;
                for item in items {
                    stmt.execute(rusqlite::params![item.key, item.value])?;
                }
                Ok(())
            })
            .await?;

        log::debug!("Inserted {} {} records", items.len(), self.kind);
        Ok(())
    }

    async fn replace(&self, key: &K, value: &V) -> Result<()> {
        let sql = format!("UPDATE {} SET value = ?1 WHERE key = ?2", self.kind.table());
        let kind = self.kind;

        self.db
            .transaction(move |tx| {
                let updated = tx.execute(&sql, rusqlite::params![value, key])?;
                if updated == 0 {
                    return Err(DatabaseError::Persistence(format!(
                        "no {} record with key {}",
                        kind, key
                    )));
                }
                Ok(())
            })
            .await
    }

    async fn remove_by_key(&self, key: &K) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE key = ?1", self.kind.table());
        let kind = self.kind;

        self.db
            .transaction(move |tx| {
                let removed = tx.execute(&sql, [key])?;
                if removed == 0 {
                    return Err(DatabaseError::Persistence(format!(
                        "no {} record with key {}",
                        kind, key
                    )));
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn favorites_store() -> SqliteStore<String, String> {
        let db = Arc::new(Database::new_in_memory().await.unwrap());
        SqliteStore::new(db, EntityKind::Favorites)
    }

    fn bookmark(address: &str, alias: &str) -> KeyValueItem<String, String> {
        KeyValueItem::new(address.to_string(), alias.to_string())
    }

    #[tokio::test]
    async fn test_list_all_is_ordered_by_key() {
        let store = favorites_store().await;
        store.insert(&bookmark("https://c.test", "c")).await.unwrap();
        store.insert(&bookmark("https://a.test", "a")).await.unwrap();
        store.insert(&bookmark("https://b.test", "b")).await.unwrap();

        let keys: Vec<String> = store.list_all().await.unwrap().into_iter().map(|i| i.key).collect();
        assert_eq!(keys, vec!["https://a.test", "https://b.test", "https://c.test"]);
    }

    #[tokio::test]
    async fn test_history_keys_sort_numerically() {
        let db = Arc::new(Database::new_in_memory().await.unwrap());
        let store: SqliteStore<i64, String> = SqliteStore::new(db, EntityKind::History);
        store.insert(&KeyValueItem::new(100, "https://late.test".into())).await.unwrap();
        store.insert(&KeyValueItem::new(9, "https://early.test".into())).await.unwrap();

        let keys: Vec<i64> = store.list_all().await.unwrap().into_iter().map(|i| i.key).collect();
        assert_eq!(keys, vec![9, 100]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let store = favorites_store().await;
        store.insert(&bookmark("https://a.test", "a")).await.unwrap();

        let err = store.insert(&bookmark("https://a.test", "again")).await.unwrap_err();
        assert!(err.is_persistence());
    }

    #[tokio::test]
    async fn test_batch_insert_is_atomic() {
        let store = favorites_store().await;
        store.insert(&bookmark("https://b.test", "b")).await.unwrap();

        let batch = vec![
            bookmark("https://a.test", "a"),
            bookmark("https://b.test", "duplicate"),
            bookmark("https://c.test", "c"),
        ];
        assert!(store.insert_batch(&batch).await.is_err());

        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![bookmark("https://b.test", "b")]);
    }

    #[tokio::test]
    async fn test_replace_and_remove_missing_key() {
        let store = favorites_store().await;
        store.insert(&bookmark("https://a.test", "a")).await.unwrap();

        store.replace(&"https://a.test".to_string(), &"renamed".to_string()).await.unwrap();
        assert_eq!(store.list_all().await.unwrap()[0].value, "renamed");

        let err = store.replace(&"https://zz.test".to_string(), &"x".to_string()).await.unwrap_err();
        assert!(err.is_persistence());

        store.remove_by_key(&"https://a.test".to_string()).await.unwrap();
        let err = store.remove_by_key(&"https://a.test".to_string()).await.unwrap_err();
        assert!(err.is_persistence());
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
