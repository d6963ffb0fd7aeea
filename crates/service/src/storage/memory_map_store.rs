use std::{hash::Hash, sync::Arc};
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// Generic in-memory key-value map store shared across request handlers.
///
/// Values keep insertion order: overwriting a key keeps its position, and a
/// removed key that is inserted again goes to the end. Every helper takes the
/// lock once, so each call is a single atomic step.
#[derive(Clone)]
pub struct MemoryMapStore<K, V> {
    inner: Arc<RwLock<IndexMap<K, V>>>,
}

impl<K, V> Default for MemoryMapStore<K, V> {
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(IndexMap::new())) }
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// List all values in insertion order.
    pub async fn list(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Remove a key, keeping the order of the rest; returns whether it existed.
    pub async fn remove(&self, key: &K) -> bool {
        let mut map = self.inner.write().await;
        map.shift_remove(key).is_some()
    }

    /// Apply a mutation to the underlying map under a single write lock.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut IndexMap<K, V>) -> Result<R, ServiceError>,
    {
        let mut map = self.inner.write().await;
        f(&mut map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_map_store_crud() -> Result<(), anyhow::Error> {
        let store = MemoryMapStore::<String, String>::default();

        // initially empty
        assert!(store.list().await.is_empty());

        store
            .update_map(|m| {
                m.insert("a".into(), "1".into());
                m.insert("b".into(), "2".into());
                Ok(())
            })
            .await?;
        assert_eq!(store.get(&"b".into()).await.as_deref(), Some("2"));

        // a failing mutation still returns its error
        let res: Result<(), _> = store
            .update_map(|_| Err(ServiceError::not_found("z")))
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));

        assert!(store.remove(&"b".into()).await);
        assert!(!store.remove(&"b".into()).await);
        assert_eq!(store.list().await, vec!["1".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn order_survives_overwrite_and_reinsert() -> Result<(), anyhow::Error> {
        let store = MemoryMapStore::<&str, i32>::default();
        store
            .update_map(|m| {
                m.insert("a", 1);
                m.insert("b", 2);
                m.insert("c", 3);
                m.insert("a", 10);
                Ok(())
            })
            .await?;
        assert_eq!(store.list().await, vec![10, 2, 3]);

        store.remove(&"a").await;
        assert_eq!(store.list().await, vec![2, 3]);

        store.update_map(|m| { m.insert("a", 11); Ok(()) }).await?;
        assert_eq!(store.list().await, vec![2, 3, 11]);
        Ok(())
    }
}
