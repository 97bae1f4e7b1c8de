use crate::{
    models::{SearchEvent, UserHistory},
    services::history_store::{HistoryStore, StoreError},
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::RwLock};
use tracing::debug;

/// Process-local history store.
///
/// The whole read-modify-write of an append runs under one write guard.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: RwLock<HashMap<String, UserHistory>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, user_id: &str, event: SearchEvent) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;

        match records.get_mut(user_id) {
            Some(history) => history.push(event),
            None => {
                debug!("Creating history record for user {}", user_id);
                records.insert(user_id.to_string(), UserHistory::new(user_id, event));
            }
        }

        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<UserHistory>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(user_id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.records
            .read()
            .map(|_| ())
            .map_err(|_| StoreError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn event(city: &str, temperature: f64) -> SearchEvent {
        SearchEvent {
            city: city.to_string(),
            temperature,
            timestamp: Utc::now(),
            unit: None,
        }
    }

    #[tokio::test]
    async fn test_first_append_creates_record() {
        let store = MemoryHistoryStore::new();
        assert!(store.find("u1").await.unwrap().is_none());

        store.append("u1", event("Paris", 18.0)).await.unwrap();

        let history = store.find("u1").await.unwrap().unwrap();
        assert_eq!(history.user_id, "u1");
        assert_eq!(history.search_history.len(), 1);
        assert_eq!(history.search_history[0].city, "Paris");
    }

    #[tokio::test]
    async fn test_appends_keep_insertion_order() {
        let store = MemoryHistoryStore::new();
        for (i, city) in ["Paris", "Oslo", "Lima"].iter().enumerate() {
            store.append("u1", event(city, i as f64)).await.unwrap();
        }

        let cities: Vec<String> = store
            .find("u1")
            .await
            .unwrap()
            .unwrap()
            .search_history
            .into_iter()
            .map(|e| e.city)
            .collect();
        assert_eq!(cities, vec!["Paris", "Oslo", "Lima"]);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = MemoryHistoryStore::new();
        store.append("u1", event("Paris", 18.0)).await.unwrap();
        store.append("u2", event("Oslo", 3.0)).await.unwrap();

        assert_eq!(store.find("u1").await.unwrap().unwrap().search_history.len(), 1);
        assert_eq!(store.find("u2").await.unwrap().unwrap().search_history[0].city, "Oslo");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(MemoryHistoryStore::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store.append("u1", event("Paris", i as f64)).await.unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let history = store.find("u1").await.unwrap().unwrap();
        assert_eq!(history.search_history.len(), 64);
    }
}
