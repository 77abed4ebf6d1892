//! In-memory store for tests and local runs.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Item, KEY_ATTRIBUTE, KeyValueStore, UpdatePlan};
use crate::errors::ServiceError;

/// `HashMap` behind an `Arc<RwLock<_>>`; clones share the same data.
///
/// Counts successful writes (`put`, `update`, `delete`) so callers can check
/// that a rejected request touched nothing.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    table_name: String,
    items: Arc<RwLock<HashMap<String, Item>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            items: Arc::new(RwLock::new(HashMap::new())),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of writes applied so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put(&self, item: Item) -> Result<(), ServiceError> {
        let Some(id) = item.get(KEY_ATTRIBUTE).and_then(Value::as_str) else {
            return Err(ServiceError::StoreError(format!(
                "Item is missing string key attribute '{KEY_ATTRIBUTE}'"
            )));
        };
        let id = id.to_string();

        self.items.write().await.insert(id, item);
        self.record_write();
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, ServiceError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn update(&self, id: &str, plan: &UpdatePlan) -> Result<Option<Item>, ServiceError> {
        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(id) else {
            return Ok(None);
        };

        for (field, value) in plan.assignments() {
            item.insert(field.to_string(), value.clone());
        }
        let updated = item.clone();
        drop(items);

        self.record_write();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.items.write().await.remove(id);
        self.record_write();
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.items.read().await.values().cloned().collect())
    }
}
