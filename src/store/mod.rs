//! Key-value storage backends.
//!
//! Repositories talk to a [`KeyValueStore`] bound to one table whose
//! partition key is the string attribute `id`.

pub mod conversions;
pub mod dynamo;
pub mod memory;
pub mod update;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ServiceError;

pub use dynamo::DynamoStore;
pub use memory::InMemoryStore;
pub use update::{UpdateBuilder, UpdatePlan};

/// A stored record as a JSON object.
pub type Item = Map<String, Value>;

/// Partition key attribute shared by every table.
pub const KEY_ATTRIBUTE: &str = "id";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Name of the table this store is bound to.
    fn table_name(&self) -> &str;

    /// Write `item`, replacing any item with the same id.
    async fn put(&self, item: Item) -> Result<(), ServiceError>;

    async fn get(&self, id: &str) -> Result<Option<Item>, ServiceError>;

    /// Apply `plan` to an existing item and return every attribute after the
    /// update. Returns `Ok(None)` without writing when the item does not exist.
    async fn update(&self, id: &str, plan: &UpdatePlan) -> Result<Option<Item>, ServiceError>;

    /// Delete by id. Deleting a missing id succeeds.
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;

    /// Every item in the table.
    async fn scan_all(&self) -> Result<Vec<Item>, ServiceError>;
}
