//! Validation and CRUD mapping for each record type.

pub mod app_info;
pub mod feedback;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ServiceError;
use crate::store::Item;

pub use app_info::AppInfoRepository;
pub use feedback::FeedbackRepository;

/// Attribute stamped on every update.
pub const UPDATED_AT: &str = "updatedAt";

/// Accept either a JSON-encoded string or an already-decoded object.
pub(crate) fn decode_payload(input: &Value) -> Result<Item, ServiceError> {
    let decoded;
    let value = match input {
        Value::String(raw) => {
            decoded = serde_json::from_str::<Value>(raw)?;
            &decoded
        }
        other => other,
    };

    match value {
        Value::Object(map) => Ok(map.clone()),
        Value::Null => Ok(Item::new()),
        _ => Err(ServiceError::ValidationError(
            "Request body must be a JSON object.".to_string(),
        )),
    }
}

pub(crate) fn encode_record<T: Serialize>(record: &T) -> Result<Item, ServiceError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ServiceError::StoreError(
            "Record did not serialize to an object".to_string(),
        )),
        Err(e) => Err(ServiceError::StoreError(format!("Record serialize: {e}"))),
    }
}

/// Decode a stored item. A malformed item is a store problem, not a client one.
pub(crate) fn decode_record<T: DeserializeOwned>(item: Item) -> Result<T, ServiceError> {
    serde_json::from_value(Value::Object(item))
        .map_err(|e| ServiceError::StoreError(format!("Stored record is malformed: {e}")))
}
