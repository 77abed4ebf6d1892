//! Feedback records: a 1-5 rating plus optional picked options and free-text
//! messages keyed by locale.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::{UPDATED_AT, decode_payload, decode_record, encode_record};
use crate::core::clock::now_timestamp;
use crate::core::models::{ApiRequest, FeedbackRecord};
use crate::errors::ServiceError;
use crate::store::{Item, KeyValueStore, UpdateBuilder};

/// Updatable feedback attributes, in the order updates apply them.
pub const FEEDBACK_FIELDS: &[&str] = &["rating", "selectedOptions", "customMessages"];

pub const RATING_ERROR: &str = "Rating must be a number between 1 and 5.";
pub const SELECTED_OPTIONS_ERROR: &str = "selectedOptions must be an array.";
pub const CUSTOM_MESSAGES_ERROR: &str = "customMessages must be an object.";
pub const MISSING_ID_ERROR: &str = "Post ID is required.";
pub const NOT_FOUND_ERROR: &str = "Post not found.";
pub const NO_FIELDS_ERROR: &str = "No valid fields to update.";

const UPDATES: UpdateBuilder = UpdateBuilder::new(FEEDBACK_FIELDS);

pub struct FeedbackRepository<S> {
    store: S,
}

impl<S: KeyValueStore> FeedbackRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new feedback record, returning the copy read
    /// back from the store.
    pub async fn create(&self, input: &Value) -> Result<FeedbackRecord, ServiceError> {
        let body = decode_payload(input)?;

        let rating = validate_rating(body.get("rating").unwrap_or(&Value::Null))?;
        let selected_options = match body.get("selectedOptions") {
            None | Some(Value::Null) => Vec::new(),
            Some(v) => validate_selected_options(v)?,
        };
        let custom_messages = match body.get("customMessages") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(v) => validate_custom_messages(v)?,
        };

        let record = FeedbackRecord {
            id: Uuid::new_v4().to_string(),
            rating,
            selected_options,
            custom_messages,
            created_at: now_timestamp(),
            updated_at: None,
        };

        self.store.put(encode_record(&record)?).await?;

        let stored = self.store.get(&record.id).await?.ok_or_else(|| {
            ServiceError::StoreError(format!("Feedback {} missing after write", record.id))
        })?;

        info!(id = %record.id, table = %self.store.table_name(), "Created feedback");
        decode_record(stored)
    }

    /// Every stored feedback item, as persisted.
    pub async fn list(&self) -> Result<Vec<Item>, ServiceError> {
        self.store.scan_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<FeedbackRecord>, ServiceError> {
        self.store.get(id).await?.map(decode_record).transpose()
    }

    /// Apply the supplied fields of `request.body` to the record named by
    /// `request.id`, stamping `updatedAt`.
    pub async fn update_by_id(&self, request: &ApiRequest) -> Result<FeedbackRecord, ServiceError> {
        let Some(id) = request.id.as_deref().filter(|id| !id.is_empty()) else {
            return Err(ServiceError::ValidationError(MISSING_ID_ERROR.to_string()));
        };

        let body = match &request.body {
            Some(raw) => decode_payload(&Value::String(raw.clone()))?,
            None => Item::new(),
        };

        if self.store.get(id).await?.is_none() {
            warn!(id = %id, "Update requested for unknown feedback");
            return Err(ServiceError::NotFoundError(NOT_FOUND_ERROR.to_string()));
        }

        let patch = validate_patch(&body)?;

        let plan = UPDATES.build(
            &patch,
            Some((UPDATED_AT, Value::String(now_timestamp()))),
            NO_FIELDS_ERROR,
        )?;

        // The record can vanish between the read above and this write.
        let updated = self
            .store
            .update(id, &plan)
            .await?
            .ok_or_else(|| ServiceError::NotFoundError(NOT_FOUND_ERROR.to_string()))?;

        info!(id = %id, "Updated feedback");
        decode_record(updated)
    }

    /// Delete by id and echo the id back. Missing ids are not an error.
    pub async fn delete_by_id(&self, id: &str) -> Result<String, ServiceError> {
        self.store.delete(id).await?;
        info!(id = %id, "Deleted feedback");
        Ok(id.to_string())
    }
}

/// Check every supplied field of a partial update with the creation rules
/// and return them normalized (`4.0` becomes `4`). Unknown keys are dropped.
/// `null` counts as supplied, and is never a valid value.
fn validate_patch(body: &Item) -> Result<Item, ServiceError> {
    let mut patch = Item::new();
    if let Some(rating) = body.get("rating") {
        patch.insert("rating".to_string(), Value::from(validate_rating(rating)?));
    }
    if let Some(options) = body.get("selectedOptions") {
        patch.insert(
            "selectedOptions".to_string(),
            Value::from(validate_selected_options(options)?),
        );
    }
    if let Some(messages) = body.get("customMessages") {
        let messages = validate_custom_messages(messages)?
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        patch.insert("customMessages".to_string(), Value::Object(messages));
    }
    Ok(patch)
}

fn validate_rating(value: &Value) -> Result<u8, ServiceError> {
    value
        .as_f64()
        .filter(|r| r.fract() == 0.0 && (1.0..=5.0).contains(r))
        // Range checked above.
        .map(|r| r as u8)
        .ok_or_else(|| {
            warn!(rating = %value, "Rejected feedback rating");
            ServiceError::ValidationError(RATING_ERROR.to_string())
        })
}

fn validate_selected_options(value: &Value) -> Result<Vec<String>, ServiceError> {
    let Some(options) = value.as_array() else {
        return Err(ServiceError::ValidationError(SELECTED_OPTIONS_ERROR.to_string()));
    };
    options
        .iter()
        .map(|o| {
            o.as_str().map(str::to_string).ok_or_else(|| {
                ServiceError::ValidationError("selectedOptions must contain only strings.".to_string())
            })
        })
        .collect()
}

fn validate_custom_messages(value: &Value) -> Result<BTreeMap<String, String>, ServiceError> {
    let Some(messages) = value.as_object() else {
        return Err(ServiceError::ValidationError(CUSTOM_MESSAGES_ERROR.to_string()));
    };
    messages
        .iter()
        .map(|(k, v)| {
            v.as_str().map(|s| (k.clone(), s.to_string())).ok_or_else(|| {
                ServiceError::ValidationError("customMessages values must be strings.".to_string())
            })
        })
        .collect()
}
