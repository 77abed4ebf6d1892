//! App-info records: the six strings an extension shows before it acts.

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::{UPDATED_AT, decode_payload, decode_record, encode_record};
use crate::core::clock::now_timestamp;
use crate::core::models::{AppInfoFields, AppInfoRecord};
use crate::errors::ServiceError;
use crate::store::{KeyValueStore, UpdateBuilder};

/// Updatable app-info attributes, in the order updates apply them.
pub const APP_INFO_FIELDS: &[&str] = &[
    "name",
    "title",
    "description",
    "locale",
    "pre_message",
    "pre_action",
];

/// Every app-info id starts with this tag.
pub const ID_PREFIX: &str = "ext-id-";

pub const MISSING_FIELDS_ERROR: &str = "Missing required fields";
pub const MISSING_ID_ERROR: &str = "AppInfo ID is required.";
pub const NOT_FOUND_ERROR: &str = "AppInfo not found";
pub const NO_FIELDS_ERROR: &str = "No valid fields to update";

const UPDATES: UpdateBuilder = UpdateBuilder::new(APP_INFO_FIELDS);

pub struct AppInfoRepository<S> {
    store: S,
}

impl<S: KeyValueStore> AppInfoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a new record. All six fields must be non-empty strings.
    pub async fn create(&self, input: &Value) -> Result<AppInfoRecord, ServiceError> {
        let fields = parse_fields(input)?;

        let required = |v: Option<String>| {
            v.filter(|s| !s.is_empty())
                .ok_or_else(|| ServiceError::ValidationError(MISSING_FIELDS_ERROR.to_string()))
        };

        let record = AppInfoRecord {
            id: format!("{ID_PREFIX}{}", Uuid::new_v4()),
            name: required(fields.name)?,
            title: required(fields.title)?,
            description: required(fields.description)?,
            locale: required(fields.locale)?,
            pre_message: required(fields.pre_message)?,
            pre_action: required(fields.pre_action)?,
            created_at: now_timestamp(),
            updated_at: None,
        };

        self.store.put(encode_record(&record)?).await?;

        let stored = self.store.get(&record.id).await?.ok_or_else(|| {
            ServiceError::StoreError(format!("AppInfo {} missing after write", record.id))
        })?;

        info!(id = %record.id, table = %self.store.table_name(), "Created app info");
        decode_record(stored)
    }

    pub async fn list(&self) -> Result<Vec<AppInfoRecord>, ServiceError> {
        self.store
            .scan_all()
            .await?
            .into_iter()
            .map(decode_record)
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> Result<AppInfoRecord, ServiceError> {
        match self.store.get(id).await? {
            Some(item) => decode_record(item),
            None => Err(ServiceError::NotFoundError(NOT_FOUND_ERROR.to_string())),
        }
    }

    /// Change whichever of the six fields `input` supplies and stamp `updatedAt`.
    pub async fn update_by_id(&self, id: &str, input: &Value) -> Result<AppInfoRecord, ServiceError> {
        if id.is_empty() {
            return Err(ServiceError::ValidationError(MISSING_ID_ERROR.to_string()));
        }

        let fields = parse_fields(input)?;
        let plan = UPDATES.build(
            &encode_record(&fields)?,
            Some((UPDATED_AT, Value::String(now_timestamp()))),
            NO_FIELDS_ERROR,
        )?;

        match self.store.update(id, &plan).await? {
            Some(item) => {
                info!(id = %id, "Updated app info");
                decode_record(item)
            }
            None => {
                warn!(id = %id, "Update requested for unknown app info");
                Err(ServiceError::NotFoundError(NOT_FOUND_ERROR.to_string()))
            }
        }
    }

    /// Delete by id. Missing ids are not an error.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        info!(id = %id, "Deleted app info");
        Ok(())
    }
}

fn parse_fields(input: &Value) -> Result<AppInfoFields, ServiceError> {
    let body = decode_payload(input)?;
    serde_json::from_value(Value::Object(body)).map_err(|e| {
        warn!("Rejected app info payload: {}", e);
        ServiceError::ValidationError(format!("Invalid app info fields: {e}"))
    })
}
