//! DynamoDB-backed store.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::sts::AssumeRoleProvider;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use tracing::{debug, error, info};

use super::conversions::{attrs_to_object, item_to_attrs, json_to_attr};
use super::{Item, KEY_ATTRIBUTE, KeyValueStore, UpdatePlan};
use crate::core::config::{AppConfig, CredentialSource, StoreConfig};
use crate::errors::ServiceError;

/// Placeholder for the key attribute in condition expressions.
const KEY_PLACEHOLDER: &str = "#pk";

/// Build the DynamoDB client shared by every table.
///
/// With [`CredentialSource::AssumeRole`] the client signs with temporary STS
/// credentials; the SDK's identity cache renews them before they expire.
pub async fn build_client(config: &AppConfig) -> Client {
    let region = Region::new(config.region.clone());
    let base = aws_config::defaults(BehaviorVersion::latest())
        .region(region.clone())
        .load()
        .await;

    let mut builder = aws_sdk_dynamodb::config::Builder::from(&base);

    if let CredentialSource::AssumeRole {
        role_arn,
        session_name,
        session_seconds,
    } = &config.credential_source
    {
        info!(role_arn = %role_arn, "Using assumed-role credentials for DynamoDB");
        let provider = AssumeRoleProvider::builder(role_arn)
            .session_name(session_name)
            .session_length(Duration::from_secs(*session_seconds))
            .region(region)
            .configure(&base)
            .build()
            .await;
        builder = builder.credentials_provider(provider);
    }

    if let Some(endpoint) = &config.endpoint_url {
        info!(endpoint = %endpoint, "Using custom DynamoDB endpoint");
        builder = builder.endpoint_url(endpoint);
    }

    Client::from_conf(builder.build())
}

/// A DynamoDB table addressed by the string partition key `id`.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    #[must_use]
    pub fn from_config(client: Client, config: &StoreConfig) -> Self {
        Self::new(client, config.table_name.clone())
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl KeyValueStore for DynamoStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put(&self, item: Item) -> Result<(), ServiceError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_attrs(&item)))
            .send()
            .await
            .map_err(|e| {
                error!(table = %self.table_name, "PutItem failed: {}", e);
                ServiceError::from(e)
            })?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, ServiceError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(id))
            .send()
            .await
            .map_err(|e| {
                error!(table = %self.table_name, id = %id, "GetItem failed: {}", e);
                ServiceError::from(e)
            })?;

        output.item.as_ref().map(attrs_to_object).transpose()
    }

    async fn update(&self, id: &str, plan: &UpdatePlan) -> Result<Option<Item>, ServiceError> {
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(id))
            .update_expression(plan.expression())
            .condition_expression(format!("attribute_exists({KEY_PLACEHOLDER})"))
            .expression_attribute_names(KEY_PLACEHOLDER, KEY_ATTRIBUTE)
            .return_values(ReturnValue::AllNew);

        for (placeholder, name) in plan.names() {
            request = request.expression_attribute_names(placeholder, name);
        }
        for (placeholder, value) in plan.values() {
            request = request.expression_attribute_values(placeholder, json_to_attr(value));
        }

        match request.send().await {
            Ok(output) => match output.attributes {
                Some(attrs) => attrs_to_object(&attrs).map(Some),
                None => Err(ServiceError::StoreError(
                    "UpdateItem returned no attributes".to_string(),
                )),
            },
            Err(e) => {
                if let Some(UpdateItemError::ConditionalCheckFailedException(_)) =
                    e.as_service_error()
                {
                    debug!(table = %self.table_name, id = %id, "Update skipped, item does not exist");
                    return Ok(None);
                }
                error!(table = %self.table_name, id = %id, "UpdateItem failed: {}", e);
                Err(ServiceError::from(e))
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(id))
            .send()
            .await
            .map_err(|e| {
                error!(table = %self.table_name, id = %id, "DeleteItem failed: {}", e);
                ServiceError::from(e)
            })?;
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Item>, ServiceError> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| {
                    error!(table = %self.table_name, "Scan failed: {}", e);
                    ServiceError::from(e)
                })?;

            for attrs in output.items() {
                items.push(attrs_to_object(attrs)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(table = %self.table_name, count = items.len(), "Scan complete");
        Ok(items)
    }
}
