//! JSON ↔ DynamoDB attribute conversion.
//!
//! Pure functions, testable without DynamoDB access. Repositories work with
//! JSON objects; only `DynamoStore` sees `AttributeValue`s.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value};

use super::Item;
use crate::errors::ServiceError;

/// Convert a JSON value to an attribute value.
#[must_use]
pub fn json_to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attr).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attr(v)))
                .collect(),
        ),
    }
}

/// Convert an attribute value back to JSON.
///
/// Sets become arrays and binary values become base64 strings; neither is
/// written by this crate but either may exist in a shared table.
pub fn attr_to_json(attr: &AttributeValue) -> Result<Value, ServiceError> {
    let value = match attr {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(attr_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(attrs_to_object(map)?),
        AttributeValue::Ss(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(items) => Value::Array(
            items
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::B(blob) => Value::String(encode_blob(blob)),
        AttributeValue::Bs(blobs) => {
            Value::Array(blobs.iter().map(|b| Value::String(encode_blob(b))).collect())
        }
        other => {
            return Err(ServiceError::StoreError(format!(
                "Unsupported attribute type: {other:?}"
            )));
        }
    };
    Ok(value)
}

/// Convert a JSON object into a DynamoDB item.
#[must_use]
pub fn item_to_attrs(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(k, v)| (k.clone(), json_to_attr(v)))
        .collect()
}

/// Convert a DynamoDB item into a JSON object.
pub fn attrs_to_object(attrs: &HashMap<String, AttributeValue>) -> Result<Map<String, Value>, ServiceError> {
    attrs
        .iter()
        .map(|(k, v)| attr_to_json(v).map(|json| (k.clone(), json)))
        .collect()
}

fn parse_number(raw: &str) -> Result<Number, ServiceError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Number::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| ServiceError::StoreError(format!("Invalid number attribute: {raw}")))
}

fn encode_blob(blob: &Blob) -> String {
    STANDARD.encode(blob.as_ref())
}
