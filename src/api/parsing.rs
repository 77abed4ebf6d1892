use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::ApiRequest;
use crate::errors::ServiceError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of a REST (`httpMethod`) or HTTP API (`requestContext.http.method`) event.
pub fn request_method(event: &Value) -> Option<String> {
    v_str(event, &["httpMethod"])
        .or_else(|| v_str(event, &["requestContext", "http", "method"]))
        .map(str::to_ascii_uppercase)
}

pub fn request_path(event: &Value) -> Option<&str> {
    v_str(event, &["rawPath"]).or_else(|| v_str(event, &["path"]))
}

/// Pull the path id and decoded body out of an API Gateway event.
///
/// A body that is already a JSON object (direct invocation) is re-encoded so
/// repositories always see the same shape.
pub fn parse_request(event: &Value) -> Result<ApiRequest, ServiceError> {
    let id = v_str(event, &["pathParameters", "id"]).map(str::to_string);

    let body = match event.get("body") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => {
            let base64 = event
                .get("isBase64Encoded")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            Some(if base64 { decode_base64(raw)? } else { raw.clone() })
        }
        Some(other) => Some(other.to_string()),
    };

    Ok(ApiRequest { id, body })
}

fn decode_base64(raw: &str) -> Result<String, ServiceError> {
    let bytes = STANDARD
        .decode(raw)
        .map_err(|e| ServiceError::ValidationError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ServiceError::ValidationError(format!("Body is not UTF-8: {e}")))
}
