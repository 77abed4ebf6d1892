//! Response builders shared by every handler.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::errors::ServiceError;

/// Returns a response with `body` JSON-encoded under the given status code.
#[must_use]
pub fn json_response<T: Serialize>(status_code: u16, body: &T) -> Value {
    match serde_json::to_string(body) {
        Ok(encoded) => envelope(status_code, encoded),
        Err(e) => {
            error!("Failed to encode response body: {}", e);
            err_response(500, "Failed to encode response")
        }
    }
}

/// Returns a `{message, data}` success response.
#[must_use]
pub fn data_response<T: Serialize>(status_code: u16, message: &str, data: &T) -> Value {
    json_response(status_code, &json!({ "message": message, "data": data }))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    envelope(status_code, json!({ "error": message }).to_string())
}

/// Returns the error response for `err`; store failures use `fallback_status`.
#[must_use]
pub fn service_error_response(err: &ServiceError, fallback_status: u16) -> Value {
    let status = err.status_code(fallback_status);
    if status >= 500 {
        error!(status, "Request failed: {}", err);
    }
    err_response(status, &err.to_string())
}

fn envelope(status_code: u16, body: String) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body
    })
}
