use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFoundError(String),

    #[error("Failed to access the data store: {0}")]
    StoreError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl ServiceError {
    /// HTTP status for this error, with `fallback` used for store failures.
    ///
    /// Store failures have no single natural status; each operation picks
    /// its own (list feedback answers 400, get answers 500, and so on).
    #[must_use]
    pub fn status_code(&self, fallback: u16) -> u16 {
        match self {
            ServiceError::ValidationError(_) => 400,
            ServiceError::NotFoundError(_) => 404,
            ServiceError::StoreError(_) => fallback,
            ServiceError::ConfigError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        ServiceError::ValidationError(format!("Invalid JSON body: {error}"))
    }
}

// Generic implementation for AWS SDK errors
impl<E, R> From<SdkError<E, R>> for ServiceError
where
    E: std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    fn from(error: SdkError<E, R>) -> Self {
        ServiceError::StoreError(DisplayErrorContext(&error).to_string())
    }
}
