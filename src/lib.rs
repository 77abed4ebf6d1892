//! Feedback Store - a CRUD data-access layer for user feedback submissions
//! and application-info records, served from AWS Lambda.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution (one entry point, routed by path)
//! - DynamoDB for storage, one table per record type
//! - STS assume-role credentials when `AWS_ROLE_ARN` is configured
//! - Tokio for async runtime
//!
//! Each invocation parses an API Gateway event, validates the payload in a
//! repository, performs one store operation and answers with a
//! `{statusCode, body}` envelope.
//!
//! # Example
//!
//! ```
//! use feedback_store::repository::FeedbackRepository;
//! use feedback_store::store::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = FeedbackRepository::new(InMemoryStore::new("feedback"));
//!
//!     let created = repo
//!         .create(&serde_json::json!({"rating": 4, "selectedOptions": ["fast"]}))
//!         .await?;
//!     let fetched = repo.get_by_id(&created.id).await?;
//!
//!     assert_eq!(fetched, Some(created));
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod repository;
pub mod store;

pub use errors::ServiceError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`). It
/// should be called once at process start; later calls are no-ops.
///
/// # Example
///
/// ```
/// feedback_store::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
