use std::env;

use crate::errors::ServiceError;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_ROLE_SESSION_NAME: &str = "feedback-store";
/// Lifetime requested for assumed-role sessions, in seconds.
pub const ROLE_SESSION_SECONDS: u64 = 3600;

/// Where the store connection gets its AWS credentials from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// The SDK default provider chain (Lambda execution role, env vars, profile).
    DefaultChain,
    /// Temporary credentials from STS `AssumeRole`, refreshed by the SDK before expiry.
    AssumeRole {
        role_arn: String,
        session_name: String,
        session_seconds: u64,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feedback_table: String,
    pub app_info_table: String,
    pub region: String,
    pub credential_source: CredentialSource,
    pub endpoint_url: Option<String>,
}

/// Connection settings for one logical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub table_name: String,
    pub region: String,
    pub credential_source: CredentialSource,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    ServiceError::ConfigError(format!("{key}: environment variable not found"))
                })
        };

        let credential_source = match lookup("AWS_ROLE_ARN").filter(|v| !v.trim().is_empty()) {
            Some(role_arn) => CredentialSource::AssumeRole {
                role_arn,
                session_name: lookup("ROLE_SESSION_NAME")
                    .unwrap_or_else(|| DEFAULT_ROLE_SESSION_NAME.to_string()),
                session_seconds: ROLE_SESSION_SECONDS,
            },
            None => CredentialSource::DefaultChain,
        };

        Ok(Self {
            feedback_table: required("DYNAMODB_FEEDBACK_TABLE")?,
            app_info_table: required("DYNAMODB_APPINFO_TABLE")?,
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            credential_source,
            endpoint_url: lookup("DYNAMODB_ENDPOINT_URL"),
        })
    }

    #[must_use]
    pub fn feedback_store(&self) -> StoreConfig {
        self.store_config(&self.feedback_table)
    }

    #[must_use]
    pub fn app_info_store(&self) -> StoreConfig {
        self.store_config(&self.app_info_table)
    }

    fn store_config(&self, table_name: &str) -> StoreConfig {
        StoreConfig {
            table_name: table_name.to_string(),
            region: self.region.clone(),
            credential_source: self.credential_source.clone(),
        }
    }
}
