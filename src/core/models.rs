use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A persisted feedback submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: String,
    pub rating: u8,
    #[serde(default)]
    pub selected_options: Vec<String>,
    #[serde(default)]
    pub custom_messages: BTreeMap<String, String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A persisted application-info descriptor.
///
/// The six descriptive fields keep their snake_case wire names; only the
/// timestamps are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfoRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub locale: String,
    pub pre_message: String,
    pub pre_action: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Caller-supplied app-info fields. Used both for creation (all required)
/// and partial updates (any subset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfoFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_action: Option<String>,
}

/// Path id and raw body pulled out of an inbound event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    pub id: Option<String>,
    pub body: Option<String>,
}
