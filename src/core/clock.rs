use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 string with millisecond precision,
/// e.g. `2024-05-01T12:30:00.000Z`.
#[must_use]
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
