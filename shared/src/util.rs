use chrono::{DateTime, Utc};

/// Current UTC time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a UUID v4 string for use as resource ID.
///
/// Used by cafe-server for users, menu items and orders.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
