use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const COLLECTION: &str = "notifications";

pub const TYPE_INFO: &str = "info";
pub const TYPE_WARNING: &str = "warning";

/// In-app notification addressed to a single user. Role-wide sends fan out
/// into one document per recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bildirim {
    pub notification_id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}

impl Bildirim {
    pub fn new(user_id: String, title: String, message: String, notification_type: Option<String>) -> Self {
        Self {
            notification_id: Uuid::new_v4().to_string(),
            user_id,
            title,
            message,
            notification_type: notification_type.unwrap_or_else(|| TYPE_INFO.to_string()),
            is_read: false,
            created_at: Utc::now(),
            read_at: None,
        }
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
        self.read_at = Some(Utc::now());
    }
}
