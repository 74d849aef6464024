use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Account role as the backend spells it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Agent,
    #[serde(alias = "USER")]
    Buyer,
    #[serde(other)]
    Unknown,
}

/// A single notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDetails {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub sender_role: Option<Role>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub receiver_role: Option<Role>,
    #[serde(default)]
    pub viewed: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}
