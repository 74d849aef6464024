use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Admin review state of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// Lifecycle status shown on a listing card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
    Sold,
}

impl ListingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "Pending",
            ListingStatus::Approved => "Approved",
            ListingStatus::Rejected => "Rejected",
            ListingStatus::Expired => "Expired",
            ListingStatus::Sold => "Sold",
        }
    }
}

/// Photo, video or document attached to a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// Listing owner as embedded in the property record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Owner {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// Property listing as returned by the backend
///
/// Only `id` is required. The boolean amenity flags (`parking`, `lift`,
/// `gym`, ...) are not modelled one by one; they land in `extra` and are
/// read back through [`PropertyResponse::amenities`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub preference: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub furnishing: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub admin_approved: Option<ApprovalStatus>,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub vip: bool,
    #[serde(default)]
    pub sold: bool,
    #[serde(default)]
    pub rera_verified: bool,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Amenity flags and any other field not listed above
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PropertyResponse {
    /// Names of amenity flags set to `true`
    pub fn amenities(&self) -> Vec<&str> {
        self.extra
            .iter()
            .filter(|(_, value)| value.as_bool() == Some(true))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Whether the named amenity flag is set, case-insensitively
    pub fn has_amenity(&self, name: &str) -> bool {
        self.extra
            .iter()
            .any(|(key, value)| key.eq_ignore_ascii_case(name) && value.as_bool() == Some(true))
    }

    /// Display status, most terminal state first
    pub fn status(&self) -> ListingStatus {
        if self.sold {
            ListingStatus::Sold
        } else if self.expired {
            ListingStatus::Expired
        } else {
            match self.admin_approved {
                Some(ApprovalStatus::Approved) => ListingStatus::Approved,
                Some(ApprovalStatus::Rejected) => ListingStatus::Rejected,
                _ => ListingStatus::Pending,
            }
        }
    }

    /// Title with a fallback for untitled drafts
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => format!("Property #{}", self.id),
        }
    }
}
