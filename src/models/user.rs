use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::property::Media;
use super::timestamp;
use super::Role;
use crate::error::ValidationError;

/// KYC verification status
///
/// The backend is not consistent about spellings (`INAPPLICABLE` and
/// `NOT_SUBMITTED`, `APPROVED` and `VERIFIED` both appear). Each spelling is
/// kept as its own variant; [`KycStatus::is_cleared`] and
/// [`KycStatus::is_awaiting_submission`] group them for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    Pending,
    Approved,
    Rejected,
    Inapplicable,
    NotSubmitted,
    Verified,
    #[serde(other)]
    Unknown,
}

impl KycStatus {
    pub fn is_cleared(&self) -> bool {
        matches!(self, KycStatus::Approved | KycStatus::Verified)
    }

    pub fn is_awaiting_submission(&self) -> bool {
        matches!(self, KycStatus::Inapplicable | KycStatus::NotSubmitted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            KycStatus::Pending => "Pending",
            KycStatus::Approved => "Approved",
            KycStatus::Rejected => "Rejected",
            KycStatus::Inapplicable => "Inapplicable",
            KycStatus::NotSubmitted => "Not submitted",
            KycStatus::Verified => "Verified",
            KycStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub kyc_status: Option<KycStatus>,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Seller waiting in the KYC queue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub kyc_status: Option<KycStatus>,
    #[serde(default)]
    pub documents: Vec<Media>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub agency_name: Option<String>,
    #[serde(default)]
    pub rera_number: Option<String>,
    #[serde(default)]
    pub kyc_status: Option<KycStatus>,
    #[serde(default)]
    pub total_listings: Option<u64>,
}

/// Editable profile fields for agents and buyers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rera_number: Option<String>,
}

impl ProfileUpdate {
    /// Required fields must be non-blank before the form is sent
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kyc_spellings_stay_distinct() {
        let statuses: Vec<KycStatus> = serde_json::from_value(json!([
            "NOT_SUBMITTED",
            "INAPPLICABLE",
            "VERIFIED",
            "APPROVED",
            "ESCALATED"
        ]))
        .unwrap();

        assert_eq!(statuses[0], KycStatus::NotSubmitted);
        assert_eq!(statuses[1], KycStatus::Inapplicable);
        assert!(statuses[0].is_awaiting_submission() && statuses[1].is_awaiting_submission());
        assert!(statuses[2].is_cleared() && statuses[3].is_cleared());
        assert_eq!(statuses[4], KycStatus::Unknown);
    }

    #[test]
    fn test_profile_update_requires_name_and_email() {
        let mut update = ProfileUpdate {
            name: " ".to_string(),
            email: "a@b.in".to_string(),
            ..Default::default()
        };
        assert_eq!(update.validate(), Err(ValidationError::MissingField("name")));

        update.name = "Asha".to_string();
        update.email = String::new();
        assert_eq!(update.validate(), Err(ValidationError::MissingField("email")));

        update.email = "asha@example.in".to_string();
        assert_eq!(update.validate(), Ok(()));
    }

    #[test]
    fn test_profile_update_skips_empty_optionals() {
        let update = ProfileUpdate {
            name: "Asha".to_string(),
            email: "asha@example.in".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, json!({"name": "Asha", "email": "asha@example.in"}));
    }
}
