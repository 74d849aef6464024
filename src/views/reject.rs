use crate::api::{ListingAction, RejectionReason};
use crate::error::ValidationError;

/// Reason entry shown before a rejection is sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectDialog {
    pub property_id: i64,
    pub text: String,
}

impl RejectDialog {
    pub fn open(property_id: i64) -> Self {
        Self {
            property_id,
            text: String::new(),
        }
    }

    /// Submit stays disabled until there is non-blank text
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// The rejection to send, or why it cannot be sent yet
    pub fn submit(&self) -> Result<ListingAction, ValidationError> {
        RejectionReason::new(&self.text).map(ListingAction::Reject)
    }
}
