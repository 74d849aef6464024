use std::sync::Arc;

use tracing::error;

use crate::api::{Actor, ListingAction, ListingBackend};
use crate::error::ApiError;
use crate::models::PropertyResponse;

pub const LOAD_FAILED: &str = "Failed to load listing";

/// Label and rendered value of one populated field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDisplay {
    pub label: String,
    pub value: String,
}

impl FieldDisplay {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// A single listing and the actions available on it
pub struct ListingDetail {
    backend: Arc<dyn ListingBackend>,
    actor: Actor,
    id: i64,
    listing: Option<PropertyResponse>,
    error: Option<String>,
}

impl ListingDetail {
    pub fn new(backend: Arc<dyn ListingBackend>, actor: Actor, id: i64) -> Self {
        Self {
            backend,
            actor,
            id,
            listing: None,
            error: None,
        }
    }

    pub fn listing(&self) -> Option<&PropertyResponse> {
        self.listing.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        match self.backend.fetch_listing(&self.actor, self.id).await {
            Ok(listing) => {
                self.listing = Some(listing);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                error!("{} {}: {}", LOAD_FAILED, self.id, e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Run an action on this listing and reload it
    pub async fn perform(&mut self, action: &ListingAction) -> Result<(), ApiError> {
        self.backend.perform(&self.actor, action, self.id).await?;
        self.load().await
    }

    /// Every populated field in display order
    pub fn fields(&self) -> Vec<FieldDisplay> {
        self.listing.as_ref().map(field_dump).unwrap_or_default()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Flatten a listing into label/value pairs, skipping empty fields
pub fn field_dump(p: &PropertyResponse) -> Vec<FieldDisplay> {
    let mut fields = vec![
        FieldDisplay::new("ID", p.id.to_string()),
        FieldDisplay::new("Title", p.display_title()),
        FieldDisplay::new("Status", p.status().label()),
    ];

    let text = [
        ("Category", &p.category),
        ("Property type", &p.property_type),
        ("Preference", &p.preference),
        ("Furnishing", &p.furnishing),
        ("Availability", &p.availability),
        ("Age", &p.age),
        ("Address", &p.address),
        ("Locality", &p.locality),
        ("City", &p.city),
        ("State", &p.state),
        ("Description", &p.description),
        ("Rejection reason", &p.rejection_reason),
    ];
    for (label, value) in text {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            fields.push(FieldDisplay::new(label, value));
        }
    }

    if let Some(price) = p.price {
        fields.push(FieldDisplay::new("Price", format!("₹{price:.0}")));
    }
    if let Some(area) = p.area {
        fields.push(FieldDisplay::new("Area", format!("{area} sq ft")));
    }

    fields.push(FieldDisplay::new("VIP", yes_no(p.vip)));
    fields.push(FieldDisplay::new("RERA verified", yes_no(p.rera_verified)));

    let amenities = p.amenities();
    if !amenities.is_empty() {
        fields.push(FieldDisplay::new("Amenities", amenities.join(", ")));
    }
    if let Some(owner) = &p.owner {
        let contact: Vec<&str> = [&owner.name, &owner.email, &owner.phone]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect();
        if !contact.is_empty() {
            fields.push(FieldDisplay::new("Owner", contact.join(" · ")));
        }
    }
    if !p.media.is_empty() {
        fields.push(FieldDisplay::new("Media", format!("{} file(s)", p.media.len())));
    }
    if let Some(created) = p.created_at {
        fields.push(FieldDisplay::new("Listed", created.format("%Y-%m-%d").to_string()));
    }
    if let Some(expires) = p.expires_at {
        fields.push(FieldDisplay::new("Expires", expires.format("%Y-%m-%d").to_string()));
    }

    fields
}
