use async_trait::async_trait;

use super::endpoints::{Actor, ListingAction, ListingScope};
use crate::error::ApiError;
use crate::filters::Filters;
use crate::models::{ListingPage, NotificationDetails, PropertyResponse};

/// Listing reads and actions the list and detail controllers depend on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingBackend: Send + Sync {
    /// One normalized page of listings. `page` is 0-based.
    async fn fetch_listings(
        &self,
        scope: &ListingScope,
        filters: &Filters,
        page: usize,
        size: usize,
    ) -> Result<ListingPage<PropertyResponse>, ApiError>;

    async fn fetch_listing(&self, actor: &Actor, id: i64) -> Result<PropertyResponse, ApiError>;

    async fn perform(&self, actor: &Actor, action: &ListingAction, id: i64) -> Result<(), ApiError>;
}

/// Notification reads and read-state updates for one actor
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    async fn all(&self) -> Result<Vec<NotificationDetails>, ApiError>;

    async fn unread(&self) -> Result<Vec<NotificationDetails>, ApiError>;

    async fn unread_count(&self) -> Result<u64, ApiError>;

    async fn mark_viewed(&self, id: i64) -> Result<(), ApiError>;

    async fn mark_all_viewed(&self) -> Result<(), ApiError>;
}
