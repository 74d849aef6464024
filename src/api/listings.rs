use async_trait::async_trait;
use tracing::{debug, info};

use super::client::HttpClient;
use super::endpoints::{detail_path, Actor, ListingAction, ListingScope};
use super::traits::ListingBackend;
use crate::error::ApiError;
use crate::filters::{Filters, QueryParams};
use crate::models::{ListingPage, ListingPayload, PropertyResponse};

/// Listing endpoints over HTTP
#[derive(Debug, Clone)]
pub struct ListingsApi {
    http: HttpClient,
}

impl ListingsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ListingBackend for ListingsApi {
    async fn fetch_listings(
        &self,
        scope: &ListingScope,
        filters: &Filters,
        page: usize,
        size: usize,
    ) -> Result<ListingPage<PropertyResponse>, ApiError> {
        let path = scope.path();
        let params = if scope.accepts_filters() {
            filters.to_query()
        } else {
            QueryParams::new()
        };
        let params = params.with_pagination(page, size);

        debug!("Fetching {} with {}", path, params.to_query_string());
        let mut payload: ListingPayload<PropertyResponse> =
            self.http.get_json(&path, params.pairs()).await?;

        if !scope.accepts_filters() && !filters.is_default() {
            payload.retain_unpaged(|property| filters.matches(property));
        }

        let listing_page = payload.normalize(page, size);
        debug!(
            "Loaded {} of {} listings for {}",
            listing_page.items.len(),
            listing_page.total_elements,
            scope
        );
        Ok(listing_page)
    }

    async fn fetch_listing(&self, actor: &Actor, id: i64) -> Result<PropertyResponse, ApiError> {
        self.http.get_json(&detail_path(actor, id), &[]).await
    }

    async fn perform(&self, actor: &Actor, action: &ListingAction, id: i64) -> Result<(), ApiError> {
        let path = action.path(actor, id)?;
        self.http.patch(&path, action.body().as_ref()).await?;
        info!("✅ {} applied to property {}", action.name(), id);
        Ok(())
    }
}
