//! Paginated listing page.
//!
//! Every fetch is stamped with a generation. Only the response for the most
//! recent generation is applied, so a slow answer for an old page or old
//! filters can never overwrite a newer one.

use std::sync::Arc;

use tracing::{error, info};

use crate::api::{ListingAction, ListingBackend, ListingScope};
use crate::error::ApiError;
use crate::filters::Filters;
use crate::models::{ListingPage, PropertyResponse};
use crate::pagination::PageWindow;

pub const LOAD_FAILED: &str = "Failed to load listings";

/// Parameters of one fetch, stamped with its generation
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub generation: u64,
    pub scope: ListingScope,
    pub filters: Filters,
    pub page: usize,
    pub size: usize,
}

impl LoadRequest {
    /// Run this request against a backend without touching the list
    pub async fn fetch(
        &self,
        backend: &dyn ListingBackend,
    ) -> Result<ListingPage<PropertyResponse>, ApiError> {
        backend
            .fetch_listings(&self.scope, &self.filters, self.page, self.size)
            .await
    }
}

/// State behind one listing page
pub struct ListingList {
    backend: Arc<dyn ListingBackend>,
    scope: ListingScope,
    filters: Filters,
    page: usize,
    size: usize,
    items: Vec<PropertyResponse>,
    total_pages: usize,
    total_elements: usize,
    generation: u64,
    error: Option<String>,
}

impl ListingList {
    pub fn new(backend: Arc<dyn ListingBackend>, scope: ListingScope, size: usize) -> Self {
        Self {
            backend,
            scope,
            filters: Filters::default(),
            page: 0,
            size: size.max(1),
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            generation: 0,
            error: None,
        }
    }

    /// Start from these filters instead of the defaults
    pub fn with_filters(mut self, mut filters: Filters) -> Self {
        filters.normalize_ranges();
        self.filters = filters;
        self
    }

    /// Start on a 0-based page other than the first
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn scope(&self) -> &ListingScope {
        &self.scope
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn items(&self) -> &[PropertyResponse] {
        &self.items
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    /// Banner text after a failed load
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::for_index(self.page, self.total_pages)
    }

    /// Start a fetch for the current parameters, invalidating older ones
    pub fn begin_load(&mut self) -> LoadRequest {
        self.generation += 1;
        LoadRequest {
            generation: self.generation,
            scope: self.scope.clone(),
            filters: self.filters.clone(),
            page: self.page,
            size: self.size,
        }
    }

    /// Apply a fetch result. Returns false when the request was superseded
    /// and the result was dropped.
    pub fn complete_load(
        &mut self,
        request: &LoadRequest,
        result: Result<ListingPage<PropertyResponse>, ApiError>,
    ) -> Result<bool, ApiError> {
        if request.generation != self.generation {
            info!(
                "Discarding stale response for page {} (generation {} < {})",
                request.page, request.generation, self.generation
            );
            return Ok(false);
        }

        match result {
            Ok(page) => {
                self.items = page.items;
                self.total_pages = page.total_pages;
                self.total_elements = page.total_elements;
                self.error = None;
                Ok(true)
            }
            Err(e) => {
                error!("{} for {}: {}", LOAD_FAILED, self.scope, e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Fetch the current page
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let request = self.begin_load();
        let result = request.fetch(self.backend.as_ref()).await;
        self.complete_load(&request, result).map(|_| ())
    }

    /// Jump to a 0-based page
    pub async fn set_page(&mut self, page: usize) -> Result<(), ApiError> {
        self.page = page;
        self.refresh().await
    }

    pub async fn next_page(&mut self) -> Result<(), ApiError> {
        if self.window().has_next() {
            self.set_page(self.page + 1).await
        } else {
            Ok(())
        }
    }

    pub async fn previous_page(&mut self) -> Result<(), ApiError> {
        if self.page > 0 {
            self.set_page(self.page - 1).await
        } else {
            Ok(())
        }
    }

    pub async fn set_size(&mut self, size: usize) -> Result<(), ApiError> {
        self.size = size.max(1);
        self.page = 0;
        self.refresh().await
    }

    /// Apply new filters from the first page. Inverted ranges are swapped.
    pub async fn apply_filters(&mut self, mut filters: Filters) -> Result<(), ApiError> {
        filters.normalize_ranges();
        self.filters = filters;
        self.page = 0;
        self.refresh().await
    }

    pub async fn reset_filters(&mut self) -> Result<(), ApiError> {
        self.apply_filters(Filters::default()).await
    }

    /// Run an action, then reload the current page whatever the outcome
    pub async fn perform(&mut self, action: &ListingAction, id: i64) -> Result<(), ApiError> {
        let outcome = self
            .backend
            .perform(self.scope.actor(), action, id)
            .await;
        if let Err(e) = &outcome {
            error!("Failed to {} property {}: {}", action.name(), id, e);
        }

        let reload = self.refresh().await;
        outcome.and(reload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::MockListingBackend;
    use crate::api::{Actor, ListingView, RejectionReason};
    use crate::error::ValidationError;
    use crate::filters::Category;
    use mockall::predicate::eq;

    fn property(id: i64) -> PropertyResponse {
        PropertyResponse {
            id,
            ..Default::default()
        }
    }

    fn page_of(ids: std::ops::Range<i64>, total_elements: usize, size: usize) -> ListingPage<PropertyResponse> {
        ListingPage {
            items: ids.map(property).collect(),
            total_pages: crate::pagination::total_pages(total_elements, size),
            total_elements,
            server_paged: true,
        }
    }

    fn pending_scope() -> ListingScope {
        ListingScope::new(Actor::Admin, ListingView::Pending).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_loads_first_page() {
        // given: 47 pending listings, page size 10
        let mut backend = MockListingBackend::new();
        backend
            .expect_fetch_listings()
            .withf(|_, _, page, size| *page == 0 && *size == 10)
            .times(1)
            .returning(|_, _, _, _| Ok(page_of(0..10, 47, 10)));
        let mut list = ListingList::new(Arc::new(backend), pending_scope(), 10);

        // when
        list.refresh().await.unwrap();

        // then: buttons 1..5, no previous page
        assert_eq!(list.items().len(), 10);
        assert_eq!(list.total_pages(), 5);
        let window = list.window();
        assert_eq!(window.pages().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(window.has_next());
        assert!(!window.has_previous());
    }

    #[tokio::test]
    async fn test_apply_filters_resets_page_and_swaps_range() {
        let mut backend = MockListingBackend::new();
        backend
            .expect_fetch_listings()
            .withf(|_, filters, page, _| {
                *page == 0
                    && filters.category == Category::Commercial
                    && filters.price_min == Some(1_000_000)
                    && filters.price_max == Some(5_000_000)
            })
            .times(1)
            .returning(|_, _, _, _| Ok(page_of(0..3, 3, 10)));
        backend
            .expect_fetch_listings()
            .withf(|_, filters, page, _| *page == 3 && filters.is_default())
            .times(1)
            .returning(|_, _, _, _| Ok(page_of(30..40, 47, 10)));
        let mut list = ListingList::new(Arc::new(backend), pending_scope(), 10);

        // given: the user is on page 4
        list.set_page(3).await.unwrap();
        assert_eq!(list.page(), 3);

        // when: an inverted commercial price range is applied
        let filters = Filters {
            category: Category::Commercial,
            price_min: Some(5_000_000),
            price_max: Some(1_000_000),
            ..Default::default()
        };
        list.apply_filters(filters).await.unwrap();

        // then
        assert_eq!(list.page(), 0);
        assert_eq!(list.filters().price_min, Some(1_000_000));
        assert_eq!(list.items().len(), 3);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let backend = MockListingBackend::new();
        let mut list = ListingList::new(Arc::new(backend), pending_scope(), 10);

        // given: page 1 requested, then page 2 requested before page 1 answers
        let first = list.begin_load();
        list.page = 1;
        let second = list.begin_load();

        // when: the newer answer lands first, then the old one
        assert!(list.complete_load(&second, Ok(page_of(10..20, 47, 10))).unwrap());
        let applied = list.complete_load(&first, Ok(page_of(0..10, 47, 10))).unwrap();

        // then: the old answer is ignored
        assert!(!applied);
        assert_eq!(list.items()[0].id, 10);
    }

    #[tokio::test]
    async fn test_stale_error_does_not_set_banner() {
        let mut list = ListingList::new(Arc::new(MockListingBackend::new()), pending_scope(), 10);
        let first = list.begin_load();
        let _second = list.begin_load();

        let result = list.complete_load(
            &first,
            Err(ApiError::Status {
                path: "/admin/filterPendingProperties".to_string(),
                status: 500,
                body: String::new(),
            }),
        );

        assert!(matches!(result, Ok(false)));
        assert_eq!(list.error(), None);
    }

    #[tokio::test]
    async fn test_failed_load_sets_banner() {
        let mut backend = MockListingBackend::new();
        backend.expect_fetch_listings().returning(|_, _, _, _| {
            Err(ApiError::Status {
                path: "/admin/filterPendingProperties".to_string(),
                status: 502,
                body: String::new(),
            })
        });
        let mut list = ListingList::new(Arc::new(backend), pending_scope(), 10);

        let result = list.refresh().await;

        assert_eq!(result.unwrap_err().status(), Some(502));
        assert_eq!(list.error(), Some(LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_action_is_followed_by_reload() {
        let mut backend = MockListingBackend::new();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_perform()
            .with(eq(Actor::Admin), eq(ListingAction::ToggleVip), eq(7))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        backend
            .expect_fetch_listings()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| Ok(page_of(0..2, 2, 10)));
        let mut list = ListingList::new(Arc::new(backend), pending_scope(), 10);

        list.perform(&ListingAction::ToggleVip, 7).await.unwrap();

        assert_eq!(list.items().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_action_still_reloads() {
        let mut backend = MockListingBackend::new();
        backend
            .expect_perform()
            .times(1)
            .returning(|_, _, _| Err(ApiError::Validation(ValidationError::EmptyReason)));
        backend
            .expect_fetch_listings()
            .times(1)
            .returning(|_, _, _, _| Ok(page_of(0..1, 1, 10)));
        let mut list = ListingList::new(Arc::new(backend), pending_scope(), 10);

        let reason = RejectionReason::new("Duplicate").unwrap();
        let result = list.perform(&ListingAction::Reject(reason), 3).await;

        assert!(matches!(
            result,
            Err(ApiError::Validation(ValidationError::EmptyReason))
        ));
        assert_eq!(list.items().len(), 1);
    }

    #[tokio::test]
    async fn test_set_size_returns_to_first_page() {
        let mut backend = MockListingBackend::new();
        backend
            .expect_fetch_listings()
            .withf(|_, _, page, size| *page == 0 && *size == 15)
            .times(1)
            .returning(|_, _, _, _| Ok(page_of(0..15, 47, 15)));
        let mut list = ListingList::new(Arc::new(backend), pending_scope(), 10);
        list.page = 2;

        list.set_size(15).await.unwrap();

        assert_eq!(list.page(), 0);
        assert_eq!(list.total_pages(), 4);
    }
}
