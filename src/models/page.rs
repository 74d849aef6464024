//! Listing payload shapes and their normalization.
//!
//! Endpoints answer with a paged object, a `{commercial, residential}`
//! grouping, or a bare array. Everything is folded into [`ListingPage`]
//! here and nowhere else.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::pagination;

/// Server-side page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub total_elements: usize,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub number: usize,
}

/// Unpaged listings split by category
///
/// At least one of the two keys must be present. Any other object, such as
/// an error envelope or a page without `content`, is not a grouping.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupedResponse<T> {
    pub commercial: Vec<T>,
    pub residential: Vec<T>,
}

#[derive(Deserialize)]
struct RawGrouped<T> {
    commercial: Option<Vec<T>>,
    residential: Option<Vec<T>>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for GroupedResponse<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawGrouped::<T>::deserialize(deserializer)?;
        if raw.commercial.is_none() && raw.residential.is_none() {
            return Err(de::Error::custom(
                "expected a `commercial` or `residential` listing group",
            ));
        }
        Ok(Self {
            commercial: raw.commercial.unwrap_or_default(),
            residential: raw.residential.unwrap_or_default(),
        })
    }
}

/// Any of the three shapes a list endpoint may return
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListingPayload<T> {
    Bare(Vec<T>),
    Page(PageResponse<T>),
    Grouped(GroupedResponse<T>),
}

/// Normalized page of items
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub total_elements: usize,
    /// False when the page was cut client-side
    pub server_paged: bool,
}

impl<T> Default for ListingPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            server_paged: false,
        }
    }
}

impl<T> ListingPayload<T> {
    pub fn is_server_paged(&self) -> bool {
        matches!(self, ListingPayload::Page(_))
    }

    /// Drop items from unpaged payloads. Server pages are left alone since
    /// their totals would no longer add up.
    pub fn retain_unpaged<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        match self {
            ListingPayload::Bare(items) => items.retain(|item| keep(item)),
            ListingPayload::Grouped(grouped) => {
                grouped.commercial.retain(|item| keep(item));
                grouped.residential.retain(|item| keep(item));
            }
            ListingPayload::Page(_) => {}
        }
    }

    /// Fold into a flat page. `page` is 0-based.
    pub fn normalize(self, page: usize, size: usize) -> ListingPage<T> {
        match self {
            ListingPayload::Page(server) => {
                let total_elements = server.total_elements.max(server.content.len());
                let total_pages = if server.total_pages == 0 && total_elements > 0 {
                    pagination::total_pages(total_elements, size.max(server.size))
                } else {
                    server.total_pages
                };
                ListingPage {
                    items: server.content,
                    total_pages,
                    total_elements,
                    server_paged: true,
                }
            }
            ListingPayload::Grouped(grouped) => {
                let mut items = grouped.commercial;
                items.extend(grouped.residential);
                paginate_locally(items, page, size)
            }
            ListingPayload::Bare(items) => paginate_locally(items, page, size),
        }
    }
}

fn paginate_locally<T>(items: Vec<T>, page: usize, size: usize) -> ListingPage<T> {
    let total_elements = items.len();
    let range = pagination::page_range(total_elements, page, size);
    let items = items
        .into_iter()
        .skip(range.start)
        .take(range.end - range.start)
        .collect();

    ListingPage {
        items,
        total_pages: pagination::total_pages(total_elements, size),
        total_elements,
        server_paged: false,
    }
}
