//! Dashboard route table.

use std::fmt;

use crate::api::{Actor, ListingView};
use crate::error::ValidationError;
use crate::session::Session;

/// Documented paths with their page titles
pub const ROUTES: &[(&str, &str)] = &[
    ("/", "Property search"),
    ("/property/{id}", "Property details"),
    ("/admin", "Admin: pending listings"),
    ("/admin/pending", "Admin: pending listings"),
    ("/admin/expired", "Admin: expired listings"),
    ("/admin/sold", "Admin: sold listings"),
    ("/admin/listings", "Admin: all listings"),
    ("/admin/listing/{id}", "Admin: listing details"),
    ("/admin/notifications", "Admin: notifications"),
    ("/admin/users", "Admin: users"),
    ("/admin/kyc", "Admin: KYC queue"),
    ("/agent", "Agent: my listings"),
    ("/agent/listings", "Agent: my listings"),
    ("/agent/pending", "Agent: pending listings"),
    ("/agent/expired", "Agent: expired listings"),
    ("/agent/sold", "Agent: sold listings"),
    ("/agent/listing/{id}", "Agent: listing details"),
    ("/agent/notifications", "Agent: notifications"),
    ("/agent/profile", "Agent: profile"),
    ("/buyer/profile", "Buyer: profile"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Public,
    Admin,
    Agent,
    Buyer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    PublicListing(i64),
    AdminListings(ListingView),
    AdminListing(i64),
    AdminNotifications,
    AdminUsers,
    AdminKyc,
    AgentListings(ListingView),
    AgentListing(i64),
    AgentNotifications,
    AgentProfile,
    BuyerProfile,
    NotFound(String),
}

fn view_segment(segment: &str) -> Option<ListingView> {
    match segment {
        "pending" => Some(ListingView::Pending),
        "expired" => Some(ListingView::Expired),
        "sold" => Some(ListingView::Sold),
        "listings" => Some(ListingView::All),
        _ => None,
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn view_name(view: ListingView) -> &'static str {
    match view {
        ListingView::All => "listings",
        ListingView::Pending => "pending",
        ListingView::Expired => "expired",
        ListingView::Sold => "sold",
    }
}

impl Route {
    /// Resolve a path. Query strings and trailing slashes are ignored.
    pub fn parse(path: &str) -> Route {
        let clean = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Some(Route::Home),
            ["property", raw] => parse_id(raw).map(Route::PublicListing),
            ["admin"] => Some(Route::AdminListings(ListingView::Pending)),
            ["admin", "listing", raw] => parse_id(raw).map(Route::AdminListing),
            ["admin", "notifications"] => Some(Route::AdminNotifications),
            ["admin", "users"] => Some(Route::AdminUsers),
            ["admin", "kyc"] => Some(Route::AdminKyc),
            ["admin", view] => view_segment(view).map(Route::AdminListings),
            ["agent"] => Some(Route::AgentListings(ListingView::All)),
            ["agent", "listing", raw] => parse_id(raw).map(Route::AgentListing),
            ["agent", "notifications"] => Some(Route::AgentNotifications),
            ["agent", "profile"] => Some(Route::AgentProfile),
            ["agent", view] => view_segment(view).map(Route::AgentListings),
            ["buyer", "profile"] => Some(Route::BuyerProfile),
            _ => None,
        };
        route.unwrap_or_else(|| Route::NotFound(path.to_string()))
    }

    pub fn area(&self) -> Area {
        match self {
            Route::Home | Route::PublicListing(_) | Route::NotFound(_) => Area::Public,
            Route::AdminListings(_)
            | Route::AdminListing(_)
            | Route::AdminNotifications
            | Route::AdminUsers
            | Route::AdminKyc => Area::Admin,
            Route::AgentListings(_)
            | Route::AgentListing(_)
            | Route::AgentNotifications
            | Route::AgentProfile => Area::Agent,
            Route::BuyerProfile => Area::Buyer,
        }
    }

    /// Actor whose endpoints this page calls
    pub fn actor(&self, session: &Session) -> Result<Actor, ValidationError> {
        match self.area() {
            Area::Admin => Ok(Actor::Admin),
            Area::Agent => session.agent(),
            Area::Public | Area::Buyer => Ok(Actor::Buyer),
        }
    }

    pub fn title(&self) -> String {
        let path = self.path();
        ROUTES
            .iter()
            .find(|(pattern, _)| pattern_matches(pattern, &path))
            .map(|(_, title)| title.to_string())
            .unwrap_or_else(|| "Page not found".to_string())
    }

    /// Canonical path
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::PublicListing(id) => format!("/property/{id}"),
            Route::AdminListings(view) => format!("/admin/{}", view_name(*view)),
            Route::AdminListing(id) => format!("/admin/listing/{id}"),
            Route::AdminNotifications => "/admin/notifications".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminKyc => "/admin/kyc".to_string(),
            Route::AgentListings(view) => format!("/agent/{}", view_name(*view)),
            Route::AgentListing(id) => format!("/agent/listing/{id}"),
            Route::AgentNotifications => "/agent/notifications".to_string(),
            Route::AgentProfile => "/agent/profile".to_string(),
            Route::BuyerProfile => "/buyer/profile".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let path: Vec<&str> = path.split('/').collect();
    pattern.len() == path.len()
        && pattern
            .iter()
            .zip(&path)
            .all(|(p, s)| *p == "{id}" || p == s)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
