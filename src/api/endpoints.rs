//! Backend paths per actor and the permission table behind them.

use std::fmt;

use reqwest::Url;
use serde_json::{json, Value};

use crate::error::ValidationError;

/// Who is calling, and for agents on whose behalf
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Actor {
    Admin,
    Agent(String),
    Buyer,
}

impl Actor {
    pub fn name(&self) -> &'static str {
        match self {
            Actor::Admin => "admin",
            Actor::Agent(_) => "agent",
            Actor::Buyer => "buyer",
        }
    }

    fn not_permitted(&self, operation: &'static str) -> ValidationError {
        ValidationError::NotPermitted {
            actor: self.name(),
            operation,
        }
    }
}

/// Which listing page is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingView {
    All,
    Pending,
    Expired,
    Sold,
}

impl ListingView {
    pub fn label(&self) -> &'static str {
        match self {
            ListingView::All => "All listings",
            ListingView::Pending => "Pending listings",
            ListingView::Expired => "Expired listings",
            ListingView::Sold => "Sold listings",
        }
    }
}

/// A list endpoint: actor plus view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingScope {
    actor: Actor,
    view: ListingView,
}

impl ListingScope {
    /// Buyers only get the public search
    pub fn new(actor: Actor, view: ListingView) -> Result<Self, ValidationError> {
        if actor == Actor::Buyer && view != ListingView::All {
            return Err(actor.not_permitted(view.label()));
        }
        Ok(Self { actor, view })
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn view(&self) -> ListingView {
        self.view
    }

    pub fn path(&self) -> String {
        match (&self.actor, self.view) {
            (Actor::Admin, ListingView::All) => "/admin/filterProperties".to_string(),
            (Actor::Admin, ListingView::Pending) => "/admin/filterPendingProperties".to_string(),
            (Actor::Admin, ListingView::Expired) => "/admin/expiredProperties".to_string(),
            (Actor::Admin, ListingView::Sold) => "/admin/soldProperties".to_string(),
            (Actor::Agent(id), ListingView::All) => format!("/agent/filterProperties/{}", segment(id)),
            (Actor::Agent(id), ListingView::Pending) => format!("/agent/pendingProperties/{}", segment(id)),
            (Actor::Agent(id), ListingView::Expired) => format!("/agent/expiredProperties/{}", segment(id)),
            (Actor::Agent(id), ListingView::Sold) => format!("/agent/soldProperties/{}", segment(id)),
            (Actor::Buyer, _) => "/public/filterProperties".to_string(),
        }
    }

    /// Whether the endpoint takes filter parameters. The others return
    /// everything and are filtered locally.
    pub fn accepts_filters(&self) -> bool {
        match (&self.actor, self.view) {
            (_, ListingView::All) => true,
            (Actor::Admin, ListingView::Pending) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ListingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.view.label(), self.actor.name())
    }
}

/// Percent-encode an id so it stays a single path segment
pub(crate) fn segment(raw: &str) -> String {
    // URL parsing collapses `%2E` segments like literal dots, so escape the escape
    match raw {
        "." => return "%252E".to_string(),
        ".." => return "%252E%252E".to_string(),
        _ => {}
    }
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return String::new();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        // a literal '%' would otherwise pass through as an escape
        segments.push(&raw.replace('%', "%25"));
    }
    url.path().trim_start_matches('/').to_string()
}

pub fn detail_path(actor: &Actor, id: i64) -> String {
    match actor {
        Actor::Admin => format!("/admin/property/{id}"),
        Actor::Agent(agent) => format!("/agent/property/{}/{id}", segment(agent)),
        Actor::Buyer => format!("/public/property/{id}"),
    }
}

/// Base path of the notification endpoints
pub fn notifications_base(actor: &Actor) -> Result<String, ValidationError> {
    match actor {
        Actor::Admin => Ok("/admin/notifications".to_string()),
        Actor::Agent(agent) => Ok(format!("/agent/notifications/{}", segment(agent))),
        Actor::Buyer => Err(actor.not_permitted("notifications")),
    }
}

/// Non-blank reason attached to a rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionReason(String);

impl RejectionReason {
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyReason);
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// State-changing operation on a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    Approve,
    Reject(RejectionReason),
    ToggleVip,
    ToggleRera,
    MarkSold,
    Renew,
}

impl ListingAction {
    pub fn name(&self) -> &'static str {
        match self {
            ListingAction::Approve => "approve",
            ListingAction::Reject(_) => "reject",
            ListingAction::ToggleVip => "toggle VIP",
            ListingAction::ToggleRera => "toggle RERA",
            ListingAction::MarkSold => "mark sold",
            ListingAction::Renew => "renew",
        }
    }

    /// PATCH path for this action, if the actor may perform it
    pub fn path(&self, actor: &Actor, id: i64) -> Result<String, ValidationError> {
        match (actor, self) {
            (Actor::Admin, ListingAction::Approve) => Ok(format!("/admin/approveProperty/{id}")),
            (Actor::Admin, ListingAction::Reject(_)) => Ok(format!("/admin/rejectProperty/{id}")),
            (Actor::Admin, ListingAction::ToggleVip) => Ok(format!("/admin/toggleVip/{id}")),
            (Actor::Admin, ListingAction::ToggleRera) => Ok(format!("/admin/toggleRera/{id}")),
            (Actor::Admin, ListingAction::MarkSold) => Ok(format!("/admin/markSold/{id}")),
            (Actor::Admin, ListingAction::Renew) => Ok(format!("/admin/renewProperty/{id}")),
            (Actor::Agent(agent), ListingAction::MarkSold) => {
                Ok(format!("/agent/markSold/{}/{id}", segment(agent)))
            }
            (Actor::Agent(agent), ListingAction::Renew) => {
                Ok(format!("/agent/renewProperty/{}/{id}", segment(agent)))
            }
            _ => Err(actor.not_permitted(self.name())),
        }
    }

    pub fn body(&self) -> Option<Value> {
        match self {
            ListingAction::Reject(reason) => Some(json!({ "reason": reason.as_str() })),
            _ => None,
        }
    }
}
