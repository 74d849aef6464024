pub mod client;
pub mod endpoints;
pub mod listings;
pub mod locations;
pub mod notifications;
pub mod traits;
pub mod users;

pub use client::HttpClient;
pub use endpoints::{Actor, ListingAction, ListingScope, ListingView, RejectionReason};
pub use listings::ListingsApi;
pub use locations::{CityEntry, LocationClient, StateEntry};
pub use notifications::NotificationsApi;
pub use traits::{ListingBackend, NotificationBackend};
pub use users::UsersApi;
