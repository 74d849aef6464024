pub mod notification;
pub mod page;
pub mod property;
pub mod timestamp;
pub mod user;

pub use notification::{NotificationDetails, Role};
pub use page::{GroupedResponse, ListingPage, ListingPayload, PageResponse};
pub use property::{ApprovalStatus, ListingStatus, Media, Owner, PropertyResponse};
pub use user::{AgentResponse, KycStatus, ProfileUpdate, SellerResponse, UserResponse};
