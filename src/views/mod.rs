pub mod detail;
pub mod list;
pub mod reject;

pub use detail::{FieldDisplay, ListingDetail};
pub use list::{ListingList, LoadRequest};
pub use reject::RejectDialog;
