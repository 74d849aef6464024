pub mod center;
pub mod counter;
pub mod poller;

pub use center::{NotificationCenter, Opened};
pub use counter::UnreadCounter;
pub use poller::UnreadPoller;
