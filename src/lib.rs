//! Typed client for the property marketplace backend.
//!
//! Wraps the listing, notification, user and location endpoints and carries
//! the list, detail and notification controllers the dashboards are built on.

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod notifications;
pub mod pagination;
pub mod routes;
pub mod session;
pub mod views;

pub use config::Config;
pub use error::{ApiError, ValidationError};
pub use filters::Filters;
