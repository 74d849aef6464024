pub mod query;
pub mod types;

pub use query::QueryParams;
pub use types::{
    parse_bound, Availability, Category, Filters, Furnishing, Preference, AGE_RANGES, AMENITIES,
    COMMERCIAL_TYPES, RESIDENTIAL_TYPES,
};
