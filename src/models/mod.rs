pub mod query;
pub mod review;

pub use query::{ReviewQuery, SortOrder};
pub use review::{format_local_iso, Review, ReviewPage, REVIEW_FIELDS};
