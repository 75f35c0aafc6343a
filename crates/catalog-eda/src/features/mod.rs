//! Derived features.
//!
//! - Duration split into numeric minutes (movies) and seasons (TV shows)
//! - Recency flag from the release year
//! - Country mention ranking (read-only, used by reporting)

mod countries;
mod duration;
mod recency;

pub use countries::{split_countries, top_countries};
pub use duration::{derive_duration_features, parse_minutes, parse_seasons};
pub use recency::derive_recency_flag;
