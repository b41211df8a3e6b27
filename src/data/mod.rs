//! Data structures module
//!
//! Provides the health record input type and the labeled dataset used
//! for classifier training.

mod dataset;
mod record;

pub use dataset::{Dataset, Split};
pub use record::HealthRecord;
