//! Feature engineering module
//!
//! Turns health records into the fixed-order numeric vector the classifier
//! consumes, and provides the z-score scaler fitted at training time.

mod scaler;
mod vector;

pub use scaler::StandardScaler;
pub use vector::{vectorize_raw, FEATURE_NAMES, REQUIRED_FIELDS};
