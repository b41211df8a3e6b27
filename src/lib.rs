//! # Health ML - Health Risk Assessment
//!
//! This library scores a single individual's vital-sign record with a
//! Random Forest classifier and derives a structured assessment: risk
//! tier, recommendations, flagged risk factors, and a follow-up date.
//!
//! ## Modules
//!
//! - `data` - Health record input type and labeled training dataset
//! - `features` - Record vectorization and z-score scaling
//! - `models` - Decision tree / random forest classifiers and persistence
//! - `assessment` - The risk assessor and its advisory rules
//! - `error` - Typed error taxonomy

pub mod assessment;
pub mod data;
pub mod error;
pub mod features;
pub mod models;

pub use assessment::{AssessmentOutcome, RiskAssessmentResult, RiskAssessor, RiskLevel};
pub use data::{Dataset, HealthRecord};
pub use error::{AssessmentError, ErrorKind};
pub use models::{Classifier, ForestConfig, RandomForest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assessment::{
        AssessmentFailure, AssessmentOutcome, Recommendation, RiskAssessmentResult, RiskAssessor,
        RiskFactor, RiskLevel,
    };
    pub use crate::data::{Dataset, HealthRecord, Split};
    pub use crate::error::{AssessmentError, ErrorKind};
    pub use crate::features::StandardScaler;
    pub use crate::models::{Classifier, ForestConfig, ModelArtifact, RandomForest};
}
