//! Risk assessment module
//!
//! Validates a health record, obtains a probability from the classifier,
//! and derives the structured advisory result.

mod assessor;
mod report;
mod rules;

pub use assessor::{RiskAssessor, MODEL_VERSION};
pub use report::{
    AssessmentFailure, AssessmentOutcome, Category, FactorLevel, ModelMetadata, Priority,
    Recommendation, RiskAssessmentResult, RiskFactor, RiskLevel,
};
pub use rules::{next_checkup, recommendations, risk_factors};
