//! Assessment result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::HealthRecord;
use crate::error::ErrorKind;

/// Risk tier derived from the classifier probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Tier thresholds: below 0.3 is LOW, below 0.7 is MODERATE, the rest
    /// is HIGH. Both boundary values land in the upper tier.
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score < 0.3 {
            RiskLevel::Low
        } else if risk_score < 0.7 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

/// Recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lifestyle,
    Medical,
    Urgent,
}

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Medium,
    High,
}

/// One actionable recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub action: String,
    pub priority: Priority,
}

/// Direction in which a flagged vital deviates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorLevel {
    Low,
    High,
}

/// One flagged risk factor, with the offending value echoed back.
///
/// `value` is numeric for single-reading factors and a "systolic/diastolic"
/// string for blood pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub level: FactorLevel,
    pub value: Value,
}

/// Classifier metadata attached to every result.
///
/// `features_used` lists the keys of the input record as supplied, not the
/// columns of the feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_type: String,
    pub features_used: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Full structured assessment for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    pub prediction_type: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence_score: f64,
    pub input_parameters: HealthRecord,
    pub model_version: String,
    pub recommendations: Vec<Recommendation>,
    pub risk_factors: Vec<RiskFactor>,
    pub next_checkup_date: String,
    pub ai_model_metadata: ModelMetadata,
}

/// Failure value returned instead of an error: `{error, kind, status}` with
/// `status` always `"failed"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentFailure {
    pub error: String,
    pub kind: ErrorKind,
    pub status: String,
}

impl AssessmentFailure {
    pub fn new(error: String, kind: ErrorKind) -> Self {
        Self {
            error,
            kind,
            status: "failed".to_string(),
        }
    }
}

/// What `assess()` hands back: a result or a tagged failure, never an `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssessmentOutcome {
    Completed(Box<RiskAssessmentResult>),
    Failed(AssessmentFailure),
}

impl AssessmentOutcome {
    /// The result, if the assessment completed.
    pub fn result(&self) -> Option<&RiskAssessmentResult> {
        match self {
            AssessmentOutcome::Completed(result) => Some(result),
            AssessmentOutcome::Failed(_) => None,
        }
    }

    /// The failure, if the assessment did not complete.
    pub fn failure(&self) -> Option<&AssessmentFailure> {
        match self {
            AssessmentOutcome::Completed(_) => None,
            AssessmentOutcome::Failed(failure) => Some(failure),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AssessmentOutcome::Failed(_))
    }
}
