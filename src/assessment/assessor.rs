//! Risk assessor

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use tracing::{debug, warn};

use super::report::{
    AssessmentFailure, AssessmentOutcome, ModelMetadata, RiskAssessmentResult, RiskLevel,
};
use super::rules;
use crate::data::{Dataset, HealthRecord};
use crate::error::AssessmentError;
use crate::features::{vectorize_raw, StandardScaler};
use crate::models::{Classifier, ForestConfig, ModelArtifact, RandomForest};

/// Version string attached to every assessment.
pub const MODEL_VERSION: &str = "1.0.0";

/// Scores one health record at a time against a fitted classifier.
///
/// Construction is explicit: the classifier, scaler, and version are
/// injected once and read-only afterwards, so a shared assessor can serve
/// concurrent `assess` calls.
pub struct RiskAssessor<C: Classifier = RandomForest> {
    classifier: C,
    scaler: StandardScaler,
    model_version: String,
}

impl RiskAssessor<RandomForest> {
    /// Load the persisted model from `model_dir`, falling back to a fresh
    /// untrained placeholder (persisted in its place) when the artifact is
    /// missing or unreadable.
    pub fn initialize(model_dir: &Path, config: ForestConfig) -> Result<Self> {
        let artifact = ModelArtifact::load_or_init(model_dir, config, MODEL_VERSION)?;
        Ok(Self::from_artifact(artifact))
    }

    /// Build an assessor around an already loaded artifact.
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self {
            classifier: artifact.forest,
            scaler: artifact.scaler,
            model_version: artifact.version,
        }
    }
}

impl<C: Classifier> RiskAssessor<C> {
    /// Build an assessor from parts. Intended for tests injecting a stub
    /// classifier.
    pub fn with_classifier(classifier: C, scaler: StandardScaler, model_version: &str) -> Self {
        Self {
            classifier,
            scaler,
            model_version: model_version.to_string(),
        }
    }

    /// Check required fields and encode the record as a scaled feature
    /// vector. The record itself is left untouched.
    pub fn validate_and_vectorize(
        &self,
        record: &HealthRecord,
    ) -> Result<Vec<f64>, AssessmentError> {
        let raw = vectorize_raw(record)?;
        Ok(self.scaler.transform(&raw))
    }

    /// Score one record.
    ///
    /// Never returns an error: validation and scoring failures come back as
    /// a tagged [`AssessmentFailure`] value.
    pub fn assess(&self, record: &HealthRecord) -> AssessmentOutcome {
        match self.try_assess(record) {
            Ok(result) => AssessmentOutcome::Completed(Box::new(result)),
            Err(err) => {
                warn!(error = %err, "assessment failed");
                AssessmentOutcome::Failed(AssessmentFailure::new(err.to_string(), err.kind()))
            }
        }
    }

    fn try_assess(&self, record: &HealthRecord) -> Result<RiskAssessmentResult, AssessmentError> {
        let features = self.validate_and_vectorize(record)?;

        let probs = self.classifier.predict_proba(&features);
        let risk_score = probs[1];
        let confidence_score = probs[0].max(probs[1]);
        let risk_level = RiskLevel::from_score(risk_score);

        debug!(risk_score, ?risk_level, "classifier prediction");

        let recommendations = rules::recommendations(record, risk_score)?;
        let risk_factors = rules::risk_factors(record)?;

        let now = Utc::now();
        let next_checkup_date = rules::next_checkup(risk_score, now).to_rfc3339();

        Ok(RiskAssessmentResult {
            prediction_type: "health_risk".to_string(),
            risk_score,
            risk_level,
            confidence_score,
            input_parameters: record.clone(),
            model_version: self.model_version.clone(),
            recommendations,
            risk_factors,
            next_checkup_date,
            ai_model_metadata: ModelMetadata {
                model_type: self.classifier.model_type().to_string(),
                features_used: record.keys(),
                timestamp: now,
            },
        })
    }

    /// Retrain the classifier with new data.
    ///
    /// Contract only. Merging with existing training data and atomically
    /// swapping the persisted artifact are not designed yet, so the call is
    /// accepted and ignored.
    pub fn update_model(&mut self, new_training_data: &Dataset) -> Result<()> {
        warn!(
            n_samples = new_training_data.n_samples(),
            "update_model is a placeholder; training data ignored"
        );
        Ok(())
    }

    /// Version string reported in results.
    pub fn model_version(&self) -> &str {
        &self.model_version
    }
}
