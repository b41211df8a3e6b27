//! Machine learning models module
//!
//! Provides the decision tree and random forest classifiers plus the
//! persisted model artifact.

mod decision_tree;
mod random_forest;
mod store;

pub use decision_tree::{DecisionTree, TreeConfig, TreeNode};
pub use random_forest::{ForestConfig, RandomForest};
pub use store::{ModelArtifact, MODEL_FILE_NAME};

/// Probability-producing classifier capability.
///
/// The assessor only ever asks for per-class probabilities, so tests can
/// substitute a stub returning a fixed pair.
pub trait Classifier {
    /// Two-class probabilities `[p_low, p_high]`, summing to 1.
    fn predict_proba(&self, features: &[f64]) -> [f64; 2];

    /// Human-readable model type name for result metadata.
    fn model_type(&self) -> &'static str;
}
