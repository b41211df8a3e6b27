//! Random forest classifier

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::decision_tree::{DecisionTree, TreeConfig};
use super::Classifier;
use crate::data::Dataset;

/// Random forest configuration.
///
/// Defaults mirror the service's placeholder model: 100 trees, fixed seed
/// for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Max features per split (sqrt of total if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Random forest over binary risk labels.
///
/// An untrained forest (no trees) predicts `[0.5, 0.5]` for every sample;
/// the service treats that as a documented placeholder until a real model
/// is trained externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Create a new, untrained forest.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    /// Number of fitted trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Whether fit() has run.
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Configured settings.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Train the forest on labeled data, one bootstrap sample per tree.
    pub fn fit(&mut self, dataset: &Dataset) {
        let n_features = dataset.n_features();
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize);

        let trees: Vec<DecisionTree> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_config = TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: self.config.seed.wrapping_add(i as u64),
                };

                let mut tree = DecisionTree::new(tree_config);

                if self.config.bootstrap {
                    let sample = dataset.bootstrap_sample(self.config.seed + i as u64);
                    tree.fit(&sample);
                } else {
                    tree.fit(dataset);
                }

                tree
            })
            .collect();

        self.trees = trees;
    }

    /// Hard class prediction for one sample (1.0 = high risk).
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        if self.predict_proba_one(features)[1] > 0.5 {
            1.0
        } else {
            0.0
        }
    }

    /// Averaged class probabilities over all trees.
    pub fn predict_proba_one(&self, features: &[f64]) -> [f64; 2] {
        if self.trees.is_empty() {
            return [0.5, 0.5];
        }

        let n = self.trees.len() as f64;
        let p_high: f64 = self
            .trees
            .iter()
            .map(|t| t.predict_proba_one(features)[1])
            .sum::<f64>()
            / n;

        [1.0 - p_high, p_high]
    }

    /// Hard predictions for every sample in a dataset.
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        dataset
            .features
            .par_iter()
            .map(|f| self.predict_one(f))
            .collect()
    }

    /// Classification accuracy against labeled data.
    pub fn accuracy(&self, dataset: &Dataset) -> f64 {
        if dataset.n_samples() == 0 {
            return 0.0;
        }

        let predictions = self.predict(dataset);
        let correct = predictions
            .iter()
            .zip(dataset.labels.iter())
            .filter(|(&pred, &label)| pred == if label > 0.0 { 1.0 } else { 0.0 })
            .count();

        correct as f64 / dataset.n_samples() as f64
    }
}

impl Classifier for RandomForest {
    fn predict_proba(&self, features: &[f64]) -> [f64; 2] {
        self.predict_proba_one(features)
    }

    fn model_type(&self) -> &'static str {
        "RandomForestClassifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_dataset() -> Dataset {
        let mut dataset = Dataset::new();
        for i in 0..200 {
            let spo2 = 88.0 + (i % 12) as f64;
            let label = if spo2 < 94.0 { 1.0 } else { 0.0 };
            dataset.add_sample(
                vec![40.0, (i % 2) as f64, 23.0, 118.0, 78.0, 72.0, 36.7, spo2],
                label,
            );
        }
        dataset
    }

    #[test]
    fn test_untrained_forest_is_uninformative() {
        let forest = RandomForest::new(ForestConfig::default());
        assert!(!forest.is_fitted());
        assert_eq!(
            forest.predict_proba_one(&[40.0, 1.0, 23.0, 118.0, 78.0, 72.0, 36.7, 97.0]),
            [0.5, 0.5]
        );
    }

    #[test]
    fn test_forest_classification() {
        let dataset = separable_dataset();
        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 20,
            max_depth: 5,
            ..Default::default()
        });

        forest.fit(&dataset);

        assert_eq!(forest.n_trees(), 20);
        assert!(forest.accuracy(&dataset) > 0.9);
    }

    #[test]
    fn test_forest_probabilities_sum_to_one() {
        let dataset = separable_dataset();
        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 10,
            ..Default::default()
        });
        forest.fit(&dataset);

        let probs = forest.predict_proba_one(&[40.0, 0.0, 23.0, 118.0, 78.0, 72.0, 36.7, 90.0]);
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);
        assert!(probs[1] > 0.5);
    }

    #[test]
    fn test_fit_is_deterministic_for_fixed_seed() {
        let dataset = separable_dataset();
        let features = [40.0, 1.0, 23.0, 118.0, 78.0, 72.0, 36.7, 91.0];

        let mut a = RandomForest::new(ForestConfig {
            n_trees: 10,
            ..Default::default()
        });
        let mut b = RandomForest::new(ForestConfig {
            n_trees: 10,
            ..Default::default()
        });
        a.fit(&dataset);
        b.fit(&dataset);

        assert_eq!(a.predict_proba_one(&features), b.predict_proba_one(&features));
    }
}
