//! Binary classification decision tree

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::data::Dataset;

/// Decision tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of tree
    pub max_depth: usize,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf node
    pub min_samples_leaf: usize,
    /// Maximum features to consider per split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

/// Tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index for split
    pub feature_idx: Option<usize>,
    /// Threshold for split
    pub threshold: Option<f64>,
    /// Class probabilities `[p_low, p_high]` at this node
    pub class_probs: [f64; 2],
    /// Number of samples in this node
    pub n_samples: usize,
    /// Left child (feature <= threshold)
    pub left: Option<Box<TreeNode>>,
    /// Right child
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(class_probs: [f64; 2], n_samples: usize) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            class_probs,
            n_samples,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn depth(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            1 + self
                .left
                .as_ref()
                .map(|n| n.depth())
                .unwrap_or(0)
                .max(self.right.as_ref().map(|n| n.depth()).unwrap_or(0))
        }
    }
}

/// Decision tree classifier for binary risk labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
}

impl DecisionTree {
    /// Create a new decision tree with config
    pub fn new(config: TreeConfig) -> Self {
        Self { config, root: None }
    }

    /// Whether fit() has produced a tree.
    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Train the tree on labeled data.
    pub fn fit(&mut self, dataset: &Dataset) {
        let indices: Vec<usize> = (0..dataset.n_samples()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        self.root = Some(self.build_tree(dataset, &indices, 0, &mut rng));
    }

    fn build_tree(
        &self,
        dataset: &Dataset,
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n = indices.len();
        let labels: Vec<f64> = indices.iter().map(|&i| dataset.labels[i]).collect();
        let impurity = gini(&labels);

        if depth >= self.config.max_depth || n < self.config.min_samples_split || impurity < 1e-10
        {
            return TreeNode::leaf(class_probabilities(&labels), n);
        }

        match self.find_best_split(dataset, indices, impurity, rng) {
            Some((feature_idx, threshold, left_indices, right_indices)) => {
                if left_indices.len() < self.config.min_samples_leaf
                    || right_indices.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(class_probabilities(&labels), n);
                }

                let left = self.build_tree(dataset, &left_indices, depth + 1, rng);
                let right = self.build_tree(dataset, &right_indices, depth + 1, rng);

                TreeNode {
                    feature_idx: Some(feature_idx),
                    threshold: Some(threshold),
                    class_probs: class_probabilities(&labels),
                    n_samples: n,
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => TreeNode::leaf(class_probabilities(&labels), n),
        }
    }

    /// Find the Gini-optimal split over a random feature subset.
    fn find_best_split(
        &self,
        dataset: &Dataset,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let n_features = dataset.n_features();
        let max_features = self.config.max_features.unwrap_or(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let mut best_gain = 0.0;
        let mut best_split: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| dataset.features[i][feature_idx])
                .collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            values.dedup();

            // Try midpoints as thresholds
            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| dataset.features[i][feature_idx] <= threshold);

                if left_idx.is_empty() || right_idx.is_empty() {
                    continue;
                }

                let left_labels: Vec<f64> = left_idx.iter().map(|&i| dataset.labels[i]).collect();
                let right_labels: Vec<f64> =
                    right_idx.iter().map(|&i| dataset.labels[i]).collect();

                let n_left = left_idx.len() as f64;
                let n_right = right_idx.len() as f64;
                let weighted_impurity = (n_left * gini(&left_labels)
                    + n_right * gini(&right_labels))
                    / (n_left + n_right);

                let gain = parent_impurity - weighted_impurity;
                if gain > best_gain {
                    best_gain = gain;
                    best_split = Some((feature_idx, threshold, left_idx, right_idx));
                }
            }
        }

        best_split
    }

    /// Class probabilities `[p_low, p_high]` for one sample.
    pub fn predict_proba_one(&self, features: &[f64]) -> [f64; 2] {
        match &self.root {
            Some(node) => traverse(node, features),
            None => [0.5, 0.5],
        }
    }

    /// Hard class prediction for one sample (1.0 = high risk).
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        if self.predict_proba_one(features)[1] > 0.5 {
            1.0
        } else {
            0.0
        }
    }
}

fn traverse(node: &TreeNode, features: &[f64]) -> [f64; 2] {
    if node.is_leaf() {
        return node.class_probs;
    }

    let feature_idx = node.feature_idx.expect("split node has feature index");
    let threshold = node.threshold.expect("split node has threshold");

    if features[feature_idx] <= threshold {
        traverse(node.left.as_ref().expect("split node has left child"), features)
    } else {
        traverse(
            node.right.as_ref().expect("split node has right child"),
            features,
        )
    }
}

fn gini(labels: &[f64]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }

    let n = labels.len() as f64;
    let n_positive = labels.iter().filter(|&&v| v > 0.0).count() as f64;
    let p = n_positive / n;

    2.0 * p * (1.0 - p)
}

fn class_probabilities(labels: &[f64]) -> [f64; 2] {
    if labels.is_empty() {
        return [0.5, 0.5];
    }

    let n = labels.len() as f64;
    let n_positive = labels.iter().filter(|&&v| v > 0.0).count() as f64;

    [1.0 - n_positive / n, n_positive / n]
}
