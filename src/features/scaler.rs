//! Z-score feature scaling

use serde::{Deserialize, Serialize};

use crate::data::Dataset;

/// Per-column z-score scaler, fitted once at training time and persisted
/// alongside the forest.
///
/// An unfitted scaler passes vectors through unchanged, so a freshly
/// initialized placeholder model can still serve (meaningless) predictions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Create an unfitted scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether fit() has run.
    pub fn is_fitted(&self) -> bool {
        !self.means.is_empty()
    }

    /// Fit column means and standard deviations from training data.
    pub fn fit(&mut self, dataset: &Dataset) {
        let n_samples = dataset.n_samples();
        let n_features = dataset.n_features();

        if n_samples == 0 {
            return;
        }

        self.means = vec![0.0; n_features];
        self.stds = vec![0.0; n_features];

        for j in 0..n_features {
            let values: Vec<f64> = dataset.features.iter().map(|row| row[j]).collect();
            let mean = values.iter().sum::<f64>() / n_samples as f64;
            let variance =
                values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n_samples as f64;

            self.means[j] = mean;
            self.stds[j] = variance.sqrt();
        }
    }

    /// Scale one feature vector. Columns with near-zero spread pass through.
    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        if !self.is_fitted() {
            return features.to_vec();
        }

        features
            .iter()
            .enumerate()
            .map(|(j, &x)| {
                if self.stds[j] > 1e-10 {
                    (x - self.means[j]) / self.stds[j]
                } else {
                    x
                }
            })
            .collect()
    }

    /// Fit on a dataset and scale it in place.
    pub fn fit_transform(&mut self, dataset: &mut Dataset) {
        self.fit(dataset);
        for row in &mut dataset.features {
            *row = self.transform(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.add_sample(vec![20.0, 0.0, 20.0, 110.0, 70.0, 60.0, 36.5, 99.0], 0.0);
        dataset.add_sample(vec![40.0, 1.0, 25.0, 130.0, 85.0, 75.0, 36.9, 97.0], 0.0);
        dataset.add_sample(vec![60.0, 0.0, 30.0, 150.0, 100.0, 90.0, 37.3, 95.0], 1.0);
        dataset
    }

    #[test]
    fn test_unfitted_scaler_is_identity() {
        let scaler = StandardScaler::new();
        let raw = vec![52.0, 1.0, 28.1, 135.0, 85.0, 78.0, 36.8, 97.0];
        assert_eq!(scaler.transform(&raw), raw);
    }

    #[test]
    fn test_fitted_columns_are_centered() {
        let dataset = toy_dataset();
        let mut scaler = StandardScaler::new();
        scaler.fit(&dataset);

        assert!(scaler.is_fitted());

        // Age column: mean 40, values equidistant.
        let scaled_mid = scaler.transform(&dataset.features[1]);
        assert!(scaled_mid[0].abs() < 1e-12);

        let scaled_low = scaler.transform(&dataset.features[0]);
        let scaled_high = scaler.transform(&dataset.features[2]);
        assert!((scaled_low[0] + scaled_high[0]).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_passes_through() {
        let mut dataset = Dataset::new();
        dataset.add_sample(vec![30.0, 1.0, 22.0, 120.0, 80.0, 70.0, 36.6, 98.0], 0.0);
        dataset.add_sample(vec![50.0, 1.0, 26.0, 140.0, 90.0, 80.0, 36.6, 96.0], 1.0);

        let mut scaler = StandardScaler::new();
        scaler.fit(&dataset);

        // gender column is constant 1.0, spread is zero
        assert_eq!(scaler.transform(&dataset.features[0])[1], 1.0);
    }

    #[test]
    fn test_fit_transform_scales_in_place() {
        let mut dataset = toy_dataset();
        let mut scaler = StandardScaler::new();
        scaler.fit_transform(&mut dataset);

        let age_sum: f64 = dataset.features.iter().map(|row| row[0]).sum();
        assert!(age_sum.abs() < 1e-12);
    }
}
