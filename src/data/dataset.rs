//! Labeled dataset for classifier training

use anyhow::{ensure, Context, Result};
use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::data::HealthRecord;
use crate::features::{vectorize_raw, FEATURE_NAMES};

/// Labeled training data: one row of vital-sign features per individual,
/// with a binary high-risk label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature matrix (n_samples x n_features)
    pub features: Vec<Vec<f64>>,
    /// Binary risk labels (1.0 = high risk)
    pub labels: Vec<f64>,
    /// Feature names, fixed vector order
    pub feature_names: Vec<String>,
}

/// Train/test split result
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

impl Dataset {
    /// Create an empty dataset over the canonical vital-sign features.
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
            labels: Vec::new(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// Number of features
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Add one pre-vectorized sample.
    pub fn add_sample(&mut self, features: Vec<f64>, label: f64) {
        assert_eq!(features.len(), self.feature_names.len());
        self.features.push(features);
        self.labels.push(label);
    }

    /// Add a health record with a known outcome label.
    pub fn add_record(&mut self, record: &HealthRecord, high_risk: bool) -> Result<()> {
        let row = vectorize_raw(record)?;
        self.add_sample(row, if high_risk { 1.0 } else { 0.0 });
        Ok(())
    }

    /// Feature matrix as ndarray
    pub fn features_array(&self) -> Array2<f64> {
        let n_samples = self.n_samples();
        let n_features = self.n_features();

        if n_samples == 0 {
            return Array2::zeros((0, n_features));
        }

        Array2::from_shape_fn((n_samples, n_features), |(i, j)| self.features[i][j])
    }

    /// Labels as ndarray
    pub fn labels_array(&self) -> Array1<f64> {
        Array1::from_vec(self.labels.clone())
    }

    /// Shuffled split into train and test sets.
    pub fn random_split(&self, test_ratio: f64, seed: u64) -> Split {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let test_size = (test_ratio * n as f64) as usize;
        let (test_indices, train_indices) = indices.split_at(test_size);

        Split {
            train: self.subset(train_indices),
            test: self.subset(test_indices),
        }
    }

    /// Create a subset of the dataset by indices
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Bootstrap sample (random sample with replacement)
    pub fn bootstrap_sample(&self, seed: u64) -> Dataset {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();

        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        self.subset(&indices)
    }

    /// Save dataset to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, self).context("Failed to serialize dataset")?;
        Ok(())
    }

    /// Load dataset from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let reader = BufReader::new(file);
        let dataset = serde_json::from_reader(reader).context("Failed to deserialize dataset")?;
        Ok(dataset)
    }

    /// Load labeled training data from CSV.
    ///
    /// Expects one column per canonical feature name plus a trailing
    /// `risk_label` column with 0/1 values.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        let n_features = FEATURE_NAMES.len();
        ensure!(
            headers.len() == n_features + 1,
            "expected {} feature columns plus risk_label, got {} columns",
            n_features,
            headers.len()
        );

        let mut dataset = Dataset::new();
        for result in reader.records() {
            let row = result?;
            let features: Vec<f64> = row
                .iter()
                .take(n_features)
                .map(|s| s.parse::<f64>().context("non-numeric feature value"))
                .collect::<Result<_>>()?;
            let label: f64 = row
                .get(n_features)
                .context("missing risk_label column")?
                .parse()
                .context("non-numeric risk_label")?;

            dataset.add_sample(features, label);
        }

        Ok(dataset)
    }

    /// Save to CSV, feature columns followed by `risk_label`.
    pub fn save_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = self.feature_names.clone();
        header.push("risk_label".to_string());
        writer.write_record(&header)?;

        for i in 0..self.n_samples() {
            let mut row: Vec<String> = self.features[i].iter().map(|v| v.to_string()).collect();
            row.push(self.labels[i].to_string());
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(age: f64, spo2: f64) -> Vec<f64> {
        vec![age, 1.0, 24.0, 120.0, 80.0, 70.0, 36.6, spo2]
    }

    #[test]
    fn test_dataset_operations() {
        let mut dataset = Dataset::new();
        dataset.add_sample(sample_row(30.0, 99.0), 0.0);
        dataset.add_sample(sample_row(55.0, 93.0), 1.0);
        dataset.add_sample(sample_row(70.0, 91.0), 1.0);

        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 8);

        let split = dataset.random_split(0.33, 7);
        assert_eq!(split.train.n_samples(), 2);
        assert_eq!(split.test.n_samples(), 1);
    }

    #[test]
    fn test_add_record() {
        let mut record = HealthRecord::new();
        record.set_number("age", 45.0);
        record.set_string("gender", "female");
        record.set_number("bmi", 23.5);
        record.set_number("blood_pressure_systolic", 118.0);
        record.set_number("blood_pressure_diastolic", 76.0);
        record.set_number("heart_rate", 64.0);
        record.set_number("temperature", 36.5);
        record.set_number("oxygen_saturation", 99.0);

        let mut dataset = Dataset::new();
        dataset.add_record(&record, false).unwrap();

        assert_eq!(dataset.n_samples(), 1);
        assert_eq!(dataset.features[0][1], 0.0);
        assert_eq!(dataset.labels[0], 0.0);
    }

    #[test]
    fn test_csv_round_trip() {
        let mut dataset = Dataset::new();
        dataset.add_sample(sample_row(30.0, 99.0), 0.0);
        dataset.add_sample(sample_row(55.0, 93.0), 1.0);

        let path = std::env::temp_dir()
            .join(format!("health_ml_dataset_{}.csv", std::process::id()));
        dataset.save_csv(&path).unwrap();
        let loaded = Dataset::load_csv(&path).unwrap();

        assert_eq!(loaded.features, dataset.features);
        assert_eq!(loaded.labels, dataset.labels);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_ndarray_views() {
        let mut dataset = Dataset::new();
        dataset.add_sample(sample_row(30.0, 99.0), 0.0);
        dataset.add_sample(sample_row(55.0, 93.0), 1.0);

        let features = dataset.features_array();
        assert_eq!(features.shape(), &[2, 8]);
        assert_eq!(features[[1, 0]], 55.0);
        assert_eq!(dataset.labels_array().to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_bootstrap_sample_size() {
        let mut dataset = Dataset::new();
        for i in 0..10 {
            dataset.add_sample(sample_row(20.0 + i as f64, 98.0), 0.0);
        }

        let boot = dataset.bootstrap_sample(42);
        assert_eq!(boot.n_samples(), 10);
    }
}
