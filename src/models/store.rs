//! Model artifact persistence

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::random_forest::{ForestConfig, RandomForest};
use crate::features::StandardScaler;

/// File name of the persisted model under the models directory.
pub const MODEL_FILE_NAME: &str = "health_risk_model.json";

/// Everything the assessor needs at inference time, persisted as one JSON
/// blob: the fitted forest, the fitted scaler, and the model version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub forest: RandomForest,
    pub scaler: StandardScaler,
    pub version: String,
}

impl ModelArtifact {
    /// Fresh placeholder artifact: configured but untrained forest, unfitted
    /// scaler. Predictions are uninformative until trained.
    pub fn untrained(config: ForestConfig, version: &str) -> Self {
        Self {
            forest: RandomForest::new(config),
            scaler: StandardScaler::new(),
            version: version.to_string(),
        }
    }

    /// Path of the artifact file inside a models directory.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MODEL_FILE_NAME)
    }

    /// Serialize to JSON, creating the parent directory if absent.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, self).context("Failed to serialize model artifact")?;

        info!(path = %path.display(), version = %self.version, "persisted model artifact");
        Ok(())
    }

    /// Load a previously persisted artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let reader = BufReader::new(file);
        let artifact: ModelArtifact =
            serde_json::from_reader(reader).context("Failed to deserialize model artifact")?;

        info!(path = %path.display(), version = %artifact.version, "loaded model artifact");
        Ok(artifact)
    }

    /// Load the artifact from a models directory, or fall back to a fresh
    /// untrained placeholder and persist it.
    ///
    /// A missing or corrupt file is recovered locally and never surfaced;
    /// only a failure to write the fresh artifact is an error.
    pub fn load_or_init(dir: &Path, config: ForestConfig, version: &str) -> Result<Self> {
        let path = Self::path_in(dir);

        match Self::load(&path) {
            Ok(artifact) => Ok(artifact),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "model artifact unavailable, initializing untrained placeholder"
                );
                let artifact = Self::untrained(config, version);
                artifact.save(&path)?;
                Ok(artifact)
            }
        }
    }
}
