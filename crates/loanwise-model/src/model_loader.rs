//! Model loading from a local artifact file

use crate::artifact::ModelArtifact;
use crate::classifier::{Classifier, EstimatorKind};
use loanwise_core::{Error, FeatureLayout, FeatureRow, ModelInfo, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the model artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/bank_loan_model.json";

/// Configuration for loading a model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the artifact file
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Serialization format of the artifact
    #[serde(default)]
    pub format: ModelFormat,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

/// Model file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Pick from the file extension, falling back to JSON
    #[default]
    Auto,
    Json,
    Yaml,
}

impl ModelFormat {
    /// Resolve `Auto` against a path
    pub fn resolve(self, path: &Path) -> ModelFormat {
        match self {
            Self::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                    Self::Yaml
                }
                _ => Self::Json,
            },
            other => other,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            format: ModelFormat::Auto,
        }
    }
}

impl ModelConfig {
    /// Create a new model configuration from a local path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set model format
    pub fn with_format(mut self, format: ModelFormat) -> Self {
        self.format = format;
        self
    }
}

/// A validated model artifact, ready for prediction
#[derive(Debug)]
pub struct LoadedModel {
    artifact: ModelArtifact,
    layout: FeatureLayout,
    info: ModelInfo,
}

impl LoadedModel {
    /// Load a model from configuration.
    ///
    /// A missing file yields [`Error::ModelNotFound`]; anything else that
    /// keeps the file from becoming a usable classifier yields
    /// [`Error::ModelLoad`].
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let path = &config.path;
        if !path.is_file() {
            return Err(Error::model_not_found(path));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| Error::model_load(path, e.to_string()))?;

        let format = config.format.resolve(path);
        debug!(path = %path.display(), ?format, "Parsing model artifact");

        let artifact = match format {
            ModelFormat::Yaml => serde_yaml::from_str::<ModelArtifact>(&content)
                .map_err(|e| Error::model_load(path, e.to_string()))?,
            _ => serde_json::from_str::<ModelArtifact>(&content)
                .map_err(|e| Error::model_load(path, e.to_string()))?,
        };

        let model = Self::from_artifact(artifact, path.clone())?;
        info!(
            path = %path.display(),
            name = %model.info.name,
            version = %model.info.version,
            estimator = model.kind().as_str(),
            "Model loaded"
        );
        Ok(model)
    }

    /// Validate an in-memory artifact
    pub fn from_artifact(artifact: ModelArtifact, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let layout = FeatureLayout::bind(&artifact.feature_names)
            .map_err(|e| Error::model_load(&source, e.to_string()))?;

        artifact
            .estimator
            .validate(layout.len())
            .map_err(|reason| Error::model_load(&source, reason))?;

        let info = artifact.info();
        Ok(Self {
            artifact,
            layout,
            info,
        })
    }

    pub fn kind(&self) -> EstimatorKind {
        self.artifact.estimator.kind()
    }
}

impl Classifier for LoadedModel {
    fn predict(&self, row: &FeatureRow) -> Result<i64> {
        if row.len() != self.layout.len() {
            return Err(Error::prediction(format!(
                "row has {} columns, model expects {}",
                row.len(),
                self.layout.len()
            )));
        }
        if let Some(idx) = row.values().iter().position(|v| !v.is_finite()) {
            return Err(Error::prediction(format!(
                "feature '{}' is not a finite number",
                self.layout.fields()[idx]
            )));
        }

        self.artifact.estimator.predict(row)
    }

    fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    fn info(&self) -> &ModelInfo {
        &self.info
    }
}
