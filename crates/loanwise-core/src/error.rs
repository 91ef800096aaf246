//! Error types for LoanWise

use std::path::PathBuf;

/// Result type alias using LoanWise's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for LoanWise operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured model path does not resolve to a file
    #[error("model file not found: {}", path.display())]
    ModelNotFound { path: PathBuf },

    /// The model file exists but is not a usable classifier
    #[error("failed to load model from {}: {reason}", path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// Model invocation failed for a single request
    #[error("prediction error: {0}")]
    Prediction(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Rule set errors
    #[error("rules error: {0}")]
    Rules(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new model-not-found error
    pub fn model_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ModelNotFound { path: path.into() }
    }

    /// Create a new model load error
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new prediction error
    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new rules error
    pub fn rules(msg: impl Into<String>) -> Self {
        Self::Rules(msg.into())
    }

    /// Whether this error must stop the application from starting.
    ///
    /// Prediction errors are per-request and never fatal.
    pub fn is_startup_fatal(&self) -> bool {
        !matches!(self, Self::Prediction(_))
    }

    /// Short, stable name of the error kind, for structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. } => "model_not_found",
            Self::ModelLoad { .. } => "model_load",
            Self::Prediction(_) => "prediction",
            Self::Config(_) => "config",
            Self::Rules(_) => "rules",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Yaml(_) => "yaml",
        }
    }
}
