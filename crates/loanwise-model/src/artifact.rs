//! Serialized model artifact
//!
//! ```yaml
//! name: bank-loan
//! version: "2"
//! feature_names: [Age, Experience, Income, Family, CCAvg, Education,
//!                 Mortgage, Securities Account, CD Account, Online, CreditCard]
//! estimator:
//!   type: logistic_regression
//!   coefficients: [...]
//!   intercept: -13.0
//! ```

use crate::classifier::EstimatorKind;
use crate::linear::LogisticRegression;
use crate::tree::{DecisionTree, RandomForest};
use loanwise_core::{FeatureRow, ModelInfo, Result};
use serde::{Deserialize, Serialize};

/// A trained model as written by the export step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    /// Training-time column names, in the order the estimator indexes them
    pub feature_names: Vec<String>,

    pub estimator: Estimator,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_version() -> String {
    "0".to_string()
}

/// The estimator inside an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression(LogisticRegression),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl Estimator {
    pub fn kind(&self) -> EstimatorKind {
        match self {
            Self::LogisticRegression(_) => EstimatorKind::LogisticRegression,
            Self::DecisionTree(_) => EstimatorKind::DecisionTree,
            Self::RandomForest(_) => EstimatorKind::RandomForest,
        }
    }

    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        match self {
            Self::LogisticRegression(m) => m.validate(n_features),
            Self::DecisionTree(m) => m.validate(n_features),
            Self::RandomForest(m) => m.validate(n_features),
        }
    }

    pub fn predict(&self, row: &FeatureRow) -> Result<i64> {
        match self {
            Self::LogisticRegression(m) => m.predict(row),
            Self::DecisionTree(m) => m.predict(row),
            Self::RandomForest(m) => m.predict(row),
        }
    }
}

impl ModelArtifact {
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_estimator() {
        let yaml = r#"
name: stump
feature_names: [Income]
estimator:
  type: decision_tree
  nodes:
    - { feature: 0, threshold: 100.0, left: 1, right: 2 }
    - { class: 0 }
    - { class: 1 }
"#;
        let artifact: ModelArtifact = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(artifact.name, "stump");
        assert_eq!(artifact.version, "0");
        assert_eq!(artifact.estimator.kind(), EstimatorKind::DecisionTree);
        assert!(artifact.estimator.validate(1).is_ok());
    }

    #[test]
    fn test_unknown_estimator_type() {
        let json = r#"{"feature_names":[],"estimator":{"type":"svm"}}"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }
}
