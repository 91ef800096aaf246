//! Classifier trait and common types

use loanwise_core::{ApplicantRecord, FeatureLayout, FeatureRow, ModelInfo, Result, Verdict};

/// Trait for all eligibility classifiers
///
/// Implementations are immutable once built and safe to call from many
/// requests at once.
pub trait Classifier: Send + Sync {
    /// Predict the raw class label of a single row laid out per [`Classifier::layout`]
    fn predict(&self, row: &FeatureRow) -> Result<i64>;

    /// Column order this classifier expects
    fn layout(&self) -> &FeatureLayout;

    /// Name and version of the underlying model
    fn info(&self) -> &ModelInfo;

    /// Flatten a record, predict, and map the label to a verdict
    fn predict_record(&self, record: &ApplicantRecord) -> Result<Verdict> {
        let row = self.layout().row(record);
        Verdict::from_label(self.predict(&row)?)
    }
}

/// Kind of estimator inside a model artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorKind {
    /// Linear model with a sigmoid link
    LogisticRegression,
    /// Single binary decision tree
    DecisionTree,
    /// Majority vote over decision trees
    RandomForest,
}

impl EstimatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogisticRegression => "logistic_regression",
            Self::DecisionTree => "decision_tree",
            Self::RandomForest => "random_forest",
        }
    }
}
