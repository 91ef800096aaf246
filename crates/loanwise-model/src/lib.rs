//! LoanWise Model
//!
//! Loads the pre-trained eligibility classifier from a local artifact and
//! evaluates it on single rows.
//!
//! Supported estimators:
//! - Logistic regression, with optional input standardization
//! - Decision tree (flat node array)
//! - Random forest (majority vote)
//!
//! The artifact names its feature columns; loading binds them to the
//! applicant schema by name and rejects any drift.

pub mod artifact;
pub mod classifier;
pub mod linear;
pub mod model_loader;
pub mod tree;

pub use artifact::{Estimator, ModelArtifact};
pub use classifier::{Classifier, EstimatorKind};
pub use linear::{LogisticRegression, StandardScaler};
pub use model_loader::{LoadedModel, ModelConfig, ModelFormat, DEFAULT_MODEL_PATH};
pub use tree::{DecisionTree, Node, RandomForest};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::model_loader::{LoadedModel, ModelConfig, ModelFormat};
}
