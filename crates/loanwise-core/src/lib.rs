//! LoanWise Core
//!
//! Types shared across LoanWise components.
//!
//! This crate provides:
//! - The strongly-typed [`ApplicantRecord`] collected by the form
//! - The feature schema and the versioned record-to-row mapping
//! - Verdict and assessment types
//! - Error types and result handling

pub mod error;
pub mod record;
pub mod schema;
pub mod verdict;

pub use error::{Error, Result};
pub use record::{ApplicantRecord, Education, Flag};
pub use schema::{FeatureLayout, FeatureRow, Field, FieldRange, SCHEMA_VERSION};
pub use verdict::{Assessment, ModelInfo, Verdict};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::record::{ApplicantRecord, Education, Flag};
    pub use crate::schema::{FeatureLayout, FeatureRow, Field};
    pub use crate::verdict::{Assessment, ModelInfo, Verdict};
}
