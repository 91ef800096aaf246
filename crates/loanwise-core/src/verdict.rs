//! Verdict and assessment types

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline shown for a positive verdict
pub const ELIGIBLE_MESSAGE: &str =
    "Congratulations! You are likely Eligible for a Personal Loan.";

/// Headline shown for a negative verdict
pub const NOT_ELIGIBLE_MESSAGE: &str = "Sorry, you are currently Not Eligible for a Personal Loan.";

/// Closing note shown after a non-empty list of reasons
pub const REASONS_DISCLAIMER: &str =
    "These are general indicators. For precise reasons, please consult with a bank representative.";

/// Closing note shown when no reason rule matched
pub const NO_SPECIFIC_REASON: &str = "Based on your inputs, the model predicts non-eligibility. \
However, specific reasons couldn't be pinpointed from general thresholds. \
Factors like overall financial health, debt-to-income ratio, or specific bank policies might be at play.";

/// Hint attached to every prediction error
pub const PREDICTION_ERROR_HINT: &str =
    "Please check your input values and ensure the model file is correct.";

/// Binary outcome of a model invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Eligible,
    NotEligible,
}

impl Verdict {
    /// Map a raw class label to a verdict; anything but 0 or 1 is an error
    pub fn from_label(label: i64) -> Result<Self> {
        match label {
            1 => Ok(Self::Eligible),
            0 => Ok(Self::NotEligible),
            other => Err(Error::prediction(format!(
                "model returned class {}, expected 0 or 1",
                other
            ))),
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Headline message for this verdict
    pub fn message(&self) -> &'static str {
        match self {
            Self::Eligible => ELIGIBLE_MESSAGE,
            Self::NotEligible => NOT_ELIGIBLE_MESSAGE,
        }
    }

    /// Metrics label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eligible => "eligible",
            Self::NotEligible => "not_eligible",
        }
    }
}

/// Identity of the model that produced an assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
}

/// Everything shown to the applicant after one check
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub verdict: Verdict,

    /// Headline for the verdict
    pub message: String,

    /// Matched reasons, in rule order; always empty when eligible
    pub reasons: Vec<String>,

    /// Disclaimer or fallback text; absent when eligible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub model: ModelInfo,
    pub schema_version: u32,
    pub assessed_at: DateTime<Utc>,
}

impl Assessment {
    /// Build an assessment, choosing the closing note from the reasons
    pub fn new(verdict: Verdict, reasons: Vec<String>, model: ModelInfo) -> Self {
        let note = match verdict {
            Verdict::Eligible => None,
            Verdict::NotEligible if reasons.is_empty() => Some(NO_SPECIFIC_REASON.to_string()),
            Verdict::NotEligible => Some(REASONS_DISCLAIMER.to_string()),
        };
        let reasons = if verdict.is_eligible() { Vec::new() } else { reasons };

        Self {
            verdict,
            message: verdict.message().to_string(),
            reasons,
            note,
            model,
            schema_version: crate::schema::SCHEMA_VERSION,
            assessed_at: Utc::now(),
        }
    }
}
