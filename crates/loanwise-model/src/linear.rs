//! Logistic regression estimator

use loanwise_core::{Error, FeatureRow, Result};
use serde::{Deserialize, Serialize};

/// Per-column standardization applied before the linear term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Binary logistic regression: class 1 when `sigmoid(w·x + b) >= threshold`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One weight per feature column
    pub coefficients: Vec<f64>,

    pub intercept: f64,

    /// Decision threshold on the positive-class probability
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Optional standardization of the inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
}

fn default_threshold() -> f64 {
    0.5
}

impl LogisticRegression {
    /// Check the estimator against the number of feature columns
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.coefficients.len() != n_features {
            return Err(format!(
                "logistic regression has {} coefficients for {} features",
                self.coefficients.len(),
                n_features
            ));
        }
        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err("logistic regression weights must be finite".to_string());
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(format!(
                "decision threshold {} must lie strictly between 0 and 1",
                self.threshold
            ));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n_features || scaler.scale.len() != n_features {
                return Err(format!(
                    "scaler has {} means and {} scales for {} features",
                    scaler.mean.len(),
                    scaler.scale.len(),
                    n_features
                ));
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err("scaler scale values must be finite and non-zero".to_string());
            }
        }
        Ok(())
    }

    /// Probability of the positive class
    pub fn probability(&self, row: &FeatureRow) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(Error::prediction(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                row.len()
            )));
        }

        let mut z = self.intercept;
        for (i, (x, w)) in row.values().iter().zip(&self.coefficients).enumerate() {
            let x = match &self.scaler {
                Some(scaler) => (x - scaler.mean[i]) / scaler.scale[i],
                None => *x,
            };
            z += w * x;
        }
        if !z.is_finite() {
            return Err(Error::prediction(format!(
                "linear score is not finite ({})",
                z
            )));
        }

        Ok(1.0 / (1.0 + (-z).exp()))
    }

    pub fn predict(&self, row: &FeatureRow) -> Result<i64> {
        let p = self.probability(row)?;
        Ok(if p >= self.threshold { 1 } else { 0 })
    }
}
