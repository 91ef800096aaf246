//! Prediction and explanation for one applicant

use loanwise_core::{ApplicantRecord, Assessment, Error, ModelInfo, Result, Verdict};
use loanwise_model::Classifier;
use loanwise_rules::Explainer;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the model on a record and explains negative verdicts.
///
/// The model handle is built once at startup and never mutated, so a single
/// predictor is shared by every request.
pub struct Predictor {
    model: Arc<dyn Classifier>,
    explainer: Explainer,
}

impl Predictor {
    pub fn new(model: Arc<dyn Classifier>, explainer: Explainer) -> Self {
        Self { model, explainer }
    }

    pub fn model_info(&self) -> &ModelInfo {
        self.model.info()
    }

    /// Predict eligibility for one record.
    ///
    /// Any failure of the model, including a panic inside it, comes back as
    /// [`Error::Prediction`].
    pub fn assess(&self, record: &ApplicantRecord) -> Result<Assessment> {
        let start = Instant::now();

        let verdict = match self.invoke(record) {
            Ok(verdict) => verdict,
            Err(e) => {
                metrics::counter!("loanwise_prediction_errors_total").increment(1);
                warn!(error = %e, "Prediction failed");
                return Err(e);
            }
        };

        let reasons = match verdict {
            Verdict::Eligible => Vec::new(),
            Verdict::NotEligible => self.explainer.explain(record),
        };

        let elapsed_us = start.elapsed().as_micros() as f64;
        metrics::counter!("loanwise_predictions_total", "verdict" => verdict.as_str()).increment(1);
        metrics::histogram!("loanwise_prediction_latency_us").record(elapsed_us);

        info!(
            verdict = verdict.as_str(),
            reasons = reasons.len(),
            latency_us = elapsed_us,
            "Prediction complete"
        );

        Ok(Assessment::new(verdict, reasons, self.model.info().clone()))
    }

    fn invoke(&self, record: &ApplicantRecord) -> Result<Verdict> {
        debug!(?record, "Invoking model");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.model.predict_record(record)));
        match outcome {
            Ok(Ok(verdict)) => Ok(verdict),
            Ok(Err(Error::Prediction(msg))) => Err(Error::Prediction(msg)),
            Ok(Err(other)) => Err(Error::prediction(other.to_string())),
            Err(payload) => {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "model panicked".to_string());
                Err(Error::prediction(format!("model panicked: {}", msg)))
            }
        }
    }
}
