//! Shared application state

use crate::config::AppConfig;
use crate::predictor::Predictor;
use loanwise_core::Result;
use loanwise_model::LoadedModel;
use loanwise_rules::Explainer;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::{error, info};

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    /// Prometheus handle; `/metrics` is empty without one
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
            metrics: None,
        }
    }

    /// Load the model and rules named by `config`.
    ///
    /// Fails on any startup error so the caller never serves a form it
    /// cannot evaluate.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let model = LoadedModel::load(&config.model).map_err(|e| {
            error!(kind = e.kind(), error = %e, "Failed to load model");
            e
        })?;

        let explainer = match &config.rules_path {
            Some(path) => {
                let explainer = Explainer::from_file(path)?;
                info!(
                    path = %path.display(),
                    rules = explainer.rules().rules.len(),
                    "Loaded rule set"
                );
                explainer
            }
            None => Explainer::default(),
        };

        Ok(Self::new(Predictor::new(Arc::new(model), explainer)))
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
