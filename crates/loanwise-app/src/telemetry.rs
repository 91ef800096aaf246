//! Logging and metrics setup

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins unless `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("loanwise=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("loanwise=info,tower_http=warn"))
    };

    // A second init (tests, repeated CLI runs in one process) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Install the Prometheus recorder and return the handle `/metrics` renders from
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "loanwise_predictions_total",
        "Total number of completed predictions by verdict"
    );
    metrics::describe_counter!(
        "loanwise_prediction_errors_total",
        "Total number of failed predictions"
    );
    metrics::describe_histogram!(
        "loanwise_prediction_latency_us",
        metrics::Unit::Microseconds,
        "Prediction and explanation latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
