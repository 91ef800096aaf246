//! LoanWise
//!
//! Personal loan eligibility predictor: a web form and a one-shot checker over
//! a pre-trained classifier.

use anyhow::{Context, Result};
use clap::Parser;
use loanwise_app::cli::{CheckArgs, Cli, Commands};
use loanwise_app::render::text_report;
use loanwise_app::telemetry::{init_metrics, init_tracing};
use loanwise_app::{run_server, AppConfig, AppState};
use loanwise_core::verdict::PREDICTION_ERROR_HINT;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load(&cli.config, &cli.overrides())
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    match &cli.command {
        Commands::Serve { .. } => serve(config).await,
        Commands::Check(args) => check(config, args),
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    info!("Starting LoanWise");

    // Any model problem ends the process here, before a form is ever served
    let state = AppState::from_config(&config).context("startup failed")?;
    let metrics_handle = init_metrics()?;
    let state = state.with_metrics(metrics_handle);

    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.bind_address()))?;

    println!();
    println!("  Personal Loan Eligibility Predictor");
    println!("  Model: {}", config.model.path.display());
    println!();
    println!("  Open http://{} in your browser", addr);
    println!();

    run_server(state, addr).await
}

fn check(config: AppConfig, args: &CheckArgs) -> Result<()> {
    let state = AppState::from_config(&config).context("startup failed")?;
    let assessment = state
        .predictor
        .assess(&args.record())
        .map_err(|e| {
            eprintln!("{}", PREDICTION_ERROR_HINT);
            e
        })
        .context("An error occurred during prediction")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print!("{}", text_report(&assessment));
    }
    Ok(())
}
