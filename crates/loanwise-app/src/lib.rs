//! LoanWise application
//!
//! The web form, the command-line checker and the predictor that ties the
//! model to the reason rules.

pub mod cli;
pub mod config;
pub mod form;
pub mod predictor;
pub mod render;
pub mod server;
pub mod state;
pub mod telemetry;

pub use cli::{Cli, Commands};
pub use config::AppConfig;
pub use predictor::Predictor;
pub use server::{build_app, run_server};
pub use state::AppState;
