//! CLI module for the churn prediction service
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `check-model`: load a model artifact offline and optionally score records

pub mod check_model;
pub mod serve;

use clap::{Parser, Subcommand};

/// Bank Churn Prediction API - customer churn scoring over HTTP
#[derive(Parser)]
#[command(name = "churn-prediction-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Validate a model artifact and optionally score a file of records
    CheckModel(check_model::CheckModelArgs),
}
