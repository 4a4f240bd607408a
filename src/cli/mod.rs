//! Command line interface
//!
//! - `serve`: run the HTTP API (default)
//! - `migrate`: apply storage migrations to the configured PostgreSQL database

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// eCash Account API - user and e-wallet account management
#[derive(Parser)]
#[command(name = "ecash-account-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply pending storage migrations and exit
    Migrate,
}

/// Load `.env` and configuration, then install the tracing subscriber
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
