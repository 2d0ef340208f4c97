//! CLI module for the tiered prompt cache
//!
//! - `serve`: HTTP API
//! - `repl`: interactive shell on stdin/stdout

pub mod repl;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Tiered prompt cache - exact, semantic and generated answers behind one router
#[derive(Parser)]
#[command(name = "tiered-prompt-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Query the cache interactively
    Repl,
}

/// Load `.env` and layered configuration, then install logging
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
