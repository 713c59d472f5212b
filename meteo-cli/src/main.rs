//! Binary crate for the `meteo` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments into an explicit location query
//! - Interactive configuration
//! - Human-friendly output and exit codes per failure kind

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod configure;
mod logger;
mod presenter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
