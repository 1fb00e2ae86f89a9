//! coursedeck - asset manifest, standardized paths and availability checks
//! for a 4-week course dashboard.

mod asset;
mod cli;
mod config;
mod curriculum;
mod logger;
mod manifest;
mod probe;
mod resolve;
mod utils;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, common::Session};
use config::CourseConfig;
use probe::HttpTransport;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log!("error"; "{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch the subcommand. `Ok(false)` exits non-zero without an error.
async fn run(cli: &Cli) -> Result<bool> {
    let config = CourseConfig::load(cli)?;

    match &cli.command {
        Commands::Status { args } => {
            let session = Session::open(&config).await?;
            cli::status::run_status(args, &session).await?;
            Ok(true)
        }
        Commands::Register { args } => {
            let session = Session::open(&config).await?;
            cli::register::run_register(args, &session).await?;
            Ok(true)
        }
        Commands::Export { args } => {
            let session = Session::open(&config).await?;
            cli::export::run_export(args, &session)?;
            Ok(true)
        }
        Commands::Path { args } => Ok(cli::path::run_path(args)?.is_success()),
        Commands::Generate { args } => {
            let transport =
                Arc::new(HttpTransport::new(None).context("Failed to build HTTP client")?);
            cli::generate::run_generate(args, &config, transport).await?;
            Ok(true)
        }
    }
}
