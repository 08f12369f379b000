// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ald - deposition recipe controller

mod commands;
mod config;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, logs, run};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::AldError;

#[derive(Parser)]
#[command(
    name = "ald",
    version,
    about = "ALD/CVD recipe controller - timed gas sequences on valve actuators"
)]
struct Cli {
    /// Configuration file (default: ./ald.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a recipe
    Run(run::RunArgs),
    /// Validate a recipe and print its time estimate
    Check(check::CheckArgs),
    /// Inspect progress logs
    Logs(logs::LogsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<ExitCode> {
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => run::handle(args, &config).await,
        Commands::Check(args) => check::handle(args, &config),
        Commands::Logs(args) => logs::handle(args, &config),
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<AldError>() {
        Some(ald) => eprint!("{ald}"),
        None => eprintln!("error: {err:#}"),
    }
}
