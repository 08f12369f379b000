// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ald run` - Execute a recipe on the actuators

use ald_adapters::{Actuator, CommandActuator, NoOpActuator, TracedActuator};
use ald_core::{validate, Clock, Config, Ending, RecipeDefinition, SystemClock, Universe};
use ald_engine::{RunError, RunReport, Sequencer, SequencerConfig};
use ald_storage::RunLock;
use anyhow::Result;
use clap::Args;
use std::path::Path;
use std::process::ExitCode;

use super::RecipeSource;
use crate::error::AldError;
use crate::output::{self, Estimate, OutputFormat, ProgressPrinter};

/// Exit status of a run that ended in Aborted
const EXIT_FORCED: u8 = 2;

/// Diagnostics file inside the log root
pub const TRACE_FILE: &str = "ald.trace.log";

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: RecipeSource,

    /// Drive no hardware; every actuator command succeeds
    #[arg(long)]
    pub dry_run: bool,

    /// One JSON object per event on stdout
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(args: RunArgs, config: &Config) -> Result<ExitCode> {
    let format = OutputFormat::from_json_flag(args.json);
    let recipe = args.source.load()?;
    let universe = config.universe()?;

    // Fail before touching the lock or the log root
    validate(&recipe, &universe).map_err(|e| AldError::invalid_recipe(&recipe.name, e))?;

    output::print(&Estimate::new(&recipe, SystemClock.now()), format);
    if format == OutputFormat::Text {
        println!();
    }

    let _lock = RunLock::acquire(&config.log_root)
        .map_err(|e| AldError::run_locked(&config.log_root, e))?;
    let _guard = setup_logging(&config.log_root)?;

    let report = if args.dry_run {
        tracing::info!(recipe = %recipe.name, "dry run");
        execute(TracedActuator::new(NoOpActuator), universe, config, &recipe, format).await?
    } else {
        let actuator = CommandActuator::from_config(config);
        actuator
            .check(&universe)
            .map_err(AldError::actuator_unconfigured)?;
        execute(TracedActuator::new(actuator), universe, config, &recipe, format).await?
    };

    Ok(match report.ending {
        Ending::Normal => ExitCode::SUCCESS,
        Ending::Forced => ExitCode::from(EXIT_FORCED),
    })
}

async fn execute<A: Actuator>(
    actuator: A,
    universe: Universe,
    config: &Config,
    recipe: &RecipeDefinition,
    format: OutputFormat,
) -> Result<RunReport> {
    let sequencer = Sequencer::new(
        actuator,
        universe,
        SystemClock,
        SequencerConfig {
            log_root: config.log_root.clone(),
            failure_policy: config.on_actuator_failure,
        },
    );

    let abort = sequencer.abort_handle();
    ctrlc::set_handler(move || {
        eprintln!("\nAborting run, closing all actuators...");
        abort.request();
    })?;

    let mut printer = ProgressPrinter::new(recipe, format);
    let report = sequencer
        .start(recipe, &mut printer)
        .await
        .map_err(|e| match e {
            RunError::Validation(err) => {
                anyhow::Error::from(AldError::invalid_recipe(&recipe.name, err))
            }
            other => anyhow::Error::from(other),
        })?;
    printer.finish(&report);
    Ok(report)
}

fn setup_logging(log_root: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(log_root)?;
    let file_appender = tracing_appender::rolling::never(log_root, TRACE_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}
