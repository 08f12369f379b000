// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ald check` - Validate a recipe without running it

use ald_core::{validate, Clock, Config, SystemClock};
use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use super::RecipeSource;
use crate::error::AldError;
use crate::output::{self, Estimate, OutputFormat};

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: RecipeSource,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle(args: CheckArgs, config: &Config) -> Result<ExitCode> {
    let format = OutputFormat::from_json_flag(args.json);
    let recipe = args.source.load()?;
    let universe = config.universe()?;

    let warnings =
        validate(&recipe, &universe).map_err(|e| AldError::invalid_recipe(&recipe.name, e))?;
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }

    output::print(&Estimate::new(&recipe, SystemClock.now()), format);
    Ok(ExitCode::SUCCESS)
}
