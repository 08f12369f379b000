// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod logs;
pub mod run;

use ald_core::RecipeDefinition;
use ald_storage::LogSummary;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::error::AldError;

/// Where the recipe comes from: exactly one of file, preset or log
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct RecipeSource {
    /// Recipe file (TOML)
    pub recipe: Option<PathBuf>,

    /// Built-in recipe: ald or purge
    #[arg(long)]
    pub preset: Option<String>,

    /// Import the recipe recorded in a progress log
    #[arg(long, value_name = "LOG")]
    pub from_log: Option<PathBuf>,
}

impl RecipeSource {
    pub fn load(&self) -> Result<RecipeDefinition> {
        if let Some(path) = &self.recipe {
            return Ok(RecipeDefinition::load(path)?);
        }
        if let Some(name) = &self.preset {
            return RecipeDefinition::preset(name)
                .ok_or_else(|| AldError::unknown_preset(name).into());
        }
        if let Some(log) = &self.from_log {
            return Ok(LogSummary::read(log)?.recipe);
        }
        Err(AldError::no_recipe_source().into())
    }
}
