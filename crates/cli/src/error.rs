// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing errors with context and suggestions.
//!
//! Each error says what went wrong, why it might have happened, and how to
//! fix it.

use ald_adapters::ActuatorError;
use ald_core::{ConfigError, ValidationError};
use ald_storage::LockError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for display on the terminal
#[derive(Debug)]
pub struct AldError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for AldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures an operator can act on
impl AldError {
    pub fn config_invalid(path: &Path, err: ConfigError) -> Self {
        AldError::new(format!("Cannot load configuration {}", path.display()))
            .with_context(err.to_string())
            .with_suggestion("Check the file against the documented ald.toml layout")
            .with_suggestion("Run without --config to use the built-in defaults (V1..V4)")
            .with_source(err)
    }

    pub fn invalid_recipe(name: &str, err: ValidationError) -> Self {
        AldError::new(format!("Recipe '{}' is invalid", name))
            .with_context(err.to_string())
            .with_suggestion("Fix the recipe and validate it with: ald check <RECIPE>")
            .with_suggestion("Actuator ids must match the [[actuator]] entries in ald.toml")
            .with_source(err)
    }

    pub fn run_locked(log_root: &Path, err: LockError) -> Self {
        let held = matches!(err, LockError::Held(_));
        let error = AldError::new("Cannot take the run lock").with_context(err.to_string());
        let error = if held {
            error
                .with_context("Another ald run is using this log root")
                .with_suggestion("Wait for the other run to finish, or stop it with Ctrl-C")
        } else {
            error.with_suggestion(format!(
                "Check that {} is writable",
                log_root.display()
            ))
        };
        error.with_source(err)
    }

    pub fn actuator_unconfigured(err: ActuatorError) -> Self {
        AldError::new("Actuator driver is not fully configured")
            .with_context(err.to_string())
            .with_suggestion("Add activate/deactivate commands to every [[actuator]] in ald.toml")
            .with_suggestion("Rehearse the recipe without hardware: ald run --dry-run")
            .with_source(err)
    }

    pub fn no_recipe_source() -> Self {
        AldError::new("No recipe given")
            .with_suggestion("Pass a recipe file: ald run recipe.toml")
            .with_suggestion("Or a preset: ald run --preset ald")
            .with_suggestion("Or import one from a log: ald run --from-log Logs/<log>.txt")
    }

    pub fn unknown_preset(name: &str) -> Self {
        AldError::new(format!("Unknown preset '{}'", name))
            .with_suggestion("Available presets: ald, purge")
    }

    pub fn log_not_found(log: &Path) -> Self {
        AldError::new(format!("Progress log {} not found", log.display()))
            .with_suggestion("List recorded runs: ald logs list")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
