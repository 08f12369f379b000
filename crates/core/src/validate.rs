// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recipe validation
//!
//! Validation is pure: it runs before any actuator or log I/O, so a recipe
//! that fails here never reaches hardware. Advisory warnings are returned
//! alongside a successful result and never block a run.

use crate::actuator::{ActuatorId, ActuatorSet, Universe};
use crate::recipe::RecipeDefinition;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Part of a recipe an error or warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "stage", content = "index")]
pub enum StageRef {
    Init,
    /// Zero-based step index
    Step(usize),
    Final,
}

impl fmt::Display for StageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageRef::Init => f.write_str("initialization"),
            StageRef::Step(i) => write!(f, "step {}", i + 1),
            StageRef::Final => f.write_str("finalization"),
        }
    }
}

/// Malformed recipe
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("recipe has no steps")]
    EmptySteps,
    #[error("invalid recipe name {0:?}: must be non-empty without '|', '/' or line breaks")]
    InvalidName(String),
    #[error("{stage}: duration {value} must be a finite number of seconds >= 0")]
    InvalidDuration { stage: StageRef, value: f64 },
    #[error("{stage}: unknown actuator {id}")]
    UnknownActuator { stage: StageRef, id: ActuatorId },
}

/// Advisory finding that does not prevent a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeWarning {
    NoActuators(StageRef),
}

impl fmt::Display for RecipeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeWarning::NoActuators(StageRef::Init) => {
                f.write_str("initialization with no gas input")
            }
            RecipeWarning::NoActuators(stage) => write!(f, "{stage} with no gas input"),
        }
    }
}

/// Check a recipe against the configured actuator universe
pub fn validate(
    recipe: &RecipeDefinition,
    universe: &Universe,
) -> Result<Vec<RecipeWarning>, ValidationError> {
    if !is_valid_name(&recipe.name) {
        return Err(ValidationError::InvalidName(recipe.name.clone()));
    }
    if recipe.steps.is_empty() {
        return Err(ValidationError::EmptySteps);
    }

    let mut warnings = Vec::new();

    check_stage(StageRef::Init, &recipe.init.actuators, recipe.init.wait, universe)?;
    if recipe.init.actuators.is_empty() {
        warnings.push(RecipeWarning::NoActuators(StageRef::Init));
    }

    for (i, step) in recipe.steps.iter().enumerate() {
        check_stage(StageRef::Step(i), &step.actuators, step.duration, universe)?;
        if step.actuators.is_empty() {
            warnings.push(RecipeWarning::NoActuators(StageRef::Step(i)));
        }
    }

    check_stage(
        StageRef::Final,
        &recipe.finalize.actuators,
        recipe.finalize.wait,
        universe,
    )?;

    Ok(warnings)
}

fn check_stage(
    stage: StageRef,
    actuators: &ActuatorSet,
    seconds: f64,
    universe: &Universe,
) -> Result<(), ValidationError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ValidationError::InvalidDuration {
            stage,
            value: seconds,
        });
    }
    if let Some(id) = actuators.iter().find(|id| !universe.contains(id)) {
        return Err(ValidationError::UnknownActuator {
            stage,
            id: id.clone(),
        });
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['|', '/', '\n', '\r'])
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
