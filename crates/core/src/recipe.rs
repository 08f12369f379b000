// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recipe definitions
//!
//! A recipe is an initialization stage, an ordered list of timed steps
//! repeated `cycles` times, and a finalization stage.

use crate::actuator::ActuatorSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a recipe file
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("cannot read recipe {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid recipe {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Initialization or finalization stage: actuators held open for `wait` seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stage {
    #[serde(default)]
    pub actuators: ActuatorSet,
    #[serde(default)]
    pub wait: f64,
}

impl Stage {
    pub fn new(actuators: ActuatorSet, wait: f64) -> Self {
        Self { actuators, wait }
    }
}

/// One timed phase of a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    #[serde(default)]
    pub actuators: ActuatorSet,
    /// Seconds
    pub duration: f64,
}

impl Step {
    pub fn new(actuators: ActuatorSet, duration: f64) -> Self {
        Self {
            actuators,
            duration,
        }
    }
}

/// Immutable description of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeDefinition {
    pub name: String,
    #[serde(default)]
    pub init: Stage,
    pub steps: Vec<Step>,
    pub cycles: u32,
    #[serde(default, rename = "final")]
    pub finalize: Stage,
}

impl RecipeDefinition {
    /// Parse a recipe from TOML
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a recipe from a TOML file
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let content = std::fs::read_to_string(path).map_err(|source| RecipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| RecipeError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Duration of one traversal of the step list
    pub fn cycle_seconds(&self) -> f64 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Expected duration of a full run
    pub fn total_seconds(&self) -> f64 {
        self.init.wait + f64::from(self.cycles) * self.cycle_seconds() + self.finalize.wait
    }

    /// Every (cycle, step) position in execution order
    pub fn positions(&self) -> Positions {
        Positions {
            cycles: self.cycles,
            steps: self.steps.len(),
            next: Position { cycle: 0, step: 0 },
        }
    }

    /// Look up a built-in recipe by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ald" => Some(Self::ald()),
            "purge" => Some(Self::purge()),
            _ => None,
        }
    }

    /// Default four-step ALD recipe
    pub fn ald() -> Self {
        let step = |ids: &[&str]| Step::new(ids.iter().copied().collect(), 10.0);
        Self {
            name: "ALD".to_string(),
            init: Stage::new(ActuatorSet::new(), 10.0),
            steps: vec![
                step(&["V1"]),
                step(&["V2", "V3"]),
                step(&["V1"]),
                step(&["V2", "V4"]),
            ],
            cycles: 100,
            finalize: Stage::new(ActuatorSet::new(), 10.0),
        }
    }

    /// Line purge: every valve open for three minutes
    pub fn purge() -> Self {
        Self {
            name: "Purge".to_string(),
            init: Stage::default(),
            steps: vec![Step::new(
                ["V1", "V2", "V3", "V4"].into_iter().collect(),
                180.0,
            )],
            cycles: 1,
            finalize: Stage::new(ActuatorSet::new(), 1.0),
        }
    }
}

/// Zero-based position inside the cycle loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub cycle: u32,
    pub step: usize,
}

/// Iterator over the cycle loop, see [`RecipeDefinition::positions`]
#[derive(Debug, Clone)]
pub struct Positions {
    cycles: u32,
    steps: usize,
    next: Position,
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.steps == 0 || self.next.cycle >= self.cycles {
            return None;
        }
        let current = self.next;
        if current.step + 1 < self.steps {
            self.next.step += 1;
        } else {
            self.next = Position {
                cycle: current.cycle + 1,
                step: 0,
            };
        }
        Some(current)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    Normal,
    Forced,
}

impl Ending {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ending::Normal => "normal",
            Ending::Forced => "forced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Ending::Normal),
            "forced" => Some(Ending::Forced),
            _ => None,
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "recipe_tests.rs"]
mod tests;
