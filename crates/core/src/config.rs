// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller configuration
//!
//! Loaded from TOML. The ordered `[[actuator]]` list is the actuator
//! universe; each entry may carry the shell commands that switch it.

use crate::actuator::{ActuatorId, Universe, UniverseError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default actuator ids when no configuration names any
pub const DEFAULT_ACTUATORS: [&str; 4] = ["V1", "V2", "V3", "V4"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Universe(#[from] UniverseError),
}

/// What the sequencer does when an actuator command fails mid-run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Report the failure and keep the gas sequence going
    #[default]
    Continue,
    /// Treat the failure as an abort request
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActuatorConfig {
    pub id: ActuatorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivate: Option<String>,
}

impl ActuatorConfig {
    pub fn new(id: impl Into<ActuatorId>) -> Self {
        Self {
            id: id.into(),
            activate: None,
            deactivate: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub log_root: PathBuf,
    pub on_actuator_failure: FailurePolicy,
    #[serde(rename = "actuator")]
    pub actuators: Vec<ActuatorConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_root: PathBuf::from("Logs"),
            on_actuator_failure: FailurePolicy::default(),
            actuators: DEFAULT_ACTUATORS.into_iter().map(ActuatorConfig::new).collect(),
        }
    }
}

impl Config {
    /// Parse and check a configuration document
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.universe()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// The actuator universe, in configured order
    pub fn universe(&self) -> Result<Universe, UniverseError> {
        Universe::new(self.actuators.iter().map(|a| a.id.clone()))
    }

    pub fn actuator(&self, id: &ActuatorId) -> Option<&ActuatorConfig> {
        self.actuators.iter().find(|a| &a.id == id)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
