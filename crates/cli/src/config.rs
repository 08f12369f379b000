// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration file lookup

use ald_core::Config;
use std::path::{Path, PathBuf};

use crate::error::AldError;

pub const CONFIG_FILE: &str = "ald.toml";

/// Load the configuration: `--config`, then `./ald.toml`, then the user
/// config directory, then built-in defaults
pub fn load(explicit: Option<&Path>) -> Result<Config, AldError> {
    match locate(explicit, dirs::config_dir()) {
        Some(path) => Config::load(&path).map_err(|e| AldError::config_invalid(&path, e)),
        None => Ok(Config::default()),
    }
}

fn locate(explicit: Option<&Path>, user_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        // An explicit path is used even if missing so the read error surfaces
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    user_dir
        .map(|dir| dir.join("ald").join(CONFIG_FILE))
        .filter(|path| path.is_file())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
