// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress log reader for audit, recovery and recipe import

use ald_core::header::{decode_record, HeaderError, LOG_BANNER};
use ald_core::timefmt::parse_timestamp;
use ald_core::{Ending, RecipeDefinition};
use chrono::NaiveDateTime;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{path}: {source}")]
    Header { path: PathBuf, source: HeaderError },
}

/// Decoded view of one progress log
#[derive(Debug, Clone)]
pub struct LogSummary {
    pub path: PathBuf,
    pub recipe: RecipeDefinition,
    /// Event fields in file order; multi-line values keep their line breaks
    pub fields: Vec<(String, String)>,
}

impl LogSummary {
    pub fn read(path: &Path) -> Result<Self, ReadError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let recipe = decode_record(&text).map_err(|source| ReadError::Header {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            recipe,
            fields: parse_fields(&text),
        })
    }

    /// Latest value recorded for `key`
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.field("start").and_then(parse_timestamp)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.field("end").and_then(parse_timestamp)
    }

    pub fn duration(&self) -> Option<&str> {
        self.field("duration")
    }

    /// `(done, total)` from the cycle counter
    pub fn cycles_done(&self) -> Option<(u32, u32)> {
        let (done, total) = self.field("cycles_done")?.split_once('/')?;
        Some((done.trim().parse().ok()?, total.trim().parse().ok()?))
    }

    pub fn ending(&self) -> Option<Ending> {
        self.field("ending").and_then(|e| Ending::parse(e.trim()))
    }

    /// The run never wrote its terminal record
    pub fn is_interrupted(&self) -> bool {
        self.ending().is_none()
    }
}

fn parse_fields(text: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    let body = text.lines().skip_while(|l| *l != LOG_BANNER).skip(1);
    for line in body {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            if let Some((_, value)) = fields.last_mut() {
                value.push('\n');
                value.push_str(line);
            }
            continue;
        }
        let (key, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        fields.push((key.to_string(), value.trim_start().to_string()));
    }
    fields
}

/// Progress logs under `root`, oldest first
pub fn list_logs(root: &Path) -> io::Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut logs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            logs.push(path);
        }
    }
    logs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(logs)
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
