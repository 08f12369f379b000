// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only progress log with an in-place cycle counter
//!
//! The file is reopened in append mode for every write, so the atomic
//! rename used by the cycle counter patch never leaves a stale handle.

use ald_core::header::header_block;
use ald_core::timefmt::{format_timedelta, format_timestamp};
use ald_core::{Ending, RecipeDefinition};
use chrono::NaiveDateTime;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Width of the key column in event lines
pub const KEY_WIDTH: usize = 15;

const CYCLES_DONE: &str = "cycles_done";

/// Same-second runs of one recipe that can get their own log file
const MAX_NAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("progress log {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// `<root>/<YYYY-MM-DD-HH:MM:SS>_<recipe>.txt`
pub fn log_path(root: &Path, start: &NaiveDateTime, recipe: &str) -> PathBuf {
    root.join(format!("{}_{}.txt", format_timestamp(start), recipe))
}

/// One `key  value` line with the key in a fixed-width column
pub fn event_line(key: &str, value: &str) -> String {
    format!("{key:KEY_WIDTH$}  {value}")
}

/// `path` for the first attempt, `<stem>_<n>.<ext>` after that
fn numbered(path: &Path, attempt: u32) -> PathBuf {
    if attempt == 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, attempt, ext.to_string_lossy()),
        None => format!("{}_{}", stem, attempt),
    };
    path.with_file_name(name)
}

/// Persistent record of one run
#[derive(Debug)]
pub struct ProgressLog {
    path: PathBuf,
    cycles_done: Option<String>,
}

impl ProgressLog {
    /// Create a new log file, and its parent directories if absent
    ///
    /// An existing log is never reused: if `path` is taken, `_2`, `_3`, ...
    /// is appended to the file stem. [`ProgressLog::path`] is the file
    /// actually created.
    pub fn open(path: &Path) -> Result<Self, LogError> {
        let err = |source| LogError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(err)?;
        }
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let candidate = numbered(path, attempt);
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(_) => {
                    return Ok(Self {
                        path: candidate,
                        cycles_done: None,
                    })
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(err(e)),
            }
        }
        Err(err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "no free log file name",
        )))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the recipe header record
    pub fn append_header(&mut self, recipe: &RecipeDefinition) -> Result<(), LogError> {
        self.append(&header_block(recipe))
    }

    /// Append a block of `key  value` lines
    pub fn append_event(&mut self, fields: &[(&str, String)]) -> Result<(), LogError> {
        let block = fields
            .iter()
            .map(|(key, value)| event_line(key, value))
            .collect::<Vec<_>>()
            .join("\n");
        self.append(&block)
    }

    /// Write the start record
    pub fn append_start(
        &mut self,
        recipe: &RecipeDefinition,
        start: &NaiveDateTime,
    ) -> Result<(), LogError> {
        self.append_event(&[
            ("recipe", recipe.name.clone()),
            ("start", format_timestamp(start)),
            ("steps", steps_summary(recipe)),
            ("N", recipe.cycles.to_string()),
            ("time_per_cycle", format_timedelta(recipe.cycle_seconds())),
        ])
    }

    /// Record `done` of `total` cycles completed
    pub fn record_cycle(&mut self, done: u32, total: u32) -> Result<(), LogError> {
        let value = format!("{done}/{total}");
        let previous = self.cycles_done.clone();
        self.patch_cycle_counter(previous.as_deref(), &value)?;
        self.cycles_done = Some(value);
        Ok(())
    }

    /// Replace the `cycles_done` line holding `previous` with `new`
    ///
    /// The first value (`previous` is `None`) is appended. A patch is
    /// written to a temporary file in the same directory and renamed over
    /// the log. If the previous line cannot be found the new value is
    /// appended instead.
    pub fn patch_cycle_counter(
        &mut self,
        previous: Option<&str>,
        new: &str,
    ) -> Result<(), LogError> {
        let Some(previous) = previous else {
            return self.append_event(&[(CYCLES_DONE, new.to_string())]);
        };

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io(e))?;
        let old_line = event_line(CYCLES_DONE, previous);
        let lines: Vec<&str> = content.lines().collect();
        let Some(index) = lines.iter().rposition(|l| *l == old_line) else {
            tracing::warn!(path = %self.path.display(), previous, "cycles_done line missing, appending");
            return self.append_event(&[(CYCLES_DONE, new.to_string())]);
        };

        let new_line = event_line(CYCLES_DONE, new);
        let mut patched = String::with_capacity(content.len() + new.len());
        for (i, line) in lines.iter().enumerate() {
            patched.push_str(if i == index { new_line.as_str() } else { *line });
            patched.push('\n');
        }
        self.replace_contents(&patched)
    }

    /// Write the terminal record
    pub fn finish(
        &mut self,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
        ending: Ending,
    ) -> Result<(), LogError> {
        let seconds = (*end - *start).num_seconds().max(0) as f64;
        self.append_event(&[
            ("end", format_timestamp(end)),
            ("duration", format_timedelta(seconds)),
            ("ending", ending.to_string()),
        ])
    }

    fn append(&mut self, text: &str) -> Result<(), LogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io(e))?;
        writeln!(file, "{text}").map_err(|e| self.io(e))?;
        file.sync_all().map_err(|e| self.io(e))
    }

    fn replace_contents(&self, content: &str) -> Result<(), LogError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io(e))?;
        // The temp file is created 0600; keep the log's own mode across the rename
        let permissions = std::fs::metadata(&self.path)
            .map_err(|e| self.io(e))?
            .permissions();
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| self.io(e))?;
        tmp.write_all(content.as_bytes()).map_err(|e| self.io(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io(e))?;
        tmp.persist(&self.path).map_err(|e| self.io(e.error))?;
        Ok(())
    }

    fn io(&self, source: io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Human-readable step list of the start record
fn steps_summary(recipe: &RecipeDefinition) -> String {
    let mut lines = vec![format!(
        "  - Init.:       {}, {} s",
        recipe.init.actuators.joined(" + "),
        recipe.init.wait
    )];
    lines.extend(recipe.steps.iter().map(|step| {
        format!(
            "    - {:<11}{:.3} s",
            step.actuators.joined(" + "),
            step.duration
        )
    }));
    lines.push(format!(
        "  - Final.:      {}, {} s",
        recipe.finalize.actuators.joined(" + "),
        recipe.finalize.wait
    ));
    format!("\n{}", lines.join("\n"))
}

#[cfg(test)]
#[path = "progress_log_tests.rs"]
mod tests;
