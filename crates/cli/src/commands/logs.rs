// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ald logs` - Inspect recorded runs

use ald_core::timefmt::format_timestamp;
use ald_core::Config;
use ald_storage::{list_logs, LogSummary};
use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::error::AldError;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommand,

    /// JSON output
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum LogsCommand {
    /// List progress logs under the log root, oldest first
    List,
    /// Show the record of one run
    Show {
        /// Log file, or its name inside the log root
        log: PathBuf,
    },
}

/// One recorded run as shown by `ald logs`
#[derive(Debug, Serialize)]
pub struct RunRecord {
    pub log: PathBuf,
    pub recipe: String,
    pub start: Option<String>,
    /// `done/total`
    pub cycles_done: Option<String>,
    pub end: Option<String>,
    pub duration: Option<String>,
    /// `normal`, `forced`, or `interrupted` when the run never finished
    pub ending: String,
}

impl RunRecord {
    fn from_summary(summary: &LogSummary) -> Self {
        let ending = match summary.ending() {
            Some(ending) => ending.to_string(),
            None => "interrupted".to_string(),
        };
        Self {
            log: summary.path.clone(),
            recipe: summary.recipe.name.clone(),
            start: summary.start().map(|t| format_timestamp(&t)),
            cycles_done: summary
                .cycles_done()
                .map(|(done, total)| format!("{}/{}", done, total)),
            end: summary.end().map(|t| format_timestamp(&t)),
            duration: summary.duration().map(str::to_string),
            ending,
        }
    }

    fn file_name(&self) -> String {
        self.log
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Table row for `ald logs list`
struct Row<'a>(&'a RunRecord);

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Log:         {}", self.log.display())?;
        writeln!(f, "Recipe:      {}", self.recipe)?;
        writeln!(f, "Start:       {}", dash(&self.start))?;
        writeln!(f, "Cycles done: {}", dash(&self.cycles_done))?;
        writeln!(f, "End:         {}", dash(&self.end))?;
        writeln!(f, "Duration:    {}", dash(&self.duration))?;
        write!(f, "Ending:      {}", self.ending)
    }
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(
            f,
            "{:<20} {:<16} {:<10} {:<12} {}",
            dash(&r.start),
            r.recipe,
            dash(&r.cycles_done),
            r.ending,
            r.file_name()
        )
    }
}

pub fn handle(args: LogsArgs, config: &Config) -> Result<ExitCode> {
    let format = OutputFormat::from_json_flag(args.json);
    match args.command {
        LogsCommand::List => list(&config.log_root, format)?,
        LogsCommand::Show { log } => show(&config.log_root, &log, format)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn list(log_root: &Path, format: OutputFormat) -> Result<()> {
    let mut records = Vec::new();
    for path in list_logs(log_root)? {
        match LogSummary::read(&path) {
            Ok(summary) => records.push(RunRecord::from_summary(&summary)),
            Err(e) => eprintln!("warning: skipping {}: {}", path.display(), e),
        }
    }

    if format == OutputFormat::Json {
        output::print_list(&records, format);
        return Ok(());
    }
    if records.is_empty() {
        println!("No logs in {}", log_root.display());
        return Ok(());
    }
    println!(
        "{:<20} {:<16} {:<10} {:<12} LOG",
        "START", "RECIPE", "CYCLES", "ENDING"
    );
    for record in &records {
        println!("{}", Row(record));
    }
    Ok(())
}

fn show(log_root: &Path, log: &Path, format: OutputFormat) -> Result<()> {
    let path = resolve(log_root, log).ok_or_else(|| AldError::log_not_found(log))?;
    let summary = LogSummary::read(&path)?;
    output::print(&RunRecord::from_summary(&summary), format);
    Ok(())
}

/// `log` as given, or relative to the log root
fn resolve(log_root: &Path, log: &Path) -> Option<PathBuf> {
    if log.is_file() {
        return Some(log.to_path_buf());
    }
    let inside = log_root.join(log);
    inside.is_file().then_some(inside)
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
