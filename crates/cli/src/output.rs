// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal and JSON rendering

use ald_core::timefmt::{format_clock, format_step_timer, format_timedelta};
use ald_core::RecipeDefinition;
use ald_engine::{Observer, Phase, RunEvent, RunReport};
use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use std::io::{IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Print output in the specified format
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// Time estimate shown before a run and by `ald check`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename = "estimate")]
pub struct Estimate {
    pub recipe: String,
    pub cycles: u32,
    pub steps: usize,
    pub cycle_seconds: f64,
    pub total_seconds: f64,
    /// Expected wall-clock ending, `HH:MM`
    pub ending_time: Option<String>,
}

impl Estimate {
    pub fn new(recipe: &RecipeDefinition, now: NaiveDateTime) -> Self {
        let total_seconds = recipe.total_seconds();
        Self {
            recipe: recipe.name.clone(),
            cycles: recipe.cycles,
            steps: recipe.steps.len(),
            cycle_seconds: recipe.cycle_seconds(),
            total_seconds,
            ending_time: ending_time(now, total_seconds),
        }
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Recipe:      {}", self.recipe)?;
        writeln!(f, "Cycles:      {} x {} steps", self.cycles, self.steps)?;
        writeln!(f, "Cycle time:  {}", format_timedelta(self.cycle_seconds))?;
        write!(f, "Total time:  {}", format_clock(self.total_seconds))?;
        if let Some(ending) = &self.ending_time {
            write!(f, "\nEnding time: {}", ending)?;
        }
        Ok(())
    }
}

/// Wall-clock `HH:MM` at which a run of `total_seconds` started at `now` ends
pub fn ending_time(now: NaiveDateTime, total_seconds: f64) -> Option<String> {
    let millis = (total_seconds * 1000.0).round();
    if !millis.is_finite() || millis < 0.0 || millis >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    now.checked_add_signed(delta)
        .map(|end| end.format("%H:%M").to_string())
}

/// Observer that renders run events on the terminal
pub struct ProgressPrinter<'a> {
    recipe: &'a RecipeDefinition,
    format: OutputFormat,
    /// Last (phase, cycle, step) announced
    shown: Option<(Phase, Option<u32>, Option<usize>)>,
    /// Rewrite a countdown status line on stderr
    live: bool,
}

impl<'a> ProgressPrinter<'a> {
    pub fn new(recipe: &'a RecipeDefinition, format: OutputFormat) -> Self {
        Self {
            recipe,
            format,
            shown: None,
            live: format == OutputFormat::Text && std::io::stderr().is_terminal(),
        }
    }

    /// Line announcing a phase or step change, or a reported problem
    pub fn render(&mut self, event: &RunEvent) -> Option<String> {
        match event {
            RunEvent::Progress {
                phase,
                cycle,
                step,
                remaining_total,
                ..
            } => {
                let key = (*phase, *cycle, *step);
                if self.shown == Some(key) {
                    return None;
                }
                self.shown = Some(key);
                self.describe(*phase, *cycle, *step, *remaining_total)
            }
            RunEvent::Warning { warning } => Some(format!("warning: {}", warning)),
            RunEvent::ActuatorFailed { error, .. } => Some(format!("error: {}", error)),
            RunEvent::LogWriteFailed { error } => {
                Some(format!("warning: progress log write failed: {}", error))
            }
        }
    }

    fn describe(
        &self,
        phase: Phase,
        cycle: Option<u32>,
        step: Option<usize>,
        remaining_total: f64,
    ) -> Option<String> {
        let recipe = self.recipe;
        match (phase, cycle, step) {
            (Phase::Initializing, _, _) => Some(format!(
                "initialization: {}, {} s",
                recipe.init.actuators, recipe.init.wait
            )),
            (Phase::Running, Some(cycle), Some(step)) => {
                let current = recipe.steps.get(step)?;
                Some(format!(
                    "cycle {}/{}  step {}/{}  {}, {} s  (remaining {})",
                    cycle + 1,
                    recipe.cycles,
                    step + 1,
                    recipe.steps.len(),
                    current.actuators,
                    current.duration,
                    format_clock(remaining_total)
                ))
            }
            (Phase::Finalizing, _, _) => Some(format!(
                "finalization: {}, {} s",
                recipe.finalize.actuators, recipe.finalize.wait
            )),
            (Phase::Completed, _, _) => Some("completed".to_string()),
            (Phase::Aborted, _, _) => Some("aborted: all actuators closed".to_string()),
            _ => None,
        }
    }

    fn tick(&self, remaining_step: f64, remaining_total: f64) {
        let mut stderr = std::io::stderr();
        let _ = write!(
            stderr,
            "\r  step {}  total {} ",
            format_step_timer(remaining_step),
            format_clock(remaining_total)
        );
        let _ = stderr.flush();
    }

    /// Print the closing summary
    pub fn finish(&self, report: &RunReport) {
        match self.format {
            OutputFormat::Text => {
                if self.live {
                    eprintln!();
                }
                println!(
                    "Run {}: {}/{} cycles, {} actuator failures",
                    report.ending,
                    report.cycles_completed,
                    self.recipe.cycles,
                    report.actuator_failures
                );
                println!("Log: {}", report.log_path.display());
            }
            OutputFormat::Json => {
                let finished = serde_json::json!({ "event": "finished", "report": report });
                println!("{}", finished);
            }
        }
    }
}

impl Observer for ProgressPrinter<'_> {
    fn notify(&mut self, event: &RunEvent) {
        if self.format == OutputFormat::Json {
            if let Ok(json) = serde_json::to_string(event) {
                println!("{}", json);
            }
            return;
        }
        if let Some(line) = self.render(event) {
            if self.live {
                eprint!("\r");
            }
            println!("{}", line);
        }
        if let RunEvent::Progress {
            remaining_step,
            remaining_total,
            ..
        } = event
        {
            if self.live {
                self.tick(*remaining_step, *remaining_total);
            }
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
