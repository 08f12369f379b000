// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress-log header codec
//!
//! The header record stores a whole recipe on one pipe-delimited line under a
//! fixed column line, so any log can be re-imported as a recipe.

use crate::actuator::ActuatorSet;
use crate::recipe::{RecipeDefinition, Stage, Step};
use thiserror::Error;

pub const RECIPE_BANNER: &str = "Recipe-----------------------";
pub const LOG_BANNER: &str = "Log--------------------------";

/// Legacy column names, in field order
pub const COLUMNS: [&str; 9] = [
    "recipe", "initgas", "wait", "fingas", "waitf", "N", "Nsteps", "valves", "times",
];

const FIELD_SEP: char = '|';
const LIST_SEP: char = ',';
const STEP_SEP: char = ';';

#[derive(Debug, Error, PartialEq)]
pub enum HeaderError {
    #[error("no recipe header found")]
    Missing,
    #[error("unexpected header columns: {0:?}")]
    UnknownColumns(String),
    #[error("expected {expected} header fields, found {0}", expected = COLUMNS.len())]
    FieldCount(usize),
    #[error("invalid value for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Nsteps is {declared} but found {steps} step(s) and {durations} duration(s)")]
    StepCountMismatch {
        declared: usize,
        steps: usize,
        durations: usize,
    },
}

/// The column line: `recipe|initgas|...|times`
pub fn column_line() -> String {
    COLUMNS.join("|")
}

/// Encode a recipe as the header data line (no trailing newline)
pub fn encode_header(recipe: &RecipeDefinition) -> String {
    let steps = recipe
        .steps
        .iter()
        .map(|s| s.actuators.joined(&STEP_SEP.to_string()))
        .collect::<Vec<_>>()
        .join(&LIST_SEP.to_string());
    // `{:?}` keeps a decimal point on whole numbers and round-trips exactly
    let durations = recipe
        .steps
        .iter()
        .map(|s| format!("{:?}", s.duration))
        .collect::<Vec<_>>()
        .join(&LIST_SEP.to_string());

    [
        recipe.name.clone(),
        recipe.init.actuators.joined(&LIST_SEP.to_string()),
        recipe.init.wait.to_string(),
        recipe.finalize.actuators.joined(&LIST_SEP.to_string()),
        recipe.finalize.wait.to_string(),
        recipe.cycles.to_string(),
        recipe.steps.len().to_string(),
        steps,
        durations,
    ]
    .join(&FIELD_SEP.to_string())
}

/// The full header block that opens a progress log
pub fn header_block(recipe: &RecipeDefinition) -> String {
    format!(
        "{RECIPE_BANNER}\n\n{}\n{}\n\n{LOG_BANNER}\n",
        column_line(),
        encode_header(recipe)
    )
}

/// Decode a column line and its data line back into a recipe
pub fn decode_header(columns: &str, data: &str) -> Result<RecipeDefinition, HeaderError> {
    let columns = columns.trim_end_matches(['\r', '\n']);
    if columns != column_line() {
        return Err(HeaderError::UnknownColumns(columns.to_string()));
    }

    let data = data.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = data.split(FIELD_SEP).collect();
    let &[name, init_ids, init_wait, final_ids, final_wait, cycles, step_count, steps, durations] =
        fields.as_slice()
    else {
        return Err(HeaderError::FieldCount(fields.len()));
    };

    let cycles = parse_count("N", cycles)?;
    let declared = parse_count("Nsteps", step_count)? as usize;

    let (step_sets, step_durations) = if declared == 0 && steps.is_empty() && durations.is_empty()
    {
        (Vec::new(), Vec::new())
    } else {
        let sets: Vec<ActuatorSet> = steps.split(LIST_SEP).map(|s| parse_ids(s, STEP_SEP)).collect();
        let secs = durations
            .split(LIST_SEP)
            .map(|d| parse_seconds("times", d))
            .collect::<Result<Vec<_>, _>>()?;
        (sets, secs)
    };
    if step_sets.len() != declared || step_durations.len() != declared {
        return Err(HeaderError::StepCountMismatch {
            declared,
            steps: step_sets.len(),
            durations: step_durations.len(),
        });
    }

    Ok(RecipeDefinition {
        name: name.to_string(),
        init: Stage::new(parse_ids(init_ids, LIST_SEP), parse_seconds("wait", init_wait)?),
        steps: step_sets
            .into_iter()
            .zip(step_durations)
            .map(|(actuators, duration)| Step::new(actuators, duration))
            .collect(),
        cycles,
        finalize: Stage::new(
            parse_ids(final_ids, LIST_SEP),
            parse_seconds("waitf", final_wait)?,
        ),
    })
}

/// Find the header in a complete log text and decode it
pub fn decode_record(text: &str) -> Result<RecipeDefinition, HeaderError> {
    let mut lines = text.lines();
    let column_prefix = format!("{}{FIELD_SEP}", COLUMNS[0]);
    while let Some(line) = lines.next() {
        if line.starts_with(&column_prefix) {
            let data = lines.next().ok_or(HeaderError::Missing)?;
            return decode_header(line, data);
        }
        if line == LOG_BANNER {
            break;
        }
    }
    Err(HeaderError::Missing)
}

fn parse_ids(field: &str, sep: char) -> ActuatorSet {
    field
        .split(sep)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, HeaderError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| HeaderError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_seconds(field: &'static str, value: &str) -> Result<f64, HeaderError> {
    match value.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(HeaderError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
