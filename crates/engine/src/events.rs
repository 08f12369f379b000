// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run phases and observer events

use ald_core::{ActuatorCommand, ActuatorId, RecipeWarning};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Initializing,
    Running,
    Finalizing,
    Completed,
    Aborted,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Completed | Phase::Aborted)
    }

    /// Next phase, or an error for a move the state machine does not allow
    pub fn transition(self, event: PhaseEvent) -> Result<Phase, InvalidTransition> {
        match (self, event) {
            (Phase::Idle, PhaseEvent::Start) => Ok(Phase::Initializing),
            (Phase::Initializing, PhaseEvent::BeginCycles) => Ok(Phase::Running),
            // Zero cycles skip Running entirely
            (Phase::Initializing | Phase::Running, PhaseEvent::CyclesDone) => Ok(Phase::Finalizing),
            (Phase::Finalizing, PhaseEvent::Finish) => Ok(Phase::Completed),
            (Phase::Initializing | Phase::Running | Phase::Finalizing, PhaseEvent::Abort) => {
                Ok(Phase::Aborted)
            }
            (from, event) => Err(InvalidTransition { from, event }),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Initializing => "initializing",
            Phase::Running => "running",
            Phase::Finalizing => "finalizing",
            Phase::Completed => "completed",
            Phase::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Inputs to [`Phase::transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Start,
    BeginCycles,
    CyclesDone,
    Finish,
    Abort,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid transition from {from} on {event:?}")]
pub struct InvalidTransition {
    pub from: Phase,
    pub event: PhaseEvent,
}

/// Structured notification delivered to the observer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// Phase change, step change or countdown tick
    Progress {
        phase: Phase,
        /// Zero-based; set while running
        cycle: Option<u32>,
        /// Zero-based; set while running
        step: Option<usize>,
        remaining_step: f64,
        remaining_total: f64,
    },
    Warning { warning: RecipeWarning },
    ActuatorFailed {
        id: ActuatorId,
        command: ActuatorCommand,
        error: String,
    },
    LogWriteFailed { error: String },
}

/// Receives run events; the engine never depends on how they are rendered
pub trait Observer {
    fn notify(&mut self, event: &RunEvent);
}

impl<F: FnMut(&RunEvent)> Observer for F {
    fn notify(&mut self, event: &RunEvent) {
        self(event)
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
