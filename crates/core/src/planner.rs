// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transition planner
//!
//! Computes the minimal actuator commands between two configurations.
//! Actuators active on both sides of a boundary receive no command.

use crate::actuator::ActuatorSet;
use crate::recipe::{Position, RecipeDefinition};

/// Commands needed to move from one actuator configuration to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub activate: ActuatorSet,
    pub deactivate: ActuatorSet,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.activate.is_empty() && self.deactivate.is_empty()
    }

    pub fn command_count(&self) -> usize {
        self.activate.len() + self.deactivate.len()
    }

    /// Keep only the deactivations (the release at the end of a step)
    pub fn release_only(self) -> Self {
        Self {
            activate: ActuatorSet::new(),
            deactivate: self.deactivate,
        }
    }
}

/// `activate = next - current`, `deactivate = current - next`
pub fn plan(current: &ActuatorSet, next: &ActuatorSet) -> Transition {
    Transition {
        activate: next.difference(current),
        deactivate: current.difference(next),
    }
}

/// Actuator set that follows the step at `pos`
///
/// Inside a cycle this is the next step; after the last step it wraps to
/// the first step of the next cycle, or to the finalization set after the
/// last cycle.
pub fn successor(recipe: &RecipeDefinition, pos: Position) -> &ActuatorSet {
    if let Some(step) = recipe.steps.get(pos.step + 1) {
        return &step.actuators;
    }
    match recipe.steps.first() {
        Some(first) if pos.cycle + 1 < recipe.cycles => &first.actuators,
        _ => &recipe.finalize.actuators,
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
