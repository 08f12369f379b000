// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown sequence
//!
//! A finite, one-shot iterator of observations: one per whole second while
//! at least a second remains, then one for the sub-second remainder. Each
//! tick says how long to wait before the next observation; the caller does
//! the waiting and may stop early between ticks.

use std::time::Duration;

/// One countdown observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Seconds left in this countdown, before waiting
    pub remaining_step: f64,
    /// Seconds left in the whole run, before waiting
    pub remaining_total: f64,
    /// How long to wait after this observation
    pub wait: Duration,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    remaining_step: f64,
    remaining_total: f64,
}

impl Countdown {
    /// Count down `seconds`, with `overall` seconds left in the run
    pub fn new(seconds: f64, overall: f64) -> Self {
        Self {
            remaining_step: sanitize(seconds),
            remaining_total: sanitize(overall),
        }
    }
}

impl Iterator for Countdown {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.remaining_step <= 0.0 {
            return None;
        }
        let wait = self.remaining_step.min(1.0);
        let tick = Tick {
            remaining_step: self.remaining_step,
            remaining_total: self.remaining_total,
            wait: Duration::try_from_secs_f64(wait).unwrap_or(Duration::ZERO),
        };
        self.remaining_step -= wait;
        self.remaining_total = (self.remaining_total - wait).max(0.0);
        Some(tick)
    }
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "countdown_tests.rs"]
mod tests;
