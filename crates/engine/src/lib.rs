// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ald-engine: the recipe sequencer
//!
//! Drives one recipe from Idle to Completed or Aborted, issuing actuator
//! commands, pacing countdowns and keeping the progress log current.

mod abort;
mod error;
mod events;
mod sequencer;

pub use abort::AbortHandle;
pub use error::RunError;
pub use events::{InvalidTransition, Observer, Phase, PhaseEvent, RunEvent};
pub use sequencer::{AbortReason, RunReport, Sequencer, SequencerConfig};
