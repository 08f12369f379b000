// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ald-core: recipe model and pure algorithms for the deposition controller
//!
//! This crate provides:
//! - Actuator identifiers, sets and the configured actuator universe
//! - Recipe definitions, presets and validation
//! - The progress-log header codec (recipe round trip)
//! - The transition planner and the countdown sequence
//! - Clock abstraction and configuration loading

pub mod actuator;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod header;
pub mod planner;
pub mod recipe;
pub mod timefmt;
pub mod validate;

pub use actuator::{ActuatorCommand, ActuatorId, ActuatorSet, Universe, UniverseError};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ActuatorConfig, Config, ConfigError, FailurePolicy};
pub use countdown::{Countdown, Tick};
pub use header::{decode_header, decode_record, encode_header, header_block, HeaderError};
pub use planner::{plan, successor, Transition};
pub use recipe::{Ending, Position, Positions, RecipeDefinition, RecipeError, Stage, Step};
pub use validate::{validate, RecipeWarning, StageRef, ValidationError};
