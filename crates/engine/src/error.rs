// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that prevent a run from starting

use ald_core::ValidationError;
use ald_storage::LogError;
use thiserror::Error;

/// Errors returned by [`crate::Sequencer::start`]
///
/// Failures after the run has started are reported through the observer.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid recipe: {0}")]
    Validation(#[from] ValidationError),
    #[error("another run is already active")]
    ConcurrentRun,
    #[error("cannot start run: {0}")]
    Log(#[from] LogError),
}
