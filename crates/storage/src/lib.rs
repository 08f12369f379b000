// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ald-storage: progress log persistence and the run lock

mod lock;
mod progress_log;
mod reader;

pub use lock::{LockError, RunLock, LOCK_FILE};
pub use progress_log::{event_line, log_path, LogError, ProgressLog, KEY_WIDTH};
pub use reader::{list_logs, LogSummary, ReadError};
