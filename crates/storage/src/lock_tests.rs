// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn second_acquire_fails_while_held() {
    let dir = tempfile::tempdir().unwrap();
    let lock = RunLock::acquire(dir.path()).unwrap();
    assert!(matches!(
        RunLock::acquire(dir.path()),
        Err(LockError::Held(_))
    ));
    drop(lock);
    assert!(RunLock::acquire(dir.path()).is_ok());
}

#[test]
fn acquire_creates_directory_and_records_pid() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Logs");
    let lock = RunLock::acquire(&root).unwrap();
    let content = std::fs::read_to_string(lock.path()).unwrap();
    assert_eq!(content.trim(), std::process::id().to_string());
}
