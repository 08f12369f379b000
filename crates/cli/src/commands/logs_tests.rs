// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ald_core::{Ending, RecipeDefinition};
use ald_storage::{log_path, ProgressLog};
use chrono::NaiveDate;

fn write_log(root: &Path, finished: bool) -> PathBuf {
    let recipe = RecipeDefinition::purge();
    let start = NaiveDate::from_ymd_opt(2024, 5, 2)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    let path = log_path(root, &start, &recipe.name);
    let mut log = ProgressLog::open(&path).unwrap();
    log.append_header(&recipe).unwrap();
    log.append_start(&recipe, &start).unwrap();
    if finished {
        log.record_cycle(1, 1).unwrap();
        let end = start + chrono::TimeDelta::try_seconds(181).unwrap();
        log.finish(&start, &end, Ending::Normal).unwrap();
    }
    path
}

#[test]
fn finished_run_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path(), true);
    let record = RunRecord::from_summary(&LogSummary::read(&path).unwrap());

    assert_eq!(record.recipe, "Purge");
    assert_eq!(record.start.as_deref(), Some("2024-05-02-08:30:00"));
    assert_eq!(record.cycles_done.as_deref(), Some("1/1"));
    assert_eq!(record.end.as_deref(), Some("2024-05-02-08:33:01"));
    assert_eq!(record.duration.as_deref(), Some("0:03:01"));
    assert_eq!(record.ending, "normal");
}

#[test]
fn unfinished_run_is_interrupted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path(), false);
    let record = RunRecord::from_summary(&LogSummary::read(&path).unwrap());

    assert_eq!(record.ending, "interrupted");
    assert_eq!(record.end, None);
    assert!(record.to_string().contains("End:         -"));
}

#[test]
fn show_resolves_names_inside_log_root() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_log(dir.path(), true);
    let name = PathBuf::from(path.file_name().unwrap());

    assert_eq!(resolve(dir.path(), &name), Some(path.clone()));
    assert_eq!(resolve(dir.path(), &path), Some(path));
    assert_eq!(resolve(dir.path(), Path::new("missing.txt")), None);
}
