// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time and duration formatting used by progress logs and displays

use chrono::NaiveDateTime;

/// Wall-clock timestamp format of log names and start/end records
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok()
}

/// Duration as `H:MM:SS[.ffffff]`, prefixed with `N day(s), ` past 24 hours
pub fn format_timedelta(seconds: f64) -> String {
    let micros_total = (seconds.max(0.0) * 1_000_000.0).round() as u64;
    let micros = micros_total % 1_000_000;
    let whole = micros_total / 1_000_000;
    let days = whole / 86_400;
    let rest = whole % 86_400;
    let (h, m, s) = (rest / 3600, (rest % 3600) / 60, rest % 60);

    let mut out = String::new();
    if days > 0 {
        let unit = if days == 1 { "day" } else { "days" };
        out.push_str(&format!("{days} {unit}, "));
    }
    out.push_str(&format!("{h}:{m:02}:{s:02}"));
    if micros > 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}

/// Whole seconds as `HH:MM:SS`; hours keep counting past 24
pub fn format_clock(seconds: f64) -> String {
    let whole = seconds.max(0.0).round() as u64;
    format!(
        "{:02}:{:02}:{:02}",
        whole / 3600,
        (whole % 3600) / 60,
        whole % 60
    )
}

/// Step countdown as `MM:SS:mmm`
pub fn format_step_timer(seconds: f64) -> String {
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    format!(
        "{:02}:{:02}:{:03}",
        millis / 60_000,
        (millis / 1000) % 60,
        millis % 1000
    )
}

#[cfg(test)]
#[path = "timefmt_tests.rs"]
mod tests;
