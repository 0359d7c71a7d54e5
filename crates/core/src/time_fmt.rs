// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable rendering of epoch-millisecond timestamps.

use chrono::{Local, TimeZone};

/// Report format for run completion times
const REPORT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Run directory stamp. Filesystem-safe on every platform, millisecond
/// resolution so back-to-back runs land in distinct directories.
const DIR_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S-%3f";

/// Format `epoch_ms` as `YYYY-MM-DD HH:MM:SS` in local time.
pub fn format_local(epoch_ms: u64) -> String {
    format_in(&Local, epoch_ms, REPORT_FORMAT)
}

/// Stamp used to name a run's export directory, in local time.
pub fn run_dir_stamp(epoch_ms: u64) -> String {
    format_in(&Local, epoch_ms, DIR_STAMP_FORMAT)
}

/// Format `epoch_ms` in an arbitrary zone.
///
/// Out-of-range values fall back to the raw millisecond count.
pub fn format_in<Tz>(tz: &Tz, epoch_ms: u64, fmt: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    i64::try_from(epoch_ms)
        .ok()
        .and_then(|ms| tz.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
