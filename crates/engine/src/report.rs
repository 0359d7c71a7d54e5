// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console rendering of a sweep for operator review.

use std::io::Write;

use reap_core::{format_local, CandidateSet};

const DIVIDER_WIDTH: usize = 60;

/// Section header framed by dash dividers.
pub fn print_header(out: &mut impl Write, title: &str) {
    let divider = "-".repeat(DIVIDER_WIDTH);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", divider);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", divider);
}

/// One line per candidate (name and local finish time of its last run), then
/// the total.
pub fn format_candidates(out: &mut impl Write, candidates: &CandidateSet) {
    let width = candidates.iter().map(|j| j.name.chars().count()).max().unwrap_or(0);
    for job in candidates {
        let finished = job.last_finished_ms().map(format_local).unwrap_or_default();
        let _ = writeln!(out, "  {:<width$}  {}", job.name, finished, width = width);
    }
    let _ = writeln!(out, "Jobs targeted for export/deletion: {}", candidates.len());
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
