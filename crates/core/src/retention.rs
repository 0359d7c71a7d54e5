// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retention policy and the eligibility filter.
//!
//! A job is a removal candidate when it is `INACTIVE`, has run at least once,
//! its most recent run recorded a finish time before the cutoff, and, if a
//! label is required, it carries that label. Everything else is silently
//! skipped.

use crate::clock::Clock;
use crate::job::Job;
use serde::Serialize;

/// Milliseconds in one retention day
pub const MS_PER_DAY: u64 = 86_400_000;

/// What a single run is allowed to remove.
///
/// Built once from configuration and never changed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionPolicy {
    pub retention_days: u32,
    pub required_label: Option<String>,
    pub dry_run: bool,
}

impl RetentionPolicy {
    pub fn new(retention_days: u32) -> Self {
        Self { retention_days, required_label: None, dry_run: false }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.required_label = Some(label.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Jobs whose last run finished strictly before this instant are old enough.
    pub fn cutoff_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(u64::from(self.retention_days) * MS_PER_DAY)
    }

    /// Eligibility of a single job against a precomputed cutoff.
    pub fn is_eligible(&self, job: &Job, cutoff_ms: u64) -> bool {
        if !job.is_inactive() {
            return false;
        }
        // A last run without a finish time is never old enough
        let Some(finished_at_ms) = job.last_finished_ms() else {
            return false;
        };
        if finished_at_ms >= cutoff_ms {
            return false;
        }
        match &self.required_label {
            Some(label) => job.has_label(label),
            None => true,
        }
    }
}

/// Jobs selected for archival and removal in one run.
///
/// Order follows the collection the jobs were selected from. There is no
/// mutable access: archival and deletion both walk the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    jobs: Vec<Job>,
    cutoff_ms: u64,
}

impl CandidateSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn cutoff_ms(&self) -> u64 {
        self.cutoff_ms
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

/// Filter `jobs` down to the removal candidates for `policy` as of `clock`.
pub fn select_candidates(
    jobs: impl IntoIterator<Item = Job>,
    policy: &RetentionPolicy,
    clock: &impl Clock,
) -> CandidateSet {
    let cutoff_ms = policy.cutoff_ms(clock.epoch_ms());
    let jobs = jobs.into_iter().filter(|job| policy.is_eligible(job, cutoff_ms)).collect();
    CandidateSet { jobs, cutoff_ms }
}

#[cfg(test)]
#[path = "retention_tests.rs"]
mod tests;
