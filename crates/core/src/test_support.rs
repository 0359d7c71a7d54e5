// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::job::{Job, JobStatus, RunRecord};
use crate::retention::MS_PER_DAY;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job records.
pub mod strategies {
    use crate::job::{Job, JobId, JobStatus, RunRecord};
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Active),
            Just(JobStatus::Inactive),
            Just(JobStatus::Activating),
            Just(JobStatus::Deactivating),
            Just(JobStatus::InactiveError),
            Just(JobStatus::ActivationError),
            Just(JobStatus::Unknown),
        ]
    }

    /// Labels drawn from a small pool so required-label hits are common.
    pub fn arb_labels() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop::sample::select(vec!["delete", "east", "west", "keep"]).prop_map(String::from),
            0..3,
        )
    }

    /// Run history spanning roughly the two years before `now_ms`, with the
    /// occasional run that never recorded a finish time.
    pub fn arb_history(now_ms: u64) -> impl Strategy<Value = Vec<RunRecord>> {
        prop::collection::vec(
            prop_oneof![
                4 => (0..=now_ms.min(800 * crate::MS_PER_DAY))
                    .prop_map(move |ago| RunRecord::finished_at(now_ms - ago)),
                1 => Just(RunRecord::unfinished()),
            ],
            0..4,
        )
    }

    pub fn arb_job(now_ms: u64) -> impl Strategy<Value = Job> {
        ("[a-z]{1,8}(/[a-z]{1,8})?", arb_job_status(), arb_history(now_ms), arb_labels())
            .prop_map(|(name, status, history, labels)| Job {
                id: JobId::new(format!("{name}:org")),
                name,
                status,
                history,
                labels,
            })
    }
}

// ── Job factory functions ─────────────────────────────────────────────────

/// An inactive job whose only run finished `days_ago` days before `now_ms`.
pub fn idle_job(name: &str, now_ms: u64, days_ago: u64) -> Job {
    Job::builder()
        .id(format!("{name}:org"))
        .name(name)
        .status(JobStatus::Inactive)
        .history(vec![RunRecord::finished_at(now_ms - days_ago * MS_PER_DAY)])
        .build()
}

/// An active job that last ran `days_ago` days before `now_ms`.
pub fn active_job(name: &str, now_ms: u64, days_ago: u64) -> Job {
    Job { status: JobStatus::Active, ..idle_job(name, now_ms, days_ago) }
}

/// An inactive job that never ran.
pub fn never_run_job(name: &str) -> Job {
    Job::builder().id(format!("{name}:org")).name(name).build()
}
