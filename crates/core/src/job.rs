// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job records as reported by the control plane.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Control-plane identifier of a job definition.
    ///
    /// Export and delete requests are addressed by id; the job name is only
    /// used for display and archive file naming.
    pub struct JobId;
}

/// Lifecycle status of a job definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Active,
    Inactive,
    Activating,
    Deactivating,
    InactiveError,
    ActivationError,
    /// Any status this tool does not know about. Never eligible for removal.
    #[serde(other)]
    Unknown,
}

crate::simple_display! {
    JobStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Activating => "ACTIVATING",
        Deactivating => "DEACTIVATING",
        InactiveError => "INACTIVE_ERROR",
        ActivationError => "ACTIVATION_ERROR",
        Unknown => "UNKNOWN",
    }
}

/// One past run of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Completion time in epoch milliseconds, `None` while the run has not
    /// recorded one
    #[serde(default)]
    pub finished_at_ms: Option<u64>,
}

impl RunRecord {
    pub fn finished_at(finished_at_ms: u64) -> Self {
        Self { finished_at_ms: Some(finished_at_ms) }
    }

    /// A run with no recorded completion time.
    pub fn unfinished() -> Self {
        Self { finished_at_ms: None }
    }
}

/// A job definition with the attributes the retention rules look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub status: JobStatus,
    /// Run history, most recent first
    #[serde(default)]
    pub history: Vec<RunRecord>,
    /// Operator-assigned labels
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Job {
    /// The most recent run, if the job ever ran.
    pub fn last_run(&self) -> Option<&RunRecord> {
        self.history.first()
    }

    /// Finish time of the most recent run, if it ran and recorded one.
    pub fn last_finished_ms(&self) -> Option<u64> {
        self.last_run().and_then(|r| r.finished_at_ms)
    }

    pub fn is_inactive(&self) -> bool {
        self.status == JobStatus::Inactive
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: JobId = "job-1",
            name: String = "etl",
        }
        set {
            status: JobStatus = JobStatus::Inactive,
            history: Vec<RunRecord> = Vec::new(),
            labels: Vec<String> = Vec::new(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobBuilder {
    /// Shorthand for a single run that finished at `ms`.
    pub fn finished_at(self, ms: u64) -> Self {
        self.history(vec![RunRecord::finished_at(ms)])
    }

    /// Shorthand for a single label.
    pub fn label(self, label: &str) -> Self {
        self.labels(vec![label.to_string()])
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
