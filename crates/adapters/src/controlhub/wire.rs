// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON shapes of the job-runner REST API.
//!
//! Only the fields the retention rules read are modelled; everything else in
//! the payloads is ignored.

use reap_core::{Job, JobId, JobStatus, RunRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobJson {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub current_job_status: Option<JobStatusJson>,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobStatusJson {
    pub status: JobStatus,
}

/// One entry of `/job/{id}/history`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HistoryEntryJson {
    /// Missing, null or zero while a run has not finished
    #[serde(default)]
    pub finish_time: Option<u64>,
}

impl HistoryEntryJson {
    fn into_run(self) -> RunRecord {
        match self.finish_time {
            Some(ms) if ms > 0 => RunRecord::finished_at(ms),
            _ => RunRecord::unfinished(),
        }
    }
}

impl JobJson {
    /// Combine a listing entry with its fetched history.
    ///
    /// A job without a status block has never been activated and is treated
    /// as `INACTIVE`, matching how the control plane displays it.
    pub fn into_job(self, history: Vec<HistoryEntryJson>) -> Job {
        Job {
            id: JobId::new(self.id),
            name: self.name,
            status: self.current_job_status.map(|s| s.status).unwrap_or(JobStatus::Inactive),
            history: history.into_iter().map(HistoryEntryJson::into_run).collect(),
            labels: self.labels,
        }
    }
}
