// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The sweep: select idle jobs, archive each one, confirm, then delete.
//!
//! Everything runs on the calling thread, one job at a time. Deletion walks
//! the list of jobs the archival stage actually wrote, so nothing is deleted
//! without an archive from the same run. The first deletion failure ends the
//! run; later jobs stay in the control plane and on disk.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use reap_adapters::{ConnectorError, ControlPlane};
use reap_core::{format_local, select_candidates, CandidateSet, Clock, JobId, RetentionPolicy};
use thiserror::Error;
use tracing::{error, info};

use crate::archive::{ArchiveError, ExportDir};
use crate::gate::{self, Confirm, GateDecision};
use crate::report::{format_candidates, print_header};

/// Errors that end a sweep
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("setup failed: {0}")]
    Setup(#[source] ArchiveError),
    #[error("listing jobs failed: {0}")]
    Query(#[source] ConnectorError),
    #[error("exporting job '{job}' failed: {source}")]
    Export { job: String, source: ConnectorError },
    #[error("archiving job '{job}' failed: {source}")]
    Archive { job: String, source: ArchiveError },
    #[error("reading confirmation failed: {0}")]
    Confirm(#[source] io::Error),
    #[error("deleting job '{job}' failed: {source}")]
    Delete { job: String, id: JobId, source: ConnectorError },
}

/// Everything a sweep needs from configuration
#[derive(Debug, Clone)]
pub struct SweepSettings {
    pub policy: RetentionPolicy,
    pub export_dir: PathBuf,
    /// Run directory name prefix
    pub dir_prefix: String,
}

/// A job whose export landed on disk in this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedJob {
    pub id: JobId,
    pub name: String,
    pub path: PathBuf,
}

/// How a sweep that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// No job matched; no run directory was created
    NothingToDo { total: usize },
    DryRun { run_dir: PathBuf, archived: Vec<ArchivedJob> },
    Declined { run_dir: PathBuf, archived: Vec<ArchivedJob> },
    Deleted { run_dir: PathBuf, deleted: Vec<ArchivedJob> },
}

/// Listing plus selection, shared by `sweep` and read-only previews
#[derive(Debug, Clone)]
pub struct Survey {
    /// Jobs the control plane reported
    pub total: usize,
    pub candidates: CandidateSet,
}

/// List every job and select the candidates. Read-only.
pub fn survey(
    connector: &impl ControlPlane,
    policy: &RetentionPolicy,
    clock: &impl Clock,
) -> Result<Survey, SweepError> {
    let jobs = connector.list_jobs().map_err(SweepError::Query)?;
    let total = jobs.len();
    let candidates = select_candidates(jobs, policy, clock);
    info!(total, candidates = candidates.len(), "selected idle jobs");
    Ok(Survey { total, candidates })
}

pub struct Sweep<'a, C, K> {
    connector: &'a C,
    clock: &'a K,
    settings: &'a SweepSettings,
}

impl<'a, C: ControlPlane, K: Clock> Sweep<'a, C, K> {
    pub fn new(connector: &'a C, clock: &'a K, settings: &'a SweepSettings) -> Self {
        Self { connector, clock, settings }
    }

    /// Run the whole pipeline, writing progress to `out`.
    pub fn run(
        &self,
        confirm: &mut impl Confirm,
        out: &mut impl Write,
    ) -> Result<SweepOutcome, SweepError> {
        let started_at_ms = self.clock.epoch_ms();
        let policy = &self.settings.policy;

        let export_dir = ExportDir::create(&self.settings.export_dir).map_err(SweepError::Setup)?;
        let _ = writeln!(out, "\nExporting resources to {}", export_dir.path().display());

        print_header(out, "Retrieving all jobs");
        let Survey { total, candidates } = survey(self.connector, policy, self.clock)?;
        let _ = writeln!(out, "Total jobs retrieved: {}", total);

        print_header(
            out,
            &format!("Retrieving inactive jobs finished before {}", format_local(candidates.cutoff_ms())),
        );
        format_candidates(out, &candidates);
        if candidates.is_empty() {
            let _ = writeln!(out, "Nothing to export or delete");
            return Ok(SweepOutcome::NothingToDo { total });
        }

        let (run_dir, archived) = self.archive(&export_dir, &candidates, started_at_ms, out)?;

        let question = format!("Do you want to proceed with deletion of {} job(s)? (Y/N)", archived.len());
        match gate::decide(policy, confirm, &question).map_err(SweepError::Confirm)? {
            GateDecision::DryRun => {
                info!(archived = archived.len(), "dry run, skipping deletion");
                print_header(out, "Dry run. No jobs deleted");
                let _ = writeln!(out, "{} job(s) archived to {}", archived.len(), run_dir.display());
                Ok(SweepOutcome::DryRun { run_dir, archived })
            }
            GateDecision::Declined => {
                info!(archived = archived.len(), "deletion declined");
                print_header(out, "Sweep halted. No jobs deleted");
                let _ = writeln!(out, "{} job(s) archived to {}", archived.len(), run_dir.display());
                Ok(SweepOutcome::Declined { run_dir, archived })
            }
            GateDecision::Proceed => {
                let deleted = self.delete(archived, out)?;
                print_header(out, "Finished");
                let _ = writeln!(
                    out,
                    "{} job(s) archived to {} and deleted",
                    deleted.len(),
                    run_dir.display()
                );
                Ok(SweepOutcome::Deleted { run_dir, deleted })
            }
        }
    }

    fn archive(
        &self,
        export_dir: &ExportDir,
        candidates: &CandidateSet,
        started_at_ms: u64,
        out: &mut impl Write,
    ) -> Result<(PathBuf, Vec<ArchivedJob>), SweepError> {
        print_header(out, "Exporting Jobs");
        let run = export_dir
            .start_run(&self.settings.dir_prefix, started_at_ms)
            .map_err(SweepError::Setup)?;
        info!(path = %run.path().display(), count = candidates.len(), "archiving jobs");

        let mut archived = Vec::with_capacity(candidates.len());
        for job in candidates {
            let _ = writeln!(out, "Exporting Job '{}'", job.name);
            let payload = self
                .connector
                .export_jobs(std::slice::from_ref(&job.id))
                .map_err(|source| SweepError::Export { job: job.name.clone(), source })?;
            let path = run
                .write(&job.name, &payload)
                .map_err(|source| SweepError::Archive { job: job.name.clone(), source })?;
            archived.push(ArchivedJob { id: job.id.clone(), name: job.name.clone(), path });
        }
        Ok((run.path().to_path_buf(), archived))
    }

    fn delete(
        &self,
        archived: Vec<ArchivedJob>,
        out: &mut impl Write,
    ) -> Result<Vec<ArchivedJob>, SweepError> {
        print_header(out, "Deleting Jobs");
        for job in &archived {
            let _ = writeln!(out, "Deleting Job '{}'", job.name);
            if let Err(source) = self.connector.delete_job(&job.id) {
                error!(job = %job.name, id = %job.id, error = %source, "deletion failed, stopping");
                return Err(SweepError::Delete { job: job.name.clone(), id: job.id.clone(), source });
            }
        }
        info!(deleted = archived.len(), "deleted jobs");
        Ok(archived)
    }
}

impl SweepOutcome {
    /// Run directory, when one was created
    pub fn run_dir(&self) -> Option<&Path> {
        match self {
            Self::NothingToDo { .. } => None,
            Self::DryRun { run_dir, .. }
            | Self::Declined { run_dir, .. }
            | Self::Deleted { run_dir, .. } => Some(run_dir),
        }
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
