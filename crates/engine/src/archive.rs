// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local archive of exported job definitions.
//!
//! Layout: `<base>/<prefix>-<stamp>/<job name with '/' as '_'>.zip`.
//! Two jobs whose names sanitize to the same file overwrite each other
//! within a run; the last export wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reap_core::run_dir_stamp;
use thiserror::Error;
use tracing::debug;

/// Errors from export directory and archive file operations
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("cannot create export directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot write archive {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Archive file name for a job: `/` becomes `_`, `.zip` is appended.
pub fn archive_file_name(job_name: &str) -> String {
    format!("{}.zip", job_name.replace('/', "_"))
}

fn create_dir(path: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(path)
        .map_err(|source| ArchiveError::CreateDir { path: path.to_path_buf(), source })
}

/// Base export directory shared by every run
#[derive(Debug, Clone)]
pub struct ExportDir {
    root: PathBuf,
}

impl ExportDir {
    /// Create the base directory if it is missing.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let root = root.into();
        create_dir(&root)?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of the run directory for a run started at `started_at_ms`.
    pub fn run_path(&self, prefix: &str, started_at_ms: u64) -> PathBuf {
        self.root.join(format!("{}-{}", prefix, run_dir_stamp(started_at_ms)))
    }

    /// Create (or reuse) the run directory for a run started at `started_at_ms`.
    pub fn start_run(&self, prefix: &str, started_at_ms: u64) -> Result<RunDir, ArchiveError> {
        let path = self.run_path(prefix, started_at_ms);
        create_dir(&path)?;
        debug!(path = %path.display(), "run directory ready");
        Ok(RunDir { path })
    }
}

/// Directory holding one run's archive files
#[derive(Debug, Clone)]
pub struct RunDir {
    path: PathBuf,
}

impl RunDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `payload` verbatim as the archive for `job_name`.
    pub fn write(&self, job_name: &str, payload: &[u8]) -> Result<PathBuf, ArchiveError> {
        let path = self.path.join(archive_file_name(job_name));
        fs::write(&path, payload)
            .map_err(|source| ArchiveError::Write { path: path.clone(), source })?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
