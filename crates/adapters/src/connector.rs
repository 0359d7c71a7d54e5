// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use reap_core::{Job, JobId};
use thiserror::Error;

/// Errors from control-plane operations
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("{operation} returned HTTP {status}: {body}")]
    Status { operation: &'static str, status: u16, body: String },
    #[error("{operation} failed: {message}")]
    Transport { operation: &'static str, message: String },
    #[error("unexpected response from {operation}: {message}")]
    Decode { operation: &'static str, message: String },
    #[error("{0}")]
    Rejected(String),
}

/// The capabilities the retention pipeline needs from a control plane.
///
/// Every call blocks until the control plane answers.
pub trait ControlPlane {
    /// Enumerate every job with its status, run history (most recent first),
    /// and labels.
    fn list_jobs(&self) -> Result<Vec<Job>, ConnectorError>;

    /// Export the given jobs as one opaque archive payload.
    fn export_jobs(&self, ids: &[JobId]) -> Result<Vec<u8>, ConnectorError>;

    /// Remove a single job definition.
    fn delete_job(&self, id: &JobId) -> Result<(), ConnectorError>;
}

impl<C: ControlPlane + ?Sized> ControlPlane for &C {
    fn list_jobs(&self) -> Result<Vec<Job>, ConnectorError> {
        (**self).list_jobs()
    }

    fn export_jobs(&self, ids: &[JobId]) -> Result<Vec<u8>, ConnectorError> {
        (**self).export_jobs(ids)
    }

    fn delete_job(&self, id: &JobId) -> Result<(), ConnectorError> {
        (**self).delete_job(id)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ConnectorError, ControlPlane};
    use parking_lot::Mutex;
    use reap_core::{Job, JobId};
    use std::collections::HashSet;
    use std::sync::Arc;

    /// Recorded control-plane call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ConnectorCall {
        List,
        Export(Vec<JobId>),
        Delete(JobId),
    }

    #[derive(Default)]
    struct FakeState {
        jobs: Vec<Job>,
        calls: Vec<ConnectorCall>,
        fail_list: bool,
        fail_export: HashSet<JobId>,
        fail_delete: HashSet<JobId>,
    }

    /// In-memory control plane for testing.
    ///
    /// Export payloads are `export:<id>[,<id>...]` so tests can check file
    /// contents. Deleted jobs disappear from later listings.
    #[derive(Clone, Default)]
    pub struct FakeControlPlane {
        inner: Arc<Mutex<FakeState>>,
    }

    impl FakeControlPlane {
        pub fn new(jobs: Vec<Job>) -> Self {
            Self { inner: Arc::new(Mutex::new(FakeState { jobs, ..FakeState::default() })) }
        }

        /// Make `list_jobs` fail
        pub fn fail_list(&self) {
            self.inner.lock().fail_list = true;
        }

        /// Make exporting the given job fail
        pub fn fail_export(&self, id: impl Into<JobId>) {
            self.inner.lock().fail_export.insert(id.into());
        }

        /// Make deleting the given job fail
        pub fn fail_delete(&self, id: impl Into<JobId>) {
            self.inner.lock().fail_delete.insert(id.into());
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<ConnectorCall> {
            self.inner.lock().calls.clone()
        }

        /// Ids passed to `delete_job`, in call order (including failed ones)
        pub fn delete_calls(&self) -> Vec<JobId> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    ConnectorCall::Delete(id) => Some(id),
                    _ => None,
                })
                .collect()
        }

        /// Ids passed to `export_jobs`, flattened in call order
        pub fn export_calls(&self) -> Vec<JobId> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    ConnectorCall::Export(ids) => Some(ids),
                    _ => None,
                })
                .flatten()
                .collect()
        }

        /// Jobs still present
        pub fn jobs(&self) -> Vec<Job> {
            self.inner.lock().jobs.clone()
        }

        pub fn payload_for(ids: &[JobId]) -> Vec<u8> {
            let joined: Vec<&str> = ids.iter().map(JobId::as_str).collect();
            format!("export:{}", joined.join(",")).into_bytes()
        }
    }

    impl ControlPlane for FakeControlPlane {
        fn list_jobs(&self) -> Result<Vec<Job>, ConnectorError> {
            let mut state = self.inner.lock();
            state.calls.push(ConnectorCall::List);
            if state.fail_list {
                return Err(ConnectorError::Rejected("list refused".to_string()));
            }
            Ok(state.jobs.clone())
        }

        fn export_jobs(&self, ids: &[JobId]) -> Result<Vec<u8>, ConnectorError> {
            let mut state = self.inner.lock();
            state.calls.push(ConnectorCall::Export(ids.to_vec()));
            if let Some(id) = ids.iter().find(|id| state.fail_export.contains(*id)) {
                return Err(ConnectorError::Rejected(format!("export of {} refused", id)));
            }
            Ok(Self::payload_for(ids))
        }

        fn delete_job(&self, id: &JobId) -> Result<(), ConnectorError> {
            let mut state = self.inner.lock();
            state.calls.push(ConnectorCall::Delete(id.clone()));
            if state.fail_delete.contains(id) {
                return Err(ConnectorError::Rejected(format!("delete of {} refused", id)));
            }
            state.jobs.retain(|j| &j.id != id);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ConnectorCall, FakeControlPlane};

#[cfg(test)]
#[path = "connector_tests.rs"]
mod tests;
