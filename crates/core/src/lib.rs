// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! reap-core: job model and retention rules for the reap maintenance tool

pub mod macros;

pub mod clock;
pub mod id;
pub mod job;
pub mod retention;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{Job, JobId, JobStatus, RunRecord};
pub use retention::{select_candidates, CandidateSet, RetentionPolicy, MS_PER_DAY};
pub use time_fmt::{format_local, run_dir_stamp};
