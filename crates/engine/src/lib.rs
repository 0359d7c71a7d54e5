// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! reap-engine: archive-then-delete pipeline for idle jobs

pub mod archive;
pub mod gate;
pub mod report;
pub mod sweep;

pub use archive::{archive_file_name, ArchiveError, ExportDir, RunDir};
pub use gate::{is_affirmative, Confirm, GateDecision, StdinConfirm};
pub use sweep::{survey, ArchivedJob, Survey, Sweep, SweepError, SweepOutcome, SweepSettings};
