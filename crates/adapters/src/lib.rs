// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for talking to the job control plane

pub mod connector;
pub mod controlhub;

pub use connector::{ConnectorError, ControlPlane};
#[cfg(any(test, feature = "test-support"))]
pub use connector::{ConnectorCall, FakeControlPlane};
pub use controlhub::{ControlHubClient, ControlHubSettings};
