// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A clock that provides wall-clock time as epoch milliseconds.
///
/// Control-plane timestamps are epoch milliseconds, so that is the only unit
/// the retention rules need.
pub trait Clock: Clone + Send + Sync {
    fn epoch_ms(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone, Debug)]
pub struct FakeClock {
    epoch_ms: Arc<Mutex<u64>>,
}

impl FakeClock {
    /// Start the clock at the given epoch milliseconds
    pub fn at(epoch_ms: u64) -> Self {
        Self { epoch_ms: Arc::new(Mutex::new(epoch_ms)) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.epoch_ms.lock() += duration.as_millis() as u64;
    }

    /// Set the epoch milliseconds value
    pub fn set_epoch_ms(&self, ms: u64) {
        *self.epoch_ms.lock() = ms;
    }
}

impl Default for FakeClock {
    /// 2024-01-01T00:00:00Z, far enough from the epoch for year-long windows.
    fn default() -> Self {
        Self::at(1_704_067_200_000)
    }
}

impl Clock for FakeClock {
    fn epoch_ms(&self) -> u64 {
        *self.epoch_ms.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
