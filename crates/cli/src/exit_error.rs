// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

/// Setup, query, export, archive or deletion failure
pub const FAILURE: i32 = 1;
/// Bad configuration or usage
pub const USAGE: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Configuration problem, reported with exit code 2.
    pub fn usage(err: impl fmt::Display) -> Self {
        Self::new(USAGE, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Exit code for an error returned by a command
pub fn code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExitError>().map_or(FAILURE, |e| e.code)
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
