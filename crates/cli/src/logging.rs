// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::env;

/// Default filter for a `-v` count: warn, info, then debug.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr subscriber. `REAP_LOG` wins over `-v` when it parses.
pub fn init(verbosity: u8) {
    let filter = env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
