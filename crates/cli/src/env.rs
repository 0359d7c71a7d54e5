// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

pub const URL: &str = "REAP_URL";
pub const USER: &str = "REAP_USER";
pub const PASSWORD: &str = "REAP_PASSWORD";
pub const EXPORT_DIR: &str = "REAP_EXPORT_DIR";
pub const DAYS: &str = "REAP_DAYS";
pub const LABEL: &str = "REAP_LABEL";
pub const DRY_RUN: &str = "REAP_DRY_RUN";
pub const TIMEOUT_SECS: &str = "REAP_TIMEOUT_SECS";
pub const CONFIG: &str = "REAP_CONFIG";
pub const LOG: &str = "REAP_LOG";

/// Raw value of a `REAP_*` variable. Unset and non-UTF-8 read as absent.
pub fn var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Config file named by `REAP_CONFIG`
pub fn config_file() -> Option<PathBuf> {
    var(CONFIG).filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Default config file: `$XDG_CONFIG_HOME/reap/config.toml` (platform equivalent elsewhere)
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reap").join("config.toml"))
}

/// Log filter directives from `REAP_LOG`
pub fn log_filter() -> Option<String> {
    var(LOG).filter(|s| !s.trim().is_empty())
}
