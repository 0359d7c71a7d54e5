//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn reap_no_args_shows_usage_and_fails() {
    cli().code(2).stderr_has("Usage:");
}

#[test]
fn reap_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("sweep")
        .stdout_has("list")
        .stdout_has("config");
}

#[test]
fn reap_sweep_help_shows_flags() {
    cli()
        .args(&["sweep", "--help"])
        .passes()
        .stdout_has("--dry-run")
        .stdout_has("--days")
        .stdout_has("--label")
        .stdout_has("--export-dir");
}

#[test]
fn reap_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn zero_days_is_a_usage_error() {
    cli().args(&["sweep", "--days", "0"]).code(2);
}
