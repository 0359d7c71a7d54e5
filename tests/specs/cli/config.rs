//! Configuration layering specs

use crate::prelude::*;

#[test]
fn config_shows_defaults() {
    cli()
        .args(&["config"])
        .passes()
        .stdout_has("# no config file")
        .stdout_has("export_dir = \"./reap-export\"")
        .stdout_has("dir_prefix = \"jobs\"")
        .stdout_has("retention_days = 365")
        .stdout_has("dry_run = false")
        .stdout_has("timeout_secs = 60");
}

#[test]
fn config_redacts_password() {
    cli()
        .args(&["config"])
        .env("REAP_USER", USER)
        .env("REAP_PASSWORD", PASSWORD)
        .passes()
        .stdout_has("password = \"********\"")
        .stdout_lacks(PASSWORD);
}

#[test]
fn flag_beats_env_beats_file() {
    let scratch = Scratch::new();
    let file = scratch.path().join("reap.toml");
    std::fs::write(&file, "retention_days = 90\nlabel = \"east\"\ndry_run = true\n").unwrap();

    cli()
        .args(&["config", "--config", &file.display().to_string(), "--days", "7"])
        .env("REAP_DAYS", "30")
        .env("REAP_LABEL", "west")
        .passes()
        .stdout_has("retention_days = 7")
        .stdout_has("label = \"west\"")
        .stdout_has("dry_run = true");
}

#[test]
fn config_file_from_env_is_used() {
    let scratch = Scratch::new();
    let file = scratch.path().join("reap.toml");
    std::fs::write(&file, "url = \"https://hub.example\"\n").unwrap();

    cli()
        .args(&["config"])
        .env("REAP_CONFIG", &file)
        .passes()
        .stdout_has("url = \"https://hub.example\"")
        .stdout_has("# from");
}

#[test]
fn unknown_config_key_is_a_usage_error() {
    let scratch = Scratch::new();
    let file = scratch.path().join("reap.toml");
    std::fs::write(&file, "retention = 30\n").unwrap();

    cli()
        .args(&["config", "--config", &file.display().to_string()])
        .code(2)
        .stderr_has("invalid config file");
}

#[test]
fn bad_env_value_is_a_usage_error() {
    cli().args(&["config"]).env("REAP_DAYS", "soon").code(2).stderr_has("REAP_DAYS");
}

#[test]
fn sweep_without_credentials_is_a_usage_error() {
    let scratch = Scratch::new();
    cli()
        .args(&["sweep", "--export-dir", &scratch.export_arg()])
        .env("REAP_URL", "http://127.0.0.1:9")
        .code(2)
        .stderr_has("REAP_USER is not set");
    assert!(!scratch.export_dir().exists());
}
