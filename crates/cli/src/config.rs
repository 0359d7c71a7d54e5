// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration: flag, then environment, then config file, then default.
//!
//! Resolved once in `main` and handed to commands by reference. Credentials
//! come from the environment only.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use reap_adapters::ControlHubSettings;
use reap_core::RetentionPolicy;
use reap_engine::SweepSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env;

pub const DEFAULT_EXPORT_DIR: &str = "./reap-export";
pub const DEFAULT_DIR_PREFIX: &str = "jobs";
pub const DEFAULT_RETENTION_DAYS: u32 = 365;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid {key} '{value}': {reason}")]
    Invalid { key: &'static str, value: String, reason: String },
    #[error("cannot read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid config file {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Keys accepted in the TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub dir_prefix: Option<String>,
    pub retention_days: Option<u32>,
    pub label: Option<String>,
    pub dry_run: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub url: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub dir_prefix: Option<String>,
    pub days: Option<u32>,
    pub label: Option<String>,
    /// `--dry-run` can only switch dry run on
    pub dry_run: bool,
}

#[derive(Clone)]
pub struct Config {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub export_dir: PathBuf,
    pub dir_prefix: String,
    pub retention_days: u32,
    pub label: Option<String>,
    pub dry_run: bool,
    pub timeout_secs: u64,
    /// File the values were read from, if any
    pub config_file: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("export_dir", &self.export_dir)
            .field("dir_prefix", &self.dir_prefix)
            .field("retention_days", &self.retention_days)
            .field("label", &self.label)
            .field("dry_run", &self.dry_run)
            .field("timeout_secs", &self.timeout_secs)
            .field("config_file", &self.config_file)
            .finish()
    }
}

impl Config {
    /// Resolve from flags, the process environment and the config file.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let (config_file, file) = read_config_file(overrides.config.as_deref())?;
        Self::resolve(overrides, file, config_file)
    }

    /// Resolve against an already-parsed config file.
    pub fn resolve(
        overrides: &Overrides,
        file: FileConfig,
        config_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let url = overrides
            .url
            .clone()
            .or_else(|| env::var(env::URL))
            .or(file.url)
            .filter(|s| !s.trim().is_empty());

        let export_dir = overrides
            .export_dir
            .clone()
            .or_else(|| env::var(env::EXPORT_DIR).filter(|s| !s.is_empty()).map(PathBuf::from))
            .or(file.export_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR));

        let dir_prefix = overrides
            .dir_prefix
            .clone()
            .or(file.dir_prefix)
            .unwrap_or_else(|| DEFAULT_DIR_PREFIX.to_string());
        if dir_prefix.is_empty() || dir_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                key: "dir_prefix",
                value: dir_prefix,
                reason: "must be a non-empty name without path separators".to_string(),
            });
        }

        let retention_days = match overrides.days {
            Some(days) => days,
            None => match env::var(env::DAYS) {
                Some(raw) => parse_number(env::DAYS, &raw)?,
                None => file.retention_days.unwrap_or(DEFAULT_RETENTION_DAYS),
            },
        };
        if retention_days == 0 {
            return Err(ConfigError::Invalid {
                key: "retention_days",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        // An explicitly empty label at any layer clears the lower ones
        let label = overrides
            .label
            .clone()
            .or_else(|| env::var(env::LABEL))
            .or(file.label)
            .filter(|s| !s.is_empty());

        let dry_run = if overrides.dry_run {
            true
        } else {
            match env::var(env::DRY_RUN) {
                Some(raw) => parse_bool(env::DRY_RUN, &raw)?,
                None => file.dry_run.unwrap_or(false),
            }
        };

        let timeout_secs = match env::var(env::TIMEOUT_SECS) {
            Some(raw) => parse_number(env::TIMEOUT_SECS, &raw)?,
            None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_secs",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            url,
            user: env::var(env::USER).filter(|s| !s.is_empty()),
            password: env::var(env::PASSWORD),
            export_dir,
            dir_prefix,
            retention_days,
            label,
            dry_run,
            timeout_secs,
            config_file,
        })
    }

    pub fn policy(&self) -> RetentionPolicy {
        let policy = RetentionPolicy::new(self.retention_days).with_dry_run(self.dry_run);
        match &self.label {
            Some(label) => policy.with_label(label.as_str()),
            None => policy,
        }
    }

    pub fn sweep_settings(&self) -> SweepSettings {
        SweepSettings {
            policy: self.policy(),
            export_dir: self.export_dir.clone(),
            dir_prefix: self.dir_prefix.clone(),
        }
    }

    /// Connection settings; fails when the URL or a credential is missing.
    pub fn control_hub(&self) -> Result<ControlHubSettings, ConfigError> {
        let base_url = self.url.clone().ok_or(ConfigError::Missing(env::URL))?;
        let user = self.user.clone().ok_or(ConfigError::Missing(env::USER))?;
        let password = self.password.clone().ok_or(ConfigError::Missing(env::PASSWORD))?;
        Ok(ControlHubSettings {
            base_url,
            user,
            password,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    /// TOML rendering with the password redacted.
    pub fn render(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&ResolvedView {
            url: self.url.as_deref(),
            user: self.user.as_deref(),
            password: self.password.as_ref().map(|_| "********"),
            export_dir: &self.export_dir,
            dir_prefix: &self.dir_prefix,
            retention_days: self.retention_days,
            label: self.label.as_deref(),
            dry_run: self.dry_run,
            timeout_secs: self.timeout_secs,
            config_file: self.config_file.as_deref(),
        })
    }
}

#[derive(Serialize)]
struct ResolvedView<'a> {
    url: Option<&'a str>,
    user: Option<&'a str>,
    password: Option<&'static str>,
    export_dir: &'a Path,
    dir_prefix: &'a str,
    retention_days: u32,
    label: Option<&'a str>,
    dry_run: bool,
    timeout_secs: u64,
    config_file: Option<&'a Path>,
}

/// Pick and parse the config file. An explicitly named file must exist; the
/// default location is optional.
fn read_config_file(flag: Option<&Path>) -> Result<(Option<PathBuf>, FileConfig), ConfigError> {
    let explicit = flag.map(Path::to_path_buf).or_else(env::config_file);
    let path = match explicit {
        Some(path) => path,
        None => match env::default_config_file().filter(|p| p.is_file()) {
            Some(path) => path,
            None => return Ok((None, FileConfig::default())),
        },
    };
    let text = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
    let file = FileConfig::parse(&path, &text)?;
    Ok((Some(path), file))
}

fn parse_number<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
