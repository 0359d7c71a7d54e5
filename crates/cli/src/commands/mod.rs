// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod list;
pub mod sweep;

use std::path::PathBuf;

use clap::Args;

use crate::config::Overrides;

/// Which jobs to look at
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Control plane base URL [env: REAP_URL]
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Retention window in days [env: REAP_DAYS] (default: 365)
    #[arg(long, value_name = "DAYS", value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Only consider jobs carrying this label [env: REAP_LABEL]
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,
}

/// Where archives go and whether deletion runs
#[derive(Args, Debug, Clone, Default)]
pub struct ArchiveArgs {
    /// Base directory for archives [env: REAP_EXPORT_DIR] (default: ./reap-export)
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Prefix of the per-run directory name (default: jobs)
    #[arg(long, value_name = "PREFIX")]
    pub dir_prefix: Option<String>,

    /// Archive but never delete, and skip the prompt [env: REAP_DRY_RUN]
    #[arg(long)]
    pub dry_run: bool,
}

pub fn overrides(
    config: Option<PathBuf>,
    target: &TargetArgs,
    archive: Option<&ArchiveArgs>,
) -> Overrides {
    let mut overrides = Overrides {
        config,
        url: target.url.clone(),
        days: target.days,
        label: target.label.clone(),
        ..Overrides::default()
    };
    if let Some(archive) = archive {
        overrides.export_dir = archive.export_dir.clone();
        overrides.dir_prefix = archive.dir_prefix.clone();
        overrides.dry_run = archive.dry_run;
    }
    overrides
}
