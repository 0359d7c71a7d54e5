// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `reap sweep` - archive idle jobs, confirm, then delete them

use std::io;

use anyhow::Result;
use clap::Args;
use reap_adapters::ControlHubClient;
use reap_core::SystemClock;
use reap_engine::{ExportDir, StdinConfirm, Sweep, SweepError};
use tracing::info;

use super::{ArchiveArgs, TargetArgs};
use crate::config::Config;

#[derive(Args, Debug, Clone, Default)]
pub struct SweepArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub archive: ArchiveArgs,
}

pub fn handle(config: &Config) -> Result<()> {
    let settings = config.sweep_settings();
    let hub = config.control_hub().map_err(crate::exit_error::ExitError::usage)?;

    // The base directory must be usable before the first request
    ExportDir::create(&settings.export_dir).map_err(SweepError::Setup)?;
    let client = ControlHubClient::connect(&hub).map_err(SweepError::Query)?;

    let mut confirm = StdinConfirm::terminal();
    let mut out = io::stdout().lock();
    let outcome = Sweep::new(&client, &SystemClock, &settings).run(&mut confirm, &mut out)?;

    match outcome.run_dir() {
        Some(run_dir) => info!(run_dir = %run_dir.display(), "sweep complete"),
        None => info!("no idle jobs"),
    }
    Ok(())
}
