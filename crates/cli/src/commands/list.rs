// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `reap list` - preview which jobs a sweep would take

use std::io;

use anyhow::Result;
use clap::Args;
use reap_adapters::ControlHubClient;
use reap_core::SystemClock;
use reap_engine::{survey, SweepError};

use super::TargetArgs;
use crate::config::Config;
use crate::exit_error::ExitError;
use crate::output::{print_survey, OutputFormat};

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub fn handle(config: &Config, format: OutputFormat) -> Result<()> {
    let hub = config.control_hub().map_err(ExitError::usage)?;
    let client = ControlHubClient::connect(&hub).map_err(SweepError::Query)?;
    let survey = survey(&client, &config.policy(), &SystemClock)?;
    print_survey(&mut io::stdout().lock(), &survey, format)
}
