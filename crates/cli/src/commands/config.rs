// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `reap config` - show the resolved configuration

use std::io::{self, Write};

use anyhow::Result;

use crate::color;
use crate::config::Config;

pub fn handle(config: &Config) -> Result<()> {
    let rendered = config.render()?;
    let mut out = io::stdout().lock();
    match &config.config_file {
        Some(path) => {
            let _ = writeln!(out, "{}", color::context(&format!("# from {}", path.display())));
        }
        None => {
            let _ = writeln!(out, "{}", color::context("# no config file"));
        }
    }
    let _ = write!(out, "{}", rendered);
    Ok(())
}
