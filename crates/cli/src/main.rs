// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reap: archive and delete idle jobs from a control plane

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::list::ListArgs;
use commands::sweep::SweepArgs;
use commands::{ArchiveArgs, TargetArgs};
use config::Config;
use exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "reap",
    version,
    about = "Archive and delete idle jobs from a control plane",
    styles = color::styles()
)]
struct Cli {
    /// Config file [env: REAP_CONFIG] (default: $XDG_CONFIG_HOME/reap/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug) [env: REAP_LOG]
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Archive idle jobs, ask for confirmation, then delete them
    Sweep(SweepArgs),
    /// Show which jobs a sweep would archive and delete
    List(ListArgs),
    /// Print the resolved configuration (password redacted)
    Config(SweepArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        let message = err.to_string();
        if !message.is_empty() {
            eprintln!("error: {}", message);
        }
        std::process::exit(exit_error::code_for(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sweep(args) => {
            let config = load(cli.config, &args.target, Some(&args.archive))?;
            commands::sweep::handle(&config)
        }
        Commands::List(args) => {
            let config = load(cli.config, &args.target, None)?;
            commands::list::handle(&config, args.output)
        }
        Commands::Config(args) => {
            let config = load(cli.config, &args.target, Some(&args.archive))?;
            commands::config::handle(&config)
        }
    }
}

fn load(config: Option<PathBuf>, target: &TargetArgs, archive: Option<&ArchiveArgs>) -> Result<Config> {
    let overrides = commands::overrides(config, target, archive);
    Ok(Config::load(&overrides).map_err(ExitError::usage)?)
}
