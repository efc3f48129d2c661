//! `vgs-wae`: operator CLI for the web adaptor extensions.
//!
//! Shows how the configured trusted service accounts resolve on this host and
//! edits the persisted account list.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};

mod cli;
mod commands;
mod logging;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::command().get_matches();
    let Cli {
        command,
        config,
        accounts_map,
        verbose,
    } = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    logging::init_tracing(verbose)?;

    match command.unwrap_or(Command::Status) {
        Command::Status => commands::status(config.as_deref(), accounts_map.as_deref()).await,
        Command::Trust { .. } => {
            let edits = cli::ordered_trust_edits(&matches);
            commands::trust(config.as_deref(), &edits).await
        }
    }
}
