//! Command-line interface definitions for `vgs-wae`.

use std::path::PathBuf;

use clap::{ArgAction, ArgMatches, Parser, Subcommand};

use crate::commands::TrustEdit;

const TRUST_COMMAND: &str = "trust";
const ADD_ARG: &str = "add";
const REMOVE_ARG: &str = "remove";

/// Inspect and edit the web adaptor's trusted service accounts.
#[derive(Parser, Debug)]
#[command(name = "vgs-wae")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run (defaults to `status`).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the trust configuration file.
    ///
    /// Defaults to `<path of this executable>.json`.
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Resolve accounts from a JSON name-to-SID map instead of the host.
    ///
    /// Format: `{ "accounts": [ { "name": "HOST\\svc", "sid": "S-1-5-..." } ] }`
    #[arg(long = "accounts-map", value_name = "PATH", global = true)]
    pub accounts_map: Option<PathBuf>,

    /// Increase log verbosity.
    ///
    /// -v = info, -vv = debug, -vvv = trace
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the configuration and how each account resolves.
    Status,

    /// Add accounts to the trusted list, or remove them.
    ///
    /// Edits apply in the order given:
    /// `vgs-wae trust CONTOSO\a -r CONTOSO\b CONTOSO\c` adds `a` and `c`
    /// and removes `b`.
    #[command(arg_required_else_help = true)]
    Trust {
        /// Account to remove (repeatable).
        #[arg(short = 'r', long = "remove", value_name = "ACCOUNT", action = ArgAction::Append)]
        remove: Vec<String>,

        /// Accounts to add.
        #[arg(value_name = "ACCOUNT")]
        add: Vec<String>,
    },
}

/// `trust` edits in command-line order.
///
/// Empty for any other subcommand.
#[must_use]
pub fn ordered_trust_edits(matches: &ArgMatches) -> Vec<TrustEdit> {
    let Some(trust) = matches.subcommand_matches(TRUST_COMMAND) else {
        return Vec::new();
    };

    let mut edits: Vec<(usize, TrustEdit)> = indexed_values(trust, ADD_ARG)
        .map(|(i, v)| (i, TrustEdit::Add(v)))
        .chain(indexed_values(trust, REMOVE_ARG).map(|(i, v)| (i, TrustEdit::Remove(v))))
        .collect();
    edits.sort_by_key(|(index, _)| *index);
    edits.into_iter().map(|(_, edit)| edit).collect()
}

fn indexed_values<'a>(
    matches: &'a ArgMatches,
    id: &'static str,
) -> impl Iterator<Item = (usize, String)> + 'a {
    let indices = matches.indices_of(id).into_iter().flatten();
    let values = matches.get_many::<String>(id).into_iter().flatten();
    indices.zip(values.cloned())
}
