// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rv_core::{NoteId, NoteKind, OwnerKind, StateFilter};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Ids,
}

const QUICKSTART_HELP: &str = "\
Get started:
  rv add '!12' d1 --kind diff-note      Record a note on merge request !12
  rv list '!12' --state unresolved      Show notes still waiting on a resolution
  rv resolve 3 --actor alice            Resolve note 3
  rv resolve-all '!12'                  Resolve every open note on !12
  rv discussions '!12'                  Show per-thread resolution state";

#[derive(Parser)]
#[command(name = "rv", version)]
#[command(about = "Track which review notes are resolved, one at a time or in bulk")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Settings file (defaults to $RV_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SQLite database (defaults to $RV_DB, then the settings file)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// The object a note is attached to.
#[derive(Args, Clone, Debug)]
pub struct OwnerArgs {
    /// Owner identifier, e.g. a merge request reference
    pub owner: String,

    /// Owner kind (merge-request, issue, commit, snippet)
    #[arg(long, default_value = "merge-request")]
    pub owner_kind: OwnerKind,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a note
    #[command(after_help = "Examples:\n  \
        rv add '!12' d1                           Discussion note on !12, thread d1\n  \
        rv add '!12' d1 -k diff-note -a bob       Diff note by bob\n  \
        rv add '#4' d2 --owner-kind issue         Note on an issue\n  \
        rv add '!12' d1 -k system-note            System note")]
    Add {
        #[command(flatten)]
        owner: OwnerArgs,

        /// Discussion (thread) the note belongs to
        discussion: String,

        /// Note kind (diff-note, discussion-note, legacy-note, system-note)
        #[arg(long, short, default_value = "discussion-note")]
        kind: NoteKind,

        /// Note author (defaults to the current user)
        #[arg(long, short)]
        author: Option<String>,

        /// Note text
        #[arg(long, short, default_value = "")]
        body: String,

        /// Mark the note as system-generated regardless of kind
        #[arg(long)]
        system: bool,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List notes on an owner
    List {
        #[command(flatten)]
        owner: OwnerArgs,

        /// Only notes of this discussion
        #[arg(long, short)]
        discussion: Option<String>,

        /// Resolution state (all, resolvable, unresolved, resolved)
        #[arg(long, short, default_value = "all")]
        state: StateFilter,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Resolve note(s)
    #[command(arg_required_else_help = true)]
    Resolve {
        /// Note ID(s)
        #[arg(required = true)]
        ids: Vec<NoteId>,

        /// Acting user (defaults to git user.name, then $USER)
        #[arg(long)]
        actor: Option<String>,
    },

    /// Unresolve note(s)
    #[command(arg_required_else_help = true)]
    Unresolve {
        /// Note ID(s)
        #[arg(required = true)]
        ids: Vec<NoteId>,
    },

    /// Resolve every unresolved note on an owner in one update
    #[command(name = "resolve-all")]
    ResolveAll {
        #[command(flatten)]
        bulk: BulkArgs,

        /// Acting user (defaults to git user.name, then $USER)
        #[arg(long)]
        actor: Option<String>,
    },

    /// Unresolve every resolved note on an owner in one update
    #[command(name = "unresolve-all")]
    UnresolveAll {
        #[command(flatten)]
        bulk: BulkArgs,
    },

    /// Show per-discussion resolution state
    Discussions {
        #[command(flatten)]
        owner: OwnerArgs,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

/// Shared arguments of the bulk commands.
#[derive(Args, Clone, Debug)]
pub struct BulkArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Only notes of this discussion
    #[arg(long, short)]
    pub discussion: Option<String>,

    /// Give up if the update has not finished after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
