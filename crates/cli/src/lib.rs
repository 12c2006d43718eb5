// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! rvrs - command-line access to review note resolution.
//!
//! This crate provides the `rv` CLI over an [`rv_core::Engine`] backed by a
//! SQLite database. Notes are recorded with `rv add`, inspected with
//! `rv list` and `rv discussions`, and moved between states with the
//! single (`resolve`, `unresolve`) and bulk (`resolve-all`,
//! `unresolve-all`) commands.
//!
//! ```rust,ignore
//! use clap::Parser;
//! use rvrs::Cli;
//!
//! let cli = Cli::parse_from(["rv", "--db", "notes.db", "list", "!12"]);
//! rvrs::run(cli)?;
//! ```

mod cli;
mod commands;
mod display;
mod identity;

pub mod config;
pub mod error;
pub mod logging;

pub use cli::{BulkArgs, Cli, Command, OutputFormat, OwnerArgs};
pub use error::{Error, Result};

use commands::add::AddArgs;

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let engine = commands::open_engine(cli.config, cli.db)?;

    match cli.command {
        Command::Add { owner, discussion, kind, author, body, system, output } => {
            let args = AddArgs { owner, discussion, kind, author, body, system };
            commands::add::run(&engine, args, output).map(|_| ())
        }
        Command::List { owner, discussion, state, output } => {
            commands::list::run(&engine, &owner, discussion.as_deref(), state, output).map(|_| ())
        }
        Command::Resolve { ids, actor } => {
            let actor = identity::resolve_actor(actor);
            commands::resolve::resolve(&engine, &ids, &actor).map(|_| ())
        }
        Command::Unresolve { ids } => commands::resolve::unresolve(&engine, &ids).map(|_| ()),
        Command::ResolveAll { bulk, actor } => {
            let actor = identity::resolve_actor(actor);
            commands::resolve::resolve_all(&engine, &bulk, &actor).map(|_| ())
        }
        Command::UnresolveAll { bulk } => {
            commands::resolve::unresolve_all(&engine, &bulk).map(|_| ())
        }
        Command::Discussions { owner, output } => {
            commands::discussions::run(&engine, &owner, output).map(|_| ())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
