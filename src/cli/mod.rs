// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for ply using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! ply [global options] <command>
//! version
//! options
//! docker-regex {images|push|set-path-prefix|tag-suffix {append|remove}|label-images}
//! git clone
//! ```

pub mod docker;
pub mod git;
pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::docker::DockerRegexArgs;
use crate::cli::git::GitArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Regex-driven Docker image tag utility.
#[derive(Debug, Parser)]
#[command(
    name = "ply",
    author,
    version,
    about = "Regex-driven Docker image tag utility",
    long_about = "ply Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Renames, pushes and labels Docker images whose repo tags match\n\
                  a regular expression, and clones git repositories at a given\n\
                  revision. See `ply <command> --help` for more information\n\
                  about a command.",
    after_help = "CONFIG FILES:\n\n\
                  ply reads `ply.toml` from the current directory when present,\n\
                  then every file given with --config, in order. PLY_SECTION__KEY\n\
                  environment variables (e.g. PLY_DOCKER__BACKEND=api) override\n\
                  files, and command-line flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version and build information.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Operates on images whose repo tags match a regex.
    #[command(name = "docker-regex")]
    DockerRegex(DockerRegexArgs),

    /// Git helpers.
    Git(GitArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
