// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command arguments.
//!
//! ```text
//! git clone REPO_URL [-d DIR] [-r REV]
//!   REV of 40 hex digits → detached checkout
//!   otherwise            → local branch tracking <remote>/REV
//! ```

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the `git` command.
#[derive(Debug, Clone, Args)]
pub struct GitArgs {
    /// Git subcommand.
    #[command(subcommand)]
    pub subcommand: GitSubcommand,
}

/// Git subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum GitSubcommand {
    /// Clones a repository and optionally checks out a revision.
    Clone(CloneArgs),
}

/// Arguments for the clone subcommand.
#[derive(Debug, Clone, Args)]
pub struct CloneArgs {
    /// Repository to clone.
    #[arg(value_name = "REPO_URL")]
    pub url: String,

    /// Target directory; defaults to the repository name.
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Branch name or full commit hash to check out.
    #[arg(short = 'r', long = "rev", value_name = "REV")]
    pub rev: Option<String>,
}
