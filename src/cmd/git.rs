// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command implementation for ply.

use std::io::Write;

use tokio_util::sync::CancellationToken;

use crate::cli::git::{GitArgs, GitSubcommand};
use crate::config::Config;
use crate::error::Result;
use crate::git::backend::ShellBackend;
use crate::git::ops::{clone_and_checkout, clone_dir};

/// Main handler for git command.
///
/// # Errors
///
/// Returns an error if any git operation fails.
pub async fn run_git_command<W: Write>(
    args: &GitArgs,
    config: &Config,
    token: CancellationToken,
    out: &mut W,
) -> Result<()> {
    match &args.subcommand {
        GitSubcommand::Clone(clone) => {
            if config.global.dry {
                let dir = clone_dir(&clone.url, clone.dir.as_deref())?;
                write!(out, "Would clone {} into {}", clone.url, dir.display())?;
                if let Some(rev) = &clone.rev {
                    write!(out, " at {rev}")?;
                }
                writeln!(out)?;
                return Ok(());
            }

            let git = ShellBackend::new(&config.git.binary).with_cancellation(token);
            let outcome = clone_and_checkout(
                &git,
                &clone.url,
                clone.dir.as_deref(),
                clone.rev.as_deref(),
                &config.git.remote,
            )
            .await?;
            writeln!(out, "Cloned {outcome}")?;
            Ok(())
        }
    }
}
