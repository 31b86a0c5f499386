// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone a repository and check out a revision.
//!
//! ```text
//! clone_and_checkout(url, dir?, rev?)
//!   dir  = dir or repo_name(url)
//!   clone url dir
//!   rev is 40 hex  --> checkout <rev> (detached)
//!   rev otherwise  --> checkout -B <rev> <remote>/<rev>
//!   HEAD read back with gix
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use super::backend::{GitMutation, GitQuery, GixBackend};
use crate::error::{GitError, Result};

/// What `clone_and_checkout` left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneOutcome {
    pub dir: PathBuf,
    /// `None` when HEAD is detached.
    pub branch: Option<String>,
    pub commit: String,
}

impl fmt::Display for CloneOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.branch {
            Some(branch) => write!(f, "{} at {} ({branch})", self.dir.display(), self.commit),
            None => write!(f, "{} at {} (detached)", self.dir.display(), self.commit),
        }
    }
}

/// Directory name git would pick: last path component without `.git`.
#[must_use]
pub fn repo_name(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last)
}

/// Exactly 40 hex digits.
#[must_use]
pub fn is_commit_hash(rev: &str) -> bool {
    rev.len() == 40 && rev.chars().all(|c| c.is_ascii_hexdigit())
}

/// Target directory for a clone.
///
/// # Errors
///
/// Returns `GitError::CloneFailed` when no directory is given and none can be
/// derived from `url`.
pub fn clone_dir(url: &str, dir: Option<&Path>) -> std::result::Result<PathBuf, GitError> {
    if let Some(dir) = dir {
        return Ok(dir.to_path_buf());
    }
    match repo_name(url) {
        "" => Err(GitError::CloneFailed {
            url: url.to_string(),
            message: "cannot derive a directory name, pass --dir".to_string(),
        }),
        name => Ok(PathBuf::from(name)),
    }
}

/// Clones `url` and optionally checks out `rev`.
///
/// # Errors
///
/// Returns an error if the clone or checkout fails, or HEAD cannot be read.
pub async fn clone_and_checkout<G: GitMutation>(
    git: &G,
    url: &str,
    dir: Option<&Path>,
    rev: Option<&str>,
    remote: &str,
) -> Result<CloneOutcome> {
    let dir = clone_dir(url, dir)?;

    info!("cloning {url} into {}", dir.display());
    git.clone_repo(url, &dir).await?;

    match rev {
        Some(hash) if is_commit_hash(hash) => {
            info!("checking out hash: {hash}");
            git.checkout_detached(&dir, hash).await?;
        }
        Some(branch) => {
            info!("checking out branch: {branch}");
            git.checkout_branch(&dir, remote, branch).await?;
        }
        None => {}
    }

    let branch = GixBackend::current_branch(&dir)?;
    let commit = GixBackend::head_commit(&dir)?;
    Ok(CloneOutcome {
        dir,
        branch,
        commit,
    })
}
