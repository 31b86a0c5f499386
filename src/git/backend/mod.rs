// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI, async, cancellable)
//! ```

use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{GitError, GixError, PlyResult, Result};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> PlyResult<Option<String>>;

    /// Full hex id of the commit HEAD points at.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery fails or HEAD is unborn.
    fn head_commit(path: &Path) -> PlyResult<String>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
#[allow(async_fn_in_trait)]
pub trait GitMutation {
    /// Clone `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CloneFailed` if git fails.
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Detached checkout of a commit.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` if git fails.
    async fn checkout_detached(&self, repo_path: &Path, commit: &str) -> Result<()>;

    /// Creates or resets local `branch` to `remote/branch` and checks it out.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` if git fails.
    async fn checkout_branch(&self, repo_path: &Path, remote: &str, branch: &str) -> Result<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn current_branch(path: &Path) -> PlyResult<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn head_commit(path: &Path) -> PlyResult<String> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let id = repo
            .head_id()
            .map_err(|e| GitError::Gix(GixError::HeadId(Box::new(e))))?;
        Ok(id.to_string())
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    binary: PathBuf,
    token: CancellationToken,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellBackend {
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            token: CancellationToken::new(),
        }
    }

    /// Running git commands are killed when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Builds a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    fn git<I, S>(&self, args: I) -> ProcessBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        ProcessBuilder::new(&self.binary)
            .name("git")
            .args(args)
            .env_var("GCM_INTERACTIVE", "never")
            .env_var("GIT_TERMINAL_PROMPT", "0")
    }

    /// Runs git; a failed exit becomes `on_failure(stderr)`.
    async fn run<F>(&self, builder: ProcessBuilder, on_failure: F) -> Result<ProcessOutput>
    where
        F: FnOnce(String) -> GitError,
    {
        let output = builder
            .capture_stderr()
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run_with_cancellation(self.token.clone())
            .await?;
        if output.success() {
            return Ok(output);
        }
        let message = match output.stderr().trim() {
            "" => format!("exit code {}", output.exit_code()),
            stderr => stderr.to_string(),
        };
        Err(on_failure(message).into())
    }
}

impl GitMutation for ShellBackend {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        let builder = self.git(["clone", "--quiet", "--"]).arg(url).arg(dest);
        self.run(builder, |message| GitError::CloneFailed {
            url: url.to_string(),
            message,
        })
        .await?;
        Ok(())
    }

    async fn checkout_detached(&self, repo_path: &Path, commit: &str) -> Result<()> {
        let builder = self
            .git(["-c", "advice.detachedHead=false", "checkout", "-q", commit])
            .cwd(repo_path);
        self.run(builder, |message| GitError::CheckoutFailed {
            what: commit.to_string(),
            message,
        })
        .await?;
        Ok(())
    }

    async fn checkout_branch(&self, repo_path: &Path, remote: &str, branch: &str) -> Result<()> {
        let start_point = format!("{remote}/{branch}");
        let builder = self
            .git(["checkout", "-q", "-B", branch, start_point.as_str()])
            .cwd(repo_path);
        self.run(builder, |message| GitError::CheckoutFailed {
            what: start_point.clone(),
            message,
        })
        .await?;
        Ok(())
    }
}
