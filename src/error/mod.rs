// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          PlyError (16 bytes)
//!                 |
//!   +------+------+------+------+
//!   |      |      |      |      |
//!   v      v      v      v      v
//! Docker  Git   Cfg   Proc    Io
//!  Box    Box   Box   Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Docker  EmptyArgument, InvalidRepoTag, InvalidTag,
//!           InvalidReference, InvalidLabel, Regex, Engine, Stream,
//!           CommandFailed, UnexpectedOutput, Interrupted, UnsupportedHost,
//!           Reqwest
//!   Git     Gix, CommandFailed, CloneFailed, CheckoutFailed
//!   Config  MissingKey, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed, NonZeroExit, Interrupted
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PlyError`].
pub type PlyResult<T> = std::result::Result<T, PlyError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum two words wide.
#[derive(Debug, Error)]
pub enum PlyError {
    /// Docker operation failed.
    #[error("docker error: {0}")]
    Docker(#[from] Box<DockerError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PlyError {
                fn from(err: $error) -> Self {
                    PlyError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    DockerError => Docker,
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Docker Errors ---

/// Docker image and tag errors.
#[derive(Debug, Error)]
pub enum DockerError {
    /// A required positional argument was empty.
    #[error("{name} cannot be empty")]
    EmptyArgument { name: &'static str },

    /// A repo tag without a `name:tag` shape.
    #[error("divisor ':' not found in RepoTag {repo_tag}")]
    InvalidRepoTag { repo_tag: String },

    /// A computed tag that Docker would reject.
    #[error("new tag {tag} is invalid")]
    InvalidTag { tag: String },

    /// A repository name that does not normalize.
    #[error("invalid reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// Malformed `key=value` label.
    #[error("invalid label '{label}' (must be of the form 'key=value'; both key and value must be non-empty strings)")]
    InvalidLabel { label: String },

    /// The user supplied regex does not compile.
    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),

    /// The daemon answered with a non-success status.
    #[error("engine returned {status}: {message}")]
    Engine { status: u16, message: String },

    /// The daemon reported an error inside a progress stream.
    #[error("{operation} failed: {message}")]
    Stream { operation: String, message: String },

    /// The docker binary exited with a failure.
    #[error("docker command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Output from the docker binary could not be understood.
    #[error("unexpected output from '{command}': {message}")]
    UnexpectedOutput { command: String, message: String },

    /// A daemon call was cancelled.
    #[error("{operation} interrupted")]
    Interrupted { operation: String },

    /// Unsupported daemon address for the selected backend.
    #[error("unsupported docker host '{host}': {message}")]
    UnsupportedHost { host: String, message: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Failed to peel HEAD to a commit id.
    #[error("failed to resolve head commit: {0}")]
    HeadId(#[from] Box<gix::reference::head_id::Error>),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process was cancelled before it finished.
    #[error("process '{command}' was interrupted")]
    Interrupted { command: String },
}

#[cfg(test)]
mod tests;
