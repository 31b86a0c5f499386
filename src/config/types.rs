// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for ply.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, DockerConfig, GitConfig
//! DockerBackend: Cli (default) | Api
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// How ply talks to the Docker daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockerBackend {
    /// Shell out to the `docker` binary.
    #[default]
    Cli,
    /// Call the Engine REST API over HTTP.
    Api,
}

impl std::fmt::Display for DockerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "cli"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Print plans without touching the daemon or the filesystem.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Docker daemon access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DockerConfig {
    pub backend: DockerBackend,
    /// `docker` executable used by the CLI backend.
    pub binary: PathBuf,
    /// Daemon address (`tcp://`, `http://` or `https://`); required by the API backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Base64 `X-Registry-Auth` payload sent with API pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_auth: Option<String>,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            backend: DockerBackend::default(),
            binary: PathBuf::from("docker"),
            host: None,
            registry_auth: None,
        }
    }
}

/// Git settings for `git clone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// `git` executable.
    pub binary: PathBuf,
    /// Remote whose branches `--rev` resolves against.
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("git"),
            remote: "origin".to_string(),
        }
    }
}
