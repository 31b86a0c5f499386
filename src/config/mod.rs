// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for ply.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ply.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. PLY_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PLY_GLOBAL__DRY=true           → global.dry = true
//! PLY_DOCKER__BACKEND=api        → docker.backend = "api"
//! PLY_DOCKER__HOST=tcp://h:2375  → docker.host = "tcp://h:2375"
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

use loader::ConfigLoader;
use types::{DockerBackend, DockerConfig, GitConfig, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Docker daemon access.
    pub docker: DockerConfig,
    /// Git settings.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ply::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("ply.toml")
    ///     .with_env_prefix("PLY")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when the API backend has no host.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.docker.backend == DockerBackend::Api && self.docker.host.is_none() {
            return Err(ConfigError::MissingKey {
                section: "docker".to_string(),
                key: "host".to_string(),
            });
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Secrets are shown as `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert("global.dry", self.global.dry.to_string());
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("docker.backend", self.docker.backend.to_string());
        options.insert("docker.binary", self.docker.binary.display().to_string());
        options.insert(
            "docker.host",
            self.docker.host.clone().unwrap_or_default(),
        );
        if self.docker.registry_auth.is_some() {
            options.insert("docker.registry_auth", "[hidden]".to_string());
        }
        options.insert("git.binary", self.git.binary.display().to_string());
        options.insert("git.remote", self.git.remote.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
