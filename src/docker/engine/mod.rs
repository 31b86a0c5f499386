// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Docker daemon access.
//!
//! ```text
//! ImageEngine (list / tag / remove / push / build)
//!   +-- DockerCli  --> `docker` binary via ProcessBuilder
//!   '-- EngineApi  --> Engine REST API via reqwest (tcp/http hosts)
//! ```

pub mod api;
pub mod cli;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::inventory::ImageSummary;
use crate::error::Result;

pub use api::EngineApi;
pub use cli::DockerCli;

/// One entry of an image removal report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoveResponse {
    #[serde(rename = "Untagged", default, skip_serializing_if = "Option::is_none")]
    pub untagged: Option<String>,
    #[serde(rename = "Deleted", default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<String>,
}

impl RemoveResponse {
    #[must_use]
    pub fn untagged(reference: impl Into<String>) -> Self {
        Self {
            untagged: Some(reference.into()),
            deleted: None,
        }
    }

    #[must_use]
    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            untagged: None,
            deleted: Some(id.into()),
        }
    }
}

/// Image operations ply needs from a Docker daemon.
#[allow(async_fn_in_trait)]
pub trait ImageEngine {
    /// Every image on the daemon, including intermediate ones.
    async fn list_images(&self) -> Result<Vec<ImageSummary>>;

    /// Adds `to` as a new repo tag for the image `from` points at.
    async fn tag_image(&self, from: &str, to: &str) -> Result<()>;

    /// Removes a repo tag, deleting the image when it was the last one.
    async fn remove_image(&self, reference: &str) -> Result<Vec<RemoveResponse>>;

    /// Pushes one repo tag to its registry.
    async fn push_image(&self, reference: &str) -> Result<()>;

    /// Builds a context-free image from `dockerfile`.
    async fn build_image(
        &self,
        dockerfile: &str,
        labels: &BTreeMap<String, String>,
        tags: &[String],
    ) -> Result<()>;
}
