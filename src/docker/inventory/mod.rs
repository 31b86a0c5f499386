// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Images discovered on the daemon, filtered by a repo-tag regex.


use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DockerError;

/// Repo tag the daemon reports for dangling images.
pub const DANGLING_REPO_TAG: &str = "<none>:<none>";

/// One image as listed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageSummary {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "RepoTags", default, deserialize_with = "null_as_empty")]
    pub repo_tags: Vec<String>,
}

impl ImageSummary {
    pub fn new<I, S>(id: impl Into<String>, repo_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            repo_tags: repo_tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Untagged, or only carrying `<none>:<none>`.
    #[must_use]
    pub fn is_dangling(&self) -> bool {
        self.repo_tags
            .first()
            .is_none_or(|first| first == DANGLING_REPO_TAG)
    }
}

// Older daemons send `"RepoTags": null` for untagged images.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Compiles the user supplied repo-tag filter.
///
/// # Errors
///
/// Returns `DockerError::EmptyArgument` for an empty pattern and
/// `DockerError::Regex` when it does not compile.
pub fn make_regex(pattern: &str) -> Result<Regex, DockerError> {
    if pattern.is_empty() {
        return Err(DockerError::EmptyArgument { name: "REGEX" });
    }
    Ok(Regex::new(pattern)?)
}

/// Whether any image on the daemon carries `needle` as a repo tag.
#[must_use]
pub fn contains_repo_tag(images: &[ImageSummary], needle: &str) -> bool {
    images
        .iter()
        .any(|image| image.repo_tags.iter().any(|t| t == needle))
}

/// Matched repo tags and the image each one points to.
#[derive(Debug, Clone, Default)]
pub struct ImageMap {
    images: BTreeMap<String, ImageSummary>,
}

impl ImageMap {
    /// Collects every repo tag matching `regex` (unanchored search).
    ///
    /// Dangling images are skipped.
    #[must_use]
    pub fn find(images: &[ImageSummary], regex: &Regex) -> Self {
        let images = images
            .iter()
            .filter(|image| !image.is_dangling())
            .flat_map(|image| {
                image
                    .repo_tags
                    .iter()
                    .filter(|repo_tag| regex.is_match(repo_tag))
                    .map(move |repo_tag| (repo_tag.clone(), image.clone()))
            })
            .collect();
        Self { images }
    }

    /// Matched repo tags in sorted order.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        self.images.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn get(&self, repo_tag: &str) -> Option<&ImageSummary> {
        self.images.get(repo_tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImageSummary)> {
        self.images.iter().map(|(k, v)| (k.as_str(), v))
    }
}
