// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Image reference parsing.
//!
//! ```text
//! registry.local:5000/team/app:1.2
//! '-------- name ---------' '-tag'
//!
//! ImageName (oci_client::Reference underneath)
//!   "app"               → docker.io/library/app
//!   "index.docker.io/x" → docker.io/library/x
//!   "localhost/x"       → localhost/x
//! ```

#[cfg(test)]
mod tests;

use std::fmt;

use oci_client::Reference;

use crate::error::DockerError;

const MAX_TAG_LEN: usize = 128;

/// A `name:tag` image reference as listed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoTag {
    name: String,
    tag: String,
}

impl RepoTag {
    /// Parses `name:tag`.
    ///
    /// # Errors
    ///
    /// Returns `DockerError::InvalidRepoTag` when there is no tag part.
    pub fn parse(repo_tag: &str) -> Result<Self, DockerError> {
        let (name, tag) = split_repo_tag(repo_tag)?;
        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Same repository, different tag.
    #[must_use]
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for RepoTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

/// Splits a repo tag into name and tag at the `:` after the last `/`.
///
/// Registry ports (`host:5000/app:v1`) stay part of the name.
///
/// # Errors
///
/// Returns `DockerError::InvalidRepoTag` if there is no tag separator or
/// either side is empty.
pub fn split_repo_tag(repo_tag: &str) -> Result<(&str, &str), DockerError> {
    let last_slash = repo_tag.rfind('/').map_or(0, |i| i + 1);
    let invalid = || DockerError::InvalidRepoTag {
        repo_tag: repo_tag.to_string(),
    };

    let colon = repo_tag[last_slash..]
        .rfind(':')
        .map(|i| last_slash + i)
        .ok_or_else(invalid)?;

    let (name, tag) = (&repo_tag[..colon], &repo_tag[colon + 1..]);
    if name.is_empty() || tag.is_empty() {
        return Err(invalid());
    }
    Ok((name, tag))
}

/// Whether Docker accepts `tag`: `[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}`.
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    tag.len() <= MAX_TAG_LEN
        && (first.is_ascii_alphanumeric() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Splits at the last `/` into `(prefix, last)`.
///
/// # Errors
///
/// Returns `DockerError::InvalidReference` for an empty input.
pub fn split_last_path(full: &str) -> Result<(&str, &str), DockerError> {
    if full.is_empty() {
        return Err(DockerError::InvalidReference {
            reference: String::new(),
            message: "empty path".to_string(),
        });
    }
    Ok(full.rsplit_once('/').unwrap_or(("", full)))
}

/// A repository name with its registry domain made explicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageName {
    registry: String,
    repository: String,
}

impl ImageName {
    /// Normalizes a repository name the way the Docker CLI does.
    ///
    /// # Errors
    ///
    /// Returns `DockerError::InvalidReference` when the name does not parse as
    /// an image reference or carries a tag or digest.
    pub fn parse_normalized(name: &str) -> Result<Self, DockerError> {
        let invalid = |message: String| DockerError::InvalidReference {
            reference: name.to_string(),
            message,
        };
        if name.contains('@') || split_repo_tag(name).is_ok() {
            return Err(invalid("expected a repository name without tag or digest".to_string()));
        }
        let reference = Reference::try_from(name).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            registry: reference.registry().to_string(),
            repository: reference.repository().to_string(),
        })
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.registry, self.repository)
    }
}
