// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tag rewrite planning.
//!
//! Pure: reads the matched repo tags plus the full daemon listing and
//! returns the renames to perform. Nothing here talks to the daemon.
//!
//! ```text
//! AppendSuffix("dev")      team/app:1.0        → team/app:1.0-dev
//! RemoveSuffix("dev")      team/app:1.0-dev    → team/app:1.0
//! SetPathPrefix("reg/x")   team/app:1.0        → docker.io/reg/x/app:1.0
//!
//! skipped: latest, already suffixed, target exists, suffix absent, no-op,
//!          second source for an already planned target
//! ```


use std::fmt;

use tracing::debug;

use super::inventory::{ImageMap, ImageSummary, contains_repo_tag};
use super::reference::{ImageName, RepoTag, is_valid_tag, split_last_path};
use crate::error::DockerError;

/// A single rename: tag `to`, then remove `from`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagOp {
    pub from: String,
    pub to: String,
}

impl fmt::Display for TagOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The transformation applied to every matched repo tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteMode {
    AppendSuffix(String),
    RemoveSuffix(String),
    SetPathPrefix(String),
}

/// Why a matched repo tag produced no operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `latest` is never suffixed.
    LatestTag,
    /// The repo tag already ends with the suffix.
    AlreadySuffixed,
    /// The renamed repo tag already exists on the daemon.
    TargetExists,
    /// Nothing to remove.
    SuffixNotFound,
    /// The new reference equals the old one.
    NoOp,
    /// An earlier repo tag in the plan already moves to the same target.
    DuplicateTarget,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::LatestTag => "latest tag",
            Self::AlreadySuffixed => "already suffixed",
            Self::TargetExists => "target already exists",
            Self::SuffixNotFound => "suffix not found",
            Self::NoOp => "no-op",
            Self::DuplicateTarget => "target already planned",
        };
        f.write_str(text)
    }
}

/// Operations to apply plus the repo tags left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewritePlan {
    pub ops: Vec<TagOp>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl RewritePlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn skip(&mut self, repo_tag: &str, reason: SkipReason) {
        debug!(repo_tag, %reason, "skipping");
        self.skipped.push((repo_tag.to_string(), reason));
    }
}

/// Computes the renames for `mode` over the matched repo tags.
///
/// `all_images` is the full daemon listing, used to avoid clobbering an
/// existing target.
///
/// # Errors
///
/// - `DockerError::EmptyArgument` for an empty suffix or prefix.
/// - `DockerError::InvalidRepoTag` for a repo tag without a tag part.
/// - `DockerError::InvalidTag` when a computed tag is not a valid tag.
/// - `DockerError::InvalidReference` when a name does not normalize.
pub fn plan_rewrite(
    inventory: &ImageMap,
    all_images: &[ImageSummary],
    mode: &RewriteMode,
) -> Result<RewritePlan, DockerError> {
    match mode {
        RewriteMode::AppendSuffix(s) | RewriteMode::RemoveSuffix(s) if s.is_empty() => {
            return Err(DockerError::EmptyArgument { name: "TAG_SUFFIX" });
        }
        RewriteMode::SetPathPrefix(p) if p.is_empty() => {
            return Err(DockerError::EmptyArgument { name: "PATH_PREFIX" });
        }
        _ => {}
    }

    let mut plan = RewritePlan::default();
    for repo_tag in inventory.sorted_names() {
        let parsed = RepoTag::parse(repo_tag)?;
        let target = match mode {
            RewriteMode::AppendSuffix(suffix) => append_suffix(&parsed, suffix, all_images)?,
            RewriteMode::RemoveSuffix(suffix) => remove_suffix(&parsed, suffix)?,
            RewriteMode::SetPathPrefix(prefix) => set_path_prefix(&parsed, prefix)?,
        };

        match target {
            Target::Op(op) if plan.ops.iter().any(|planned| planned.to == op.to) => {
                plan.skip(repo_tag, SkipReason::DuplicateTarget);
            }
            Target::Op(op) => plan.ops.push(op),
            Target::Skip(reason) => plan.skip(repo_tag, reason),
        }
    }
    Ok(plan)
}

enum Target {
    Op(TagOp),
    Skip(SkipReason),
}

fn append_suffix(
    repo_tag: &RepoTag,
    suffix: &str,
    all_images: &[ImageSummary],
) -> Result<Target, DockerError> {
    if repo_tag.tag() == "latest" {
        return Ok(Target::Skip(SkipReason::LatestTag));
    }
    if repo_tag.tag().ends_with(&format!("-{suffix}")) {
        return Ok(Target::Skip(SkipReason::AlreadySuffixed));
    }

    let new_tag = format!("{}-{suffix}", repo_tag.tag());
    if !is_valid_tag(&new_tag) {
        return Err(DockerError::InvalidTag { tag: new_tag });
    }

    let to = repo_tag.with_tag(new_tag).to_string();
    if contains_repo_tag(all_images, &to) {
        return Ok(Target::Skip(SkipReason::TargetExists));
    }

    Ok(Target::Op(TagOp {
        from: repo_tag.to_string(),
        to,
    }))
}

fn remove_suffix(repo_tag: &RepoTag, suffix: &str) -> Result<Target, DockerError> {
    let Some(new_tag) = repo_tag.tag().strip_suffix(&format!("-{suffix}")) else {
        return Ok(Target::Skip(SkipReason::SuffixNotFound));
    };
    if !is_valid_tag(new_tag) {
        return Err(DockerError::InvalidTag {
            tag: new_tag.to_string(),
        });
    }

    Ok(Target::Op(TagOp {
        from: repo_tag.to_string(),
        to: repo_tag.with_tag(new_tag).to_string(),
    }))
}

fn set_path_prefix(repo_tag: &RepoTag, prefix: &str) -> Result<Target, DockerError> {
    let old_name = ImageName::parse_normalized(repo_tag.name())?;
    let qualified = old_name.to_string();
    let (_, last) = split_last_path(&qualified)?;
    let new_name = ImageName::parse_normalized(&format!("{prefix}/{last}"))?;

    let from = format!("{old_name}:{}", repo_tag.tag());
    if new_name == old_name {
        return Ok(Target::Skip(SkipReason::NoOp));
    }

    Ok(Target::Op(TagOp {
        from,
        to: format!("{new_name}:{}", repo_tag.tag()),
    }))
}
