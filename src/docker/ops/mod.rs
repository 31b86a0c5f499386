// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Applying plans against an [`ImageEngine`].
//!
//! ```text
//! find_images  list --> ImageMap::find
//! move_tag     tag(to) --> remove(from) --> MoveReport
//! apply_plan   move_tag for every op, stop at first failure
//! push_images  push every matched repo tag, sorted
//! label_images build "FROM <repo tag>" + labels, tagged <repo tag>
//! ```

#[cfg(test)]
mod tests;

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

use super::engine::{ImageEngine, RemoveResponse};
use super::inventory::ImageMap;
use super::rewrite::TagOp;
use crate::error::{DockerError, Result};

/// Outcome of one tag move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub op: TagOp,
    pub removed: Vec<RemoveResponse>,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tagged from:{}\n         to:{}", self.op.from, self.op.to)?;
        for entry in &self.removed {
            if let Some(id) = &entry.deleted {
                write!(f, "\ndeleted: {id}")?;
            }
            if let Some(reference) = &entry.untagged {
                write!(f, "\nuntagged: {reference}")?;
            }
        }
        Ok(())
    }
}

/// Lists the daemon and keeps the repo tags matching `regex`.
///
/// # Errors
///
/// Returns an error if the daemon listing fails.
pub async fn find_images<E: ImageEngine>(engine: &E, regex: &Regex) -> Result<ImageMap> {
    let images = engine.list_images().await?;
    let found = ImageMap::find(&images, regex);
    debug!(listed = images.len(), matched = found.len(), "images found");
    Ok(found)
}

/// Tags `op.from` as `op.to`, then removes `op.from`.
///
/// # Errors
///
/// Returns an error if tagging or removal fails; a failed removal leaves
/// both repo tags in place.
pub async fn move_tag<E: ImageEngine>(engine: &E, op: &TagOp) -> Result<MoveReport> {
    engine.tag_image(&op.from, &op.to).await?;
    let removed = engine.remove_image(&op.from).await?;
    info!(from = %op.from, to = %op.to, "moved tag");
    Ok(MoveReport {
        op: op.clone(),
        removed,
    })
}

/// Applies every op in order, handing each report to `on_moved`.
///
/// # Errors
///
/// Stops at and returns the first failure.
pub async fn apply_plan<E, F>(engine: &E, ops: &[TagOp], mut on_moved: F) -> Result<()>
where
    E: ImageEngine,
    F: FnMut(&MoveReport),
{
    for op in ops {
        let report = move_tag(engine, op).await?;
        on_moved(&report);
    }
    Ok(())
}

/// Pushes every matched repo tag in sorted order.
///
/// # Errors
///
/// Stops at and returns the first failed push.
pub async fn push_images<E: ImageEngine>(engine: &E, images: &ImageMap) -> Result<Vec<String>> {
    let mut pushed = Vec::with_capacity(images.len());
    for repo_tag in images.sorted_names() {
        info!(repo_tag, "pushing");
        engine.push_image(repo_tag).await?;
        pushed.push(repo_tag.to_string());
    }
    Ok(pushed)
}

/// Parses `key=value` labels.
///
/// # Errors
///
/// Returns `DockerError::InvalidLabel` unless the label splits on `=` into
/// exactly two non-empty parts.
pub fn parse_labels<S: AsRef<str>>(
    labels: &[S],
) -> std::result::Result<BTreeMap<String, String>, DockerError> {
    labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            let mut parts = label.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => {
                    Ok((key.to_string(), value.to_string()))
                }
                _ => Err(DockerError::InvalidLabel {
                    label: label.to_string(),
                }),
            }
        })
        .collect()
}

/// Rebuilds each matched image with `labels` added, under the same repo tag.
///
/// # Errors
///
/// Stops at and returns the first failed build.
pub async fn label_images<E: ImageEngine>(
    engine: &E,
    images: &ImageMap,
    labels: &BTreeMap<String, String>,
) -> Result<Vec<String>> {
    let mut labelled = Vec::with_capacity(images.len());
    for repo_tag in images.sorted_names() {
        let dockerfile = format!("FROM {repo_tag}\n");
        info!(repo_tag, labels = labels.len(), "labelling");
        engine
            .build_image(&dockerfile, labels, &[repo_tag.to_string()])
            .await?;
        labelled.push(repo_tag.to_string());
    }
    Ok(labelled)
}
