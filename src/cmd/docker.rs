// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `docker-regex` command implementation.
//!
//! ```text
//! backend from config --> DockerCli | EngineApi
//!        |
//!        v
//! images / push / label-images : find --> print --> act (unless --dry)
//! set-path-prefix / tag-suffix : list --> plan_rewrite --> print --> apply_plan
//! ```

use std::io::Write;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::docker::{DockerRegexArgs, DockerRegexSubcommand, TagSuffixAction};
use crate::config::Config;
use crate::config::types::DockerBackend;
use crate::docker::engine::{DockerCli, EngineApi, ImageEngine};
use crate::docker::inventory::{ImageMap, make_regex};
use crate::docker::ops::{apply_plan, find_images, label_images, parse_labels, push_images};
use crate::docker::rewrite::{RewriteMode, SkipReason, plan_rewrite};
use crate::error::{ConfigError, Result};

/// Main handler for the `docker-regex` command.
///
/// # Errors
///
/// Returns an error if the backend cannot be set up or the operation fails.
pub async fn run_docker_regex_command<W: Write>(
    args: &DockerRegexArgs,
    config: &Config,
    token: CancellationToken,
    out: &mut W,
) -> Result<()> {
    let dry = config.global.dry;
    match config.docker.backend {
        DockerBackend::Cli => {
            let engine = DockerCli::new(&config.docker.binary)
                .with_host(config.docker.host.clone())
                .with_cancellation(token);
            run_with_engine(args, &engine, dry, out).await
        }
        DockerBackend::Api => {
            let host = config
                .docker
                .host
                .as_deref()
                .ok_or_else(|| ConfigError::MissingKey {
                    section: "docker".to_string(),
                    key: "host".to_string(),
                })?;
            let engine = EngineApi::new(host)?
                .with_registry_auth(config.docker.registry_auth.clone())
                .with_cancellation(token);
            run_with_engine(args, &engine, dry, out).await
        }
    }
}

/// Runs a `docker-regex` subcommand against `engine`.
///
/// # Errors
///
/// Returns an error if the regex, arguments or any daemon call fail.
pub async fn run_with_engine<E: ImageEngine, W: Write>(
    args: &DockerRegexArgs,
    engine: &E,
    dry: bool,
    out: &mut W,
) -> Result<()> {
    match &args.subcommand {
        DockerRegexSubcommand::Images(a) => list_matching(engine, &a.regex, out).await,
        DockerRegexSubcommand::Push(a) => push_matching(engine, &a.regex, dry, out).await,
        DockerRegexSubcommand::SetPathPrefix(a) => {
            let mode = RewriteMode::SetPathPrefix(a.path_prefix.clone());
            rewrite_matching(engine, &a.regex, &mode, dry, out).await
        }
        DockerRegexSubcommand::TagSuffix(ts) => {
            let (regex, mode) = match &ts.action {
                TagSuffixAction::Append(a) => (&a.regex, RewriteMode::AppendSuffix(a.suffix.clone())),
                TagSuffixAction::Remove(a) => (&a.regex, RewriteMode::RemoveSuffix(a.suffix.clone())),
            };
            rewrite_matching(engine, regex, &mode, dry, out).await
        }
        DockerRegexSubcommand::LabelImages(a) => {
            label_matching(engine, &a.regex, &a.labels, dry, out).await
        }
    }
}

fn write_list<'a, W: Write>(
    out: &mut W,
    header: &str,
    items: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    writeln!(out, "{header}")?;
    for item in items {
        writeln!(out, "  - {item}")?;
    }
    Ok(())
}

async fn list_matching<E: ImageEngine, W: Write>(engine: &E, regex: &str, out: &mut W) -> Result<()> {
    let found = find_images(engine, &make_regex(regex)?).await?;
    if found.is_empty() {
        writeln!(out, "No images match regex {regex}")?;
        return Ok(());
    }
    write_list(out, "Images found:", found.sorted_names())
}

async fn push_matching<E: ImageEngine, W: Write>(
    engine: &E,
    regex: &str,
    dry: bool,
    out: &mut W,
) -> Result<()> {
    let found = find_images(engine, &make_regex(regex)?).await?;
    if found.is_empty() {
        writeln!(out, "No images to push")?;
        return Ok(());
    }
    write_list(out, "Images to push:", found.sorted_names())?;
    if dry {
        return Ok(());
    }

    let pushed = push_images(engine, &found)
        .await
        .context("push aborted")?;
    info!(count = pushed.len(), "pushed images");
    Ok(())
}

async fn rewrite_matching<E: ImageEngine, W: Write>(
    engine: &E,
    regex: &str,
    mode: &RewriteMode,
    dry: bool,
    out: &mut W,
) -> Result<()> {
    let regex = make_regex(regex)?;
    let all_images = engine.list_images().await?;
    let found = ImageMap::find(&all_images, &regex);
    let plan = plan_rewrite(&found, &all_images, mode)?;

    for (repo_tag, reason) in &plan.skipped {
        writeln!(out, "{}", skip_line(repo_tag, *reason, mode))?;
    }
    if plan.is_empty() {
        match mode {
            RewriteMode::SetPathPrefix(_) => writeln!(out, "No images to modify")?,
            RewriteMode::AppendSuffix(_) | RewriteMode::RemoveSuffix(_) => {
                writeln!(out, "Nothing to do.")?;
            }
        }
        return Ok(());
    }

    let changes: Vec<String> = plan.ops.iter().map(ToString::to_string).collect();
    write_list(out, "Images to change:", changes.iter().map(String::as_str))?;
    if dry {
        return Ok(());
    }

    let mut write_error = None;
    apply_plan(engine, &plan.ops, |report| {
        if let Err(e) = writeln!(out, "{report}")
            && write_error.is_none()
        {
            write_error = Some(e);
        }
    })
    .await?;
    write_error.map_or(Ok(()), |e| Err(e.into()))
}

fn skip_line(repo_tag: &str, reason: SkipReason, mode: &RewriteMode) -> String {
    let suffix = match mode {
        RewriteMode::AppendSuffix(s) | RewriteMode::RemoveSuffix(s) => s.as_str(),
        RewriteMode::SetPathPrefix(_) => "",
    };
    match reason {
        SkipReason::LatestTag => format!("skipping {repo_tag} (avoid tagging 'latest-{suffix}')"),
        SkipReason::AlreadySuffixed => {
            format!("skipping {repo_tag} (already has suffix '-{suffix}')")
        }
        SkipReason::TargetExists => {
            format!("skipping {repo_tag} (already suffixed to '-{suffix}')")
        }
        SkipReason::SuffixNotFound => format!("skipping {repo_tag} (suffix '-{suffix}' not found)"),
        SkipReason::NoOp => format!("Skipping NOP retag: {repo_tag}"),
        SkipReason::DuplicateTarget => format!("skipping {repo_tag} ({reason})"),
    }
}

async fn label_matching<E: ImageEngine, W: Write>(
    engine: &E,
    regex: &str,
    labels: &[String],
    dry: bool,
    out: &mut W,
) -> Result<()> {
    let labels = parse_labels(labels)?;
    if labels.is_empty() {
        writeln!(out, "No labels defined; nothing to do")?;
        return Ok(());
    }
    let pairs: Vec<String> = labels.iter().map(|(k, v)| format!("{k}={v}")).collect();
    write_list(out, "Labels to add:", pairs.iter().map(String::as_str))?;

    let found = find_images(engine, &make_regex(regex)?).await?;
    if found.is_empty() {
        writeln!(out, "No images match regex {regex}")?;
        return Ok(());
    }
    write_list(out, "Images to add labels to:", found.sorted_names())?;
    if dry {
        return Ok(());
    }

    label_images(engine, &found, &labels).await?;
    Ok(())
}
