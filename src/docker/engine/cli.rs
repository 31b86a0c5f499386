// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `docker` binary backend.
//!
//! ```text
//! list   docker image ls --all --no-trunc --format {{json .}}
//! tag    docker tag FROM TO
//! remove docker image rm REF       → Untagged: / Deleted: lines
//! push   docker push REF           (stdout inherited)
//! build  docker build --label k=v -t TAG -   (Dockerfile on stdin)
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{ImageEngine, RemoveResponse};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::docker::inventory::{DANGLING_REPO_TAG, ImageSummary};
use crate::error::{DockerError, Result};

const NONE: &str = "<none>";

/// Row printed by `docker image ls --format '{{json .}}'`.
#[derive(Debug, Deserialize)]
struct ImageRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Repository")]
    repository: String,
    #[serde(rename = "Tag")]
    tag: String,
}

/// Talks to the daemon by running the `docker` executable.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: PathBuf,
    host: Option<String>,
    token: CancellationToken,
}

impl DockerCli {
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            host: None,
            token: CancellationToken::new(),
        }
    }

    /// Exported as `DOCKER_HOST` to every invocation.
    #[must_use]
    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    /// Push and build stop when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    fn command<I, S>(&self, args: I) -> ProcessBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut builder = ProcessBuilder::new(&self.binary).name("docker").args(args);
        if let Some(host) = &self.host {
            builder = builder.env_var("DOCKER_HOST", host);
        }
        builder
    }

    /// Runs a short command, turning a failed exit into `DockerError::CommandFailed`.
    async fn run_captured(builder: ProcessBuilder) -> Result<ProcessOutput> {
        let command = builder.command_line();
        let output = builder
            .capture_output()
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;
        check_exit(command, &output)?;
        Ok(output)
    }

    /// Runs a long command with stdout shown to the user.
    async fn run_streamed(&self, builder: ProcessBuilder) -> Result<()> {
        let command = builder.command_line();
        let output = builder
            .stdout_flags(StreamFlags::INHERIT)
            .capture_stderr()
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run_with_cancellation(self.token.clone())
            .await?;
        check_exit(command, &output)
    }
}

fn check_exit(command: String, output: &ProcessOutput) -> Result<()> {
    if output.success() {
        return Ok(());
    }
    let message = match output.stderr().trim() {
        "" => format!("exit code {}", output.exit_code()),
        stderr => stderr.to_string(),
    };
    Err(DockerError::CommandFailed { command, message }.into())
}

/// Groups `docker image ls` rows by image ID, keeping first-seen order.
pub(super) fn parse_image_rows(command: &str, stdout: &str) -> Result<Vec<ImageSummary>> {
    let mut images: Vec<ImageSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let row: ImageRow =
            serde_json::from_str(line).map_err(|e| DockerError::UnexpectedOutput {
                command: command.to_string(),
                message: format!("{e}: {line}"),
            })?;

        let slot = *index.entry(row.id.clone()).or_insert_with(|| {
            images.push(ImageSummary::new(row.id.clone(), Vec::<String>::new()));
            images.len() - 1
        });

        let repo_tag = if row.repository == NONE && row.tag == NONE {
            Some(DANGLING_REPO_TAG.to_string())
        } else if row.repository == NONE || row.tag == NONE {
            None
        } else {
            Some(format!("{}:{}", row.repository, row.tag))
        };
        if let Some(repo_tag) = repo_tag {
            images[slot].repo_tags.push(repo_tag);
        }
    }
    Ok(images)
}

/// Parses the `Untagged: x` / `Deleted: y` report of `docker image rm`.
pub(super) fn parse_remove_output(stdout: &str) -> Vec<RemoveResponse> {
    stdout
        .lines()
        .filter_map(|line| {
            let (kind, value) = line.trim().split_once(": ")?;
            match kind {
                "Untagged" => Some(RemoveResponse::untagged(value)),
                "Deleted" => Some(RemoveResponse::deleted(value)),
                _ => {
                    debug!(line, "ignoring image rm output");
                    None
                }
            }
        })
        .collect()
}

impl ImageEngine for DockerCli {
    async fn list_images(&self) -> Result<Vec<ImageSummary>> {
        let builder = self.command(["image", "ls", "--all", "--no-trunc", "--format", "{{json .}}"]);
        let command = builder.command_line();
        let output = Self::run_captured(builder).await?;
        parse_image_rows(&command, output.stdout())
    }

    async fn tag_image(&self, from: &str, to: &str) -> Result<()> {
        Self::run_captured(self.command(["tag", from, to])).await?;
        Ok(())
    }

    async fn remove_image(&self, reference: &str) -> Result<Vec<RemoveResponse>> {
        let output = Self::run_captured(self.command(["image", "rm", reference])).await?;
        Ok(parse_remove_output(output.stdout()))
    }

    async fn push_image(&self, reference: &str) -> Result<()> {
        self.run_streamed(self.command(["push", reference])).await
    }

    async fn build_image(
        &self,
        dockerfile: &str,
        labels: &BTreeMap<String, String>,
        tags: &[String],
    ) -> Result<()> {
        let mut args = vec!["build".to_string()];
        for (key, value) in labels {
            args.push("--label".to_string());
            args.push(format!("{key}={value}"));
        }
        for tag in tags {
            args.push("-t".to_string());
            args.push(tag.clone());
        }
        args.push("-".to_string());

        self.run_streamed(self.command(args).stdin(dockerfile)).await
    }
}
