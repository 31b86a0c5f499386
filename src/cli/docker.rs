// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `docker-regex` command arguments.
//!
//! # Subcommands
//!
//! ```text
//! docker-regex images REGEX
//! docker-regex push REGEX
//! docker-regex set-path-prefix REGEX PATH_PREFIX
//! docker-regex tag-suffix append REGEX TAG_SUFFIX
//! docker-regex tag-suffix remove REGEX TAG_SUFFIX
//! docker-regex label-images REGEX -l key=value...
//! ```

use clap::{Args, Subcommand};

/// Arguments for the `docker-regex` command.
#[derive(Debug, Clone, Args)]
pub struct DockerRegexArgs {
    #[command(subcommand)]
    pub subcommand: DockerRegexSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DockerRegexSubcommand {
    /// Lists the repo tags matching REGEX.
    Images(RegexArgs),

    /// Pushes every repo tag matching REGEX.
    Push(RegexArgs),

    /// Moves matching images under PATH_PREFIX, keeping the last path
    /// component and the tag.
    #[command(name = "set-path-prefix")]
    SetPathPrefix(SetPathPrefixArgs),

    /// Adds or strips a `-SUFFIX` on the tag of matching images.
    #[command(name = "tag-suffix")]
    TagSuffix(TagSuffixArgs),

    /// Rebuilds matching images with extra labels.
    #[command(name = "label-images")]
    LabelImages(LabelImagesArgs),
}

/// A single repo-tag regex.
#[derive(Debug, Clone, Args)]
pub struct RegexArgs {
    /// Regex matched against `name:tag` (unanchored).
    #[arg(value_name = "REGEX")]
    pub regex: String,
}

#[derive(Debug, Clone, Args)]
pub struct SetPathPrefixArgs {
    /// Regex matched against `name:tag` (unanchored).
    #[arg(value_name = "REGEX")]
    pub regex: String,

    /// New registry/path prefix, e.g. `registry.local:5000/mirror`.
    #[arg(value_name = "PATH_PREFIX")]
    pub path_prefix: String,
}

#[derive(Debug, Clone, Args)]
pub struct TagSuffixArgs {
    #[command(subcommand)]
    pub action: TagSuffixAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TagSuffixAction {
    /// Renames `name:tag` to `name:tag-SUFFIX`. `latest` is left alone.
    Append(SuffixArgs),

    /// Renames `name:tag-SUFFIX` to `name:tag`.
    Remove(SuffixArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SuffixArgs {
    /// Regex matched against `name:tag` (unanchored).
    #[arg(value_name = "REGEX")]
    pub regex: String,

    /// Suffix without the leading `-`.
    #[arg(value_name = "TAG_SUFFIX")]
    pub suffix: String,
}

#[derive(Debug, Clone, Args)]
pub struct LabelImagesArgs {
    /// Regex matched against `name:tag` (unanchored).
    #[arg(value_name = "REGEX")]
    pub regex: String,

    /// Label to add, as `key=value`. Can be specified multiple times.
    #[arg(short = 'l', long = "label", value_name = "KEY=VALUE", required = true, action = clap::ArgAction::Append)]
    pub labels: Vec<String>,
}
