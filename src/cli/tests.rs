// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::docker::{DockerRegexSubcommand, TagSuffixAction};
use crate::cli::git::GitSubcommand;
use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("arguments should parse")
}

#[test]
fn test_parse_version() {
    let cli = parse(&["ply", "version"]);
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = parse(&[
        "ply",
        "-l",
        "5",
        "--dry",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--docker-host",
        "tcp://10.0.0.1:2375",
        "options",
    ]);

    assert_eq!(cli.global.log_level, Some(5));
    assert!(cli.global.dry);
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );

    let overrides: Vec<String> = cli
        .global
        .to_config_overrides()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    insta::assert_snapshot!(overrides.join("\n"), @r"
    global.output_log_level=5
    global.file_log_level=5
    global.dry=true
    docker.host=tcp://10.0.0.1:2375
    ");
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["ply", "-l", "7", "version"]).is_err());
}

#[test]
fn test_parse_tag_suffix_append() {
    let cli = parse(&["ply", "docker-regex", "tag-suffix", "append", "^team/", "dev"]);

    let Some(Command::DockerRegex(args)) = cli.command else {
        panic!("expected docker-regex");
    };
    let DockerRegexSubcommand::TagSuffix(ts) = args.subcommand else {
        panic!("expected tag-suffix");
    };
    let TagSuffixAction::Append(suffix) = ts.action else {
        panic!("expected append");
    };
    assert_eq!(suffix.regex, "^team/");
    assert_eq!(suffix.suffix, "dev");
}

#[test]
fn test_parse_set_path_prefix() {
    let cli = parse(&["ply", "docker-regex", "set-path-prefix", "api", "registry.local/mirror"]);

    let Some(Command::DockerRegex(args)) = cli.command else {
        panic!("expected docker-regex");
    };
    let DockerRegexSubcommand::SetPathPrefix(sp) = args.subcommand else {
        panic!("expected set-path-prefix");
    };
    assert_eq!(sp.path_prefix, "registry.local/mirror");
}

#[test]
fn test_parse_label_images() {
    let cli = parse(&[
        "ply",
        "docker-regex",
        "label-images",
        "api",
        "-l",
        "team=platform",
        "--label",
        "env=prod",
    ]);

    let Some(Command::DockerRegex(args)) = cli.command else {
        panic!("expected docker-regex");
    };
    let DockerRegexSubcommand::LabelImages(li) = args.subcommand else {
        panic!("expected label-images");
    };
    assert_eq!(li.labels, ["team=platform", "env=prod"]);
}

#[test]
fn test_label_images_requires_label() {
    assert!(Cli::try_parse_from(["ply", "docker-regex", "label-images", "api"]).is_err());
}

#[test]
fn test_missing_positional_is_error() {
    assert!(Cli::try_parse_from(["ply", "docker-regex", "push"]).is_err());
    assert!(Cli::try_parse_from(["ply", "docker-regex", "tag-suffix", "remove", "api"]).is_err());
}

#[test]
fn test_parse_git_clone() {
    let cli = parse(&[
        "ply",
        "git",
        "clone",
        "https://example.com/org/app.git",
        "-d",
        "/tmp/app",
        "-r",
        "main",
    ]);

    let Some(Command::Git(args)) = cli.command else {
        panic!("expected git");
    };
    let GitSubcommand::Clone(clone) = args.subcommand;
    assert_eq!(clone.url, "https://example.com/org/app.git");
    assert_eq!(clone.dir, Some(PathBuf::from("/tmp/app")));
    assert_eq!(clone.rev.as_deref(), Some("main"));
}
