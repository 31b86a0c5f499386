// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::DockerBackend;
use super::{Config, ConfigLoader};
use crate::error::ConfigError;
use crate::logging::LogLevel;
use std::path::PathBuf;

fn parse(toml: &str) -> crate::error::Result<Config> {
    Config::builder().add_toml_str(toml).build()
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(!config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert!(config.global.log_file.is_none());
    assert_eq!(config.docker.backend, DockerBackend::Cli);
    assert_eq!(config.docker.binary, PathBuf::from("docker"));
    assert_eq!(config.git.remote, "origin");
}

#[test]
fn test_docker_backend_parse() {
    let parsed: Vec<String> = ["cli", "API", "socket"]
        .iter()
        .map(|backend| {
            let toml = format!("[docker]\nbackend = \"{backend}\"\nhost = \"tcp://h:2375\"\n");
            match parse(&toml) {
                Ok(config) => config.docker.backend.to_string(),
                Err(_) => "err".to_string(),
            }
        })
        .collect();

    insta::assert_snapshot!(parsed.join(" "), @"cli err err");
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
dry = true
output_log_level = 4

[docker]
backend = "api"
host = "tcp://127.0.0.1:2375"

[git]
remote = "upstream"
"#;

    let config = parse(toml).expect("config should parse");

    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.docker.backend, DockerBackend::Api);
    assert_eq!(config.docker.host.as_deref(), Some("tcp://127.0.0.1:2375"));
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.git.binary, PathBuf::from("git"));
}

#[test]
fn test_api_backend_requires_host() {
    let err = parse("[docker]\nbackend = \"api\"\n").expect_err("host is required");

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::MissingKey { key, .. }) if key == "host"
    ));
}

#[test]
fn test_log_level_out_of_range_rejected() {
    assert!(parse("[global]\noutput_log_level = 9\n").is_err());
}

#[test]
fn test_deny_unknown_fields() {
    assert!(parse("[docker]\nbackend = \"cli\"\nsocket = \"/run/docker.sock\"\n").is_err());
    assert!(parse("[unknown_section]\nfoo = \"bar\"\n").is_err());
}

#[test]
fn test_set_override_wins() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\ndry = false\n")
        .set("global.dry", true)
        .expect("override key is valid")
        .build()
        .expect("config should build");

    assert!(config.global.dry);
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\n dry = true")
        .add_toml_file_optional("/nonexistent/ply.toml")
        .add_toml_str("[git]\n remote = \"fork\"");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @r"
    1. [string] <string>
    2. [string] <string>
    ");
}

#[test]
fn test_config_loads_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ply.toml");
    std::fs::write(&path, "[docker]\nbinary = \"/usr/local/bin/docker\"\n").expect("write");

    let config = Config::builder()
        .add_toml_file(&path)
        .build()
        .expect("config should load");
    assert_eq!(config.docker.binary, PathBuf::from("/usr/local/bin/docker"));
}

#[test]
fn test_missing_required_file_fails() {
    assert!(
        Config::builder()
            .add_toml_file("/nonexistent/ply.toml")
            .build()
            .is_err()
    );
}

#[test]
fn test_format_options_hides_registry_auth() {
    let config = parse("[docker]\nregistry_auth = \"c2VjcmV0\"\n").expect("parse");

    let formatted = config.format_options().join("\n");
    assert!(formatted.contains("docker.registry_auth") && formatted.contains("[hidden]"));
    assert!(!formatted.contains("c2VjcmV0"));
}

#[test]
fn test_format_options_default() {
    let options = Config::default().format_options();

    assert_eq!(options.len(), 9);
    assert_eq!(options[0], "docker.backend          = cli");
    assert_eq!(options[4], "git.remote              = origin");
    assert_eq!(options[8], "global.output_log_level = 3");
}
