// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, DockerError, PlyError, PlyResult};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "docker".to_string(),
        key: "host".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'host' in section '[docker]'");
}

#[test]
fn test_docker_error_display() {
    let messages = vec![
        DockerError::EmptyArgument { name: "REGEX" }.to_string(),
        DockerError::InvalidRepoTag {
            repo_tag: "busybox".to_string(),
        }
        .to_string(),
        DockerError::InvalidTag {
            tag: "-canary".to_string(),
        }
        .to_string(),
    ];
    assert_eq!(
        messages,
        [
            "REGEX cannot be empty",
            "divisor ':' not found in RepoTag busybox",
            "new tag -canary is invalid",
        ]
    );
}

#[test]
fn test_boxed_conversion_keeps_message() {
    let err: PlyError = DockerError::EmptyArgument {
        name: "TAG_SUFFIX",
    }
    .into();
    assert_eq!(err.to_string(), "docker error: TAG_SUFFIX cannot be empty");
}

#[test]
fn test_ply_error_size() {
    // discriminant + thin box pointer
    let size = std::mem::size_of::<PlyError>();
    assert!(size <= 16, "PlyError is {size} bytes, expected <= 16");
}

#[test]
fn test_ply_result_size() {
    let size = std::mem::size_of::<PlyResult<()>>();
    assert!(size <= 24, "PlyResult<()> is {size} bytes, expected <= 24");
}
