// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ImageName, RepoTag, is_valid_tag, split_last_path, split_repo_tag};

#[test]
fn test_split_repo_tag() {
    assert_eq!(split_repo_tag("app:v1").ok(), Some(("app", "v1")));
    assert_eq!(
        split_repo_tag("registry.local:5000/team/app:1.2").ok(),
        Some(("registry.local:5000/team/app", "1.2"))
    );
}

#[test]
fn test_split_repo_tag_rejects_missing_tag() {
    for bad in ["app", "registry.local:5000/app", "app:", ":v1", ""] {
        let err = split_repo_tag(bad).expect_err(bad);
        assert_eq!(
            err.to_string(),
            format!("divisor ':' not found in RepoTag {bad}")
        );
    }
}

#[test]
fn test_repo_tag_with_tag() {
    let repo_tag = RepoTag::parse("team/app:1.0").expect("valid repo tag");
    assert_eq!(repo_tag.name(), "team/app");
    assert_eq!(repo_tag.tag(), "1.0");
    assert_eq!(repo_tag.with_tag("1.0-dev").to_string(), "team/app:1.0-dev");
}

#[test]
fn test_is_valid_tag() {
    let long_ok = "a".repeat(128);
    let too_long = "a".repeat(129);

    for good in ["v", "1", "_x", "v1.2.3-rc_1", long_ok.as_str()] {
        assert!(is_valid_tag(good), "{good} should be valid");
    }
    for bad in ["", ".v1", "-v1", "v1/x", "v:1", "vé", too_long.as_str()] {
        assert!(!is_valid_tag(bad), "{bad} should be invalid");
    }
}

#[test]
fn test_split_last_path() {
    assert_eq!(
        split_last_path("docker.io/library/app").ok(),
        Some(("docker.io/library", "app"))
    );
    assert_eq!(split_last_path("app").ok(), Some(("", "app")));
    assert!(split_last_path("").is_err());
}

#[test]
fn test_parse_normalized() {
    let cases = [
        "app",
        "team/app",
        "index.docker.io/app",
        "localhost/app",
        "registry.local:5000/team/app",
    ];
    let normalized: Vec<String> = cases
        .iter()
        .map(|c| ImageName::parse_normalized(c).expect(c).to_string())
        .collect();

    insta::assert_snapshot!(normalized.join("\n"), @r"
    docker.io/library/app
    docker.io/team/app
    docker.io/library/app
    localhost/app
    registry.local:5000/team/app
    ");
}

#[test]
fn test_parse_normalized_rejects() {
    let too_long = format!("team/{}", "a".repeat(300));
    for bad in [
        "",
        "docker.io/App",
        "team/App",
        "team/-app",
        "team//app",
        "a..b",
        "team/app:1.0",
        "team/app@sha256:abc",
        too_long.as_str(),
    ] {
        assert!(ImageName::parse_normalized(bad).is_err(), "{bad} should fail");
    }
}

#[test]
fn test_path_component_separators() {
    for good in ["a.b", "a_b", "a__b", "a---b", "a1-b2.c3"] {
        assert!(ImageName::parse_normalized(good).is_ok(), "{good}");
    }
    assert!(ImageName::parse_normalized("a___b").is_err());
    assert!(ImageName::parse_normalized("a.").is_err());
}
