// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Read;

use super::api::{EngineApi, dockerfile_context, handle_stream_line};
use super::cli::{parse_image_rows, parse_remove_output};
use super::RemoveResponse;
use crate::error::DockerError;

#[test]
fn test_parse_image_rows_groups_by_id() {
    let stdout = r#"
{"Containers":"N/A","ID":"sha256:aaa","Repository":"team/api","Tag":"1.0"}
{"ID":"sha256:bbb","Repository":"<none>","Tag":"<none>"}
{"ID":"sha256:aaa","Repository":"team/api","Tag":"latest"}
{"ID":"sha256:ccc","Repository":"team/web","Tag":"<none>"}
"#;

    let images = parse_image_rows("docker image ls", stdout).expect("rows parse");

    let rendered: Vec<String> = images
        .iter()
        .map(|i| format!("{} [{}]", i.id, i.repo_tags.join(", ")))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    sha256:aaa [team/api:1.0, team/api:latest]
    sha256:bbb [<none>:<none>]
    sha256:ccc []
    ");
    assert!(images[1].is_dangling());
    assert!(images[2].is_dangling());
}

#[test]
fn test_parse_image_rows_rejects_garbage() {
    let err = parse_image_rows("docker image ls", "not json").expect_err("garbage");
    assert!(matches!(
        err.downcast_ref::<DockerError>(),
        Some(DockerError::UnexpectedOutput { .. })
    ));
}

#[test]
fn test_parse_remove_output() {
    let stdout = "Untagged: team/api:1.0\nUntagged: team/api@sha256:123\nDeleted: sha256:aaa\nsomething else\n";

    assert_eq!(
        parse_remove_output(stdout),
        [
            RemoveResponse::untagged("team/api:1.0"),
            RemoveResponse::untagged("team/api@sha256:123"),
            RemoveResponse::deleted("sha256:aaa"),
        ]
    );
}

#[test]
fn test_stream_line_error_fails() {
    let err = handle_stream_line("push", br#"{"error":"denied: requested access to the resource is denied"}"#)
        .expect_err("error message");
    assert_eq!(
        err.to_string(),
        "push failed: denied: requested access to the resource is denied"
    );

    let err = handle_stream_line("build", br#"{"errorDetail":{"message":"boom"}}"#)
        .expect_err("error detail");
    assert_eq!(err.to_string(), "build failed: boom");
}

#[test]
fn test_stream_line_progress_is_ok() {
    for line in [
        &br#"{"stream":"Step 1/1 : FROM alpine\n"}"#[..],
        &br#"{"status":"Pushing","id":"abc"}"#[..],
        &br#"{"aux":{"ID":"sha256:1"}}"#[..],
        &b"   "[..],
        &b"not json"[..],
    ] {
        assert!(handle_stream_line("build", line).is_ok());
    }
}

#[test]
fn test_dockerfile_context_holds_dockerfile() {
    let dockerfile = "FROM team/api:1.0\n";
    let bytes = dockerfile_context(dockerfile).expect("tar builds");

    let mut archive = tar::Archive::new(bytes.as_slice());
    let mut entries = archive.entries().expect("entries");
    let mut entry = entries.next().expect("one entry").expect("valid entry");

    assert_eq!(
        entry.path().expect("path").to_string_lossy(),
        "Dockerfile"
    );
    let mut content = String::new();
    entry.read_to_string(&mut content).expect("read");
    assert_eq!(content, dockerfile);
    drop(entry);
    assert!(entries.next().is_none());
}

#[test]
fn test_engine_api_host_schemes() {
    assert!(EngineApi::new("tcp://127.0.0.1:2375").is_ok());
    assert!(EngineApi::new("http://localhost:2375/").is_ok());
    assert!(EngineApi::new("https://docker.example:2376").is_ok());

    let err = EngineApi::new("unix:///var/run/docker.sock").expect_err("unix socket");
    assert!(matches!(err, DockerError::UnsupportedHost { .. }));
}
