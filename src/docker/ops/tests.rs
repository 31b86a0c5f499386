// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{apply_plan, find_images, label_images, move_tag, parse_labels, push_images};
use crate::docker::engine::{ImageEngine, RemoveResponse};
use crate::docker::inventory::{ImageSummary, make_regex};
use crate::docker::rewrite::TagOp;
use crate::error::{DockerError, Result};

/// In-memory daemon recording every call.
#[derive(Default)]
struct FakeEngine {
    images: RefCell<Vec<ImageSummary>>,
    calls: RefCell<Vec<String>>,
    fail_on: Option<String>,
}

impl FakeEngine {
    fn with_images(images: Vec<ImageSummary>) -> Self {
        Self {
            images: RefCell::new(images),
            ..Self::default()
        }
    }

    fn failing_on(mut self, reference: &str) -> Self {
        self.fail_on = Some(reference.to_string());
        self
    }

    fn record(&self, call: String) -> Result<()> {
        let fails = self.fail_on.as_ref().is_some_and(|f| call.contains(f.as_str()));
        self.calls.borrow_mut().push(call.clone());
        if fails {
            return Err(DockerError::CommandFailed {
                command: call,
                message: "simulated failure".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn calls(&self) -> String {
        self.calls.borrow().join("\n")
    }

    fn repo_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .images
            .borrow()
            .iter()
            .flat_map(|i| i.repo_tags.clone())
            .collect();
        tags.sort();
        tags
    }
}

impl ImageEngine for FakeEngine {
    async fn list_images(&self) -> Result<Vec<ImageSummary>> {
        self.record("list".to_string())?;
        Ok(self.images.borrow().clone())
    }

    async fn tag_image(&self, from: &str, to: &str) -> Result<()> {
        self.record(format!("tag {from} {to}"))?;
        let mut images = self.images.borrow_mut();
        let image = images
            .iter_mut()
            .find(|i| i.repo_tags.iter().any(|t| t == from))
            .ok_or_else(|| DockerError::Engine {
                status: 404,
                message: format!("No such image: {from}"),
            })?;
        image.repo_tags.push(to.to_string());
        Ok(())
    }

    async fn remove_image(&self, reference: &str) -> Result<Vec<RemoveResponse>> {
        self.record(format!("rm {reference}"))?;
        let mut images = self.images.borrow_mut();
        let mut removed = Vec::new();
        for image in images.iter_mut() {
            if let Some(pos) = image.repo_tags.iter().position(|t| t == reference) {
                image.repo_tags.remove(pos);
                removed.push(RemoveResponse::untagged(reference));
                if image.repo_tags.is_empty() {
                    removed.push(RemoveResponse::deleted(image.id.clone()));
                }
            }
        }
        images.retain(|i| !i.repo_tags.is_empty());
        Ok(removed)
    }

    async fn push_image(&self, reference: &str) -> Result<()> {
        self.record(format!("push {reference}"))
    }

    async fn build_image(
        &self,
        dockerfile: &str,
        labels: &BTreeMap<String, String>,
        tags: &[String],
    ) -> Result<()> {
        let labels: Vec<String> = labels.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.record(format!(
            "build [{}] labels={} tags={}",
            dockerfile.trim(),
            labels.join(","),
            tags.join(",")
        ))
    }
}

fn sample_images() -> Vec<ImageSummary> {
    vec![
        ImageSummary::new("sha256:aaa", ["team/api:1.0", "team/api:latest"]),
        ImageSummary::new("sha256:bbb", ["team/web:2.0"]),
        ImageSummary::new("sha256:ccc", ["<none>:<none>"]),
    ]
}

fn op(from: &str, to: &str) -> TagOp {
    TagOp {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[tokio::test]
async fn test_find_images() {
    let engine = FakeEngine::with_images(sample_images());
    let regex = make_regex("team/").expect("regex");

    let found = find_images(&engine, &regex).await.expect("find");
    assert_eq!(
        found.sorted_names(),
        ["team/api:1.0", "team/api:latest", "team/web:2.0"]
    );
}

#[tokio::test]
async fn test_move_tag_keeps_shared_image() {
    let engine = FakeEngine::with_images(sample_images());

    let report = move_tag(&engine, &op("team/api:1.0", "team/api:1.0-dev"))
        .await
        .expect("move");

    insta::assert_snapshot!(report.to_string(), @r"
    tagged from:team/api:1.0
             to:team/api:1.0-dev
    untagged: team/api:1.0
    ");
    assert_eq!(
        engine.repo_tags(),
        ["<none>:<none>", "team/api:1.0-dev", "team/api:latest", "team/web:2.0"]
    );
}

#[tokio::test]
async fn test_move_tag_single_tag_image() {
    let engine = FakeEngine::with_images(vec![ImageSummary::new("sha256:bbb", ["team/web:2.0"])]);

    let report = move_tag(&engine, &op("team/web:2.0", "team/web:2.0-dev"))
        .await
        .expect("move");

    assert_eq!(
        report.removed,
        [RemoveResponse::untagged("team/web:2.0")]
    );
    assert_eq!(engine.repo_tags(), ["team/web:2.0-dev"]);
}

#[tokio::test]
async fn test_move_tag_removal_error_propagates() {
    let engine = FakeEngine::with_images(sample_images()).failing_on("rm team/web:2.0");

    let err = move_tag(&engine, &op("team/web:2.0", "team/web:2.0-dev"))
        .await
        .expect_err("removal fails");

    assert!(err.to_string().contains("simulated failure"));
    assert_eq!(engine.calls(), "tag team/web:2.0 team/web:2.0-dev\nrm team/web:2.0");
}

#[tokio::test]
async fn test_apply_plan_applies_every_op() {
    let engine = FakeEngine::with_images(sample_images());
    let ops = [
        op("team/api:1.0", "team/api:1.0-dev"),
        op("team/web:2.0", "team/web:2.0-dev"),
    ];

    let mut moved = Vec::new();
    apply_plan(&engine, &ops, |report| moved.push(report.op.to.clone()))
        .await
        .expect("apply");

    assert_eq!(moved, ["team/api:1.0-dev", "team/web:2.0-dev"]);
    insta::assert_snapshot!(engine.calls(), @r"
    tag team/api:1.0 team/api:1.0-dev
    rm team/api:1.0
    tag team/web:2.0 team/web:2.0-dev
    rm team/web:2.0
    ");
}

#[tokio::test]
async fn test_apply_plan_stops_at_first_failure() {
    let engine = FakeEngine::with_images(sample_images()).failing_on("tag team/api:1.0");
    let ops = [
        op("team/api:1.0", "team/api:1.0-dev"),
        op("team/web:2.0", "team/web:2.0-dev"),
    ];

    let mut moved = 0;
    let result = apply_plan(&engine, &ops, |_| moved += 1).await;

    assert!(result.is_err());
    assert_eq!(moved, 0);
    assert_eq!(engine.calls(), "tag team/api:1.0 team/api:1.0-dev");
}

#[tokio::test]
async fn test_push_images_sorted() {
    let engine = FakeEngine::with_images(sample_images());
    let regex = make_regex("team/").expect("regex");
    let found = find_images(&engine, &regex).await.expect("find");

    let pushed = push_images(&engine, &found).await.expect("push");

    assert_eq!(pushed.len(), 3);
    insta::assert_snapshot!(engine.calls(), @r"
    list
    push team/api:1.0
    push team/api:latest
    push team/web:2.0
    ");
}

#[test]
fn test_parse_labels() {
    let labels = parse_labels(&["org.opencontainers.image.source=repo", "team=platform"])
        .expect("labels parse");
    assert_eq!(labels.get("team").map(String::as_str), Some("platform"));
    assert_eq!(labels.len(), 2);

    for bad in ["novalue", "=value", "key=", "a=b=c", ""] {
        let err = parse_labels(&[bad]).expect_err(bad);
        assert!(matches!(err, DockerError::InvalidLabel { .. }), "{bad}");
    }
}

#[tokio::test]
async fn test_label_images() {
    let engine = FakeEngine::with_images(sample_images());
    let regex = make_regex("web").expect("regex");
    let found = find_images(&engine, &regex).await.expect("find");
    let labels = parse_labels(&["team=platform", "env=prod"]).expect("labels");

    let labelled = label_images(&engine, &found, &labels).await.expect("label");

    assert_eq!(labelled, ["team/web:2.0"]);
    insta::assert_snapshot!(engine.calls(), @r"
    list
    build [FROM team/web:2.0] labels=env=prod,team=platform tags=team/web:2.0
    ");
}
