// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Docker Engine REST API backend.
//!
//! ```text
//! GET    /images/json?all=1
//! POST   /images/{from}/tag?repo=R&tag=T
//! DELETE /images/{ref}
//! POST   /images/{name}/push?tag=T      X-Registry-Auth, JSON stream
//! POST   /build?t=T&labels={..}&rm=1     tar body, JSON stream
//! ```
//!
//! Only TCP hosts are reachable; `unix://` sockets need the CLI backend.

use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{ImageEngine, RemoveResponse};
use crate::docker::inventory::ImageSummary;
use crate::docker::reference::split_repo_tag;
use crate::error::{DockerError, Result};

/// Base64 of `{}`: anonymous registry access.
pub const ANONYMOUS_REGISTRY_AUTH: &str = "e30=";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct StreamMessage {
    stream: Option<String>,
    status: Option<String>,
    id: Option<String>,
    error: Option<String>,
    #[serde(rename = "errorDetail")]
    error_detail: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Talks to the daemon over HTTP.
#[derive(Debug, Clone)]
pub struct EngineApi {
    client: Client,
    base: String,
    registry_auth: String,
    token: CancellationToken,
}

impl EngineApi {
    /// Creates a client for `host` (`tcp://`, `http://` or `https://`).
    ///
    /// # Errors
    ///
    /// Returns `DockerError::UnsupportedHost` for any other scheme and
    /// `DockerError::Reqwest` if the HTTP client cannot be built.
    pub fn new(host: &str) -> std::result::Result<Self, DockerError> {
        let base = if let Some(rest) = host.strip_prefix("tcp://") {
            format!("http://{rest}")
        } else if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            return Err(DockerError::UnsupportedHost {
                host: host.to_string(),
                message: "the api backend needs a tcp:// or http(s):// address".to_string(),
            });
        };

        let client = Client::builder()
            .user_agent(format!("ply/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            registry_auth: ANONYMOUS_REGISTRY_AUTH.to_string(),
            token: CancellationToken::new(),
        })
    }

    /// Sets the `X-Registry-Auth` payload sent with pushes.
    #[must_use]
    pub fn with_registry_auth(mut self, auth: Option<String>) -> Self {
        if let Some(auth) = auth {
            self.registry_auth = auth;
        }
        self
    }

    /// Requests stop when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> std::result::Result<Url, DockerError> {
        let raw = format!("{}{path}", self.base);
        let mut url = Url::parse(&raw).map_err(|e| DockerError::UnsupportedHost {
            host: self.base.clone(),
            message: e.to_string(),
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sends `request`, mapping non-2xx answers to `DockerError::Engine`.
    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response> {
        let response = tokio::select! {
            response = request.send() => response.map_err(DockerError::from)?,
            () = self.token.cancelled() => {
                return Err(DockerError::Interrupted { operation: operation.to_string() }.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map_or_else(|_| body.trim().to_string(), |b| b.message);
        Err(DockerError::Engine {
            status: status.as_u16(),
            message,
        }
        .into())
    }

    /// Logs a newline-delimited JSON progress stream, failing on its first error.
    async fn follow_stream(&self, operation: &str, response: Response) -> Result<()> {
        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();

        loop {
            let chunk = tokio::select! {
                chunk = stream.next() => chunk,
                () = self.token.cancelled() => {
                    return Err(DockerError::Interrupted { operation: operation.to_string() }.into());
                }
            };
            let Some(chunk) = chunk else { break };
            buffer.extend_from_slice(&chunk.map_err(DockerError::from)?);

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                handle_stream_line(operation, &line)?;
            }
        }
        handle_stream_line(operation, &buffer)?;
        Ok(())
    }
}

pub(super) fn handle_stream_line(
    operation: &str,
    line: &[u8],
) -> std::result::Result<(), DockerError> {
    let text = String::from_utf8_lossy(line);
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }

    let Ok(message) = serde_json::from_str::<StreamMessage>(text) else {
        debug!(line = text, "unparsed stream line");
        return Ok(());
    };

    let error = message
        .error
        .or_else(|| message.error_detail.and_then(|d| d.message));
    if let Some(error) = error {
        return Err(DockerError::Stream {
            operation: operation.to_string(),
            message: error,
        });
    }

    if let Some(stream) = message.stream.as_deref().map(str::trim_end)
        && !stream.is_empty()
    {
        info!("{stream}");
    }
    if let Some(status) = message.status {
        match message.id {
            Some(id) => debug!("{id}: {status}"),
            None => info!("{status}"),
        }
    }
    Ok(())
}

/// Tar archive holding only `Dockerfile`.
pub(super) fn dockerfile_context(dockerfile: &str) -> std::io::Result<Vec<u8>> {
    let mut header = tar::Header::new_gnu();
    header.set_size(dockerfile.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();

    let mut builder = tar::Builder::new(Vec::new());
    builder.append_data(&mut header, "Dockerfile", dockerfile.as_bytes())?;
    builder.into_inner()
}

impl ImageEngine for EngineApi {
    async fn list_images(&self) -> Result<Vec<ImageSummary>> {
        let url = self.url("/images/json", &[("all", "1")])?;
        let response = self.send("list images", self.client.get(url)).await?;
        Ok(response.json().await.map_err(DockerError::from)?)
    }

    async fn tag_image(&self, from: &str, to: &str) -> Result<()> {
        let (repo, tag) = split_repo_tag(to)?;
        let url = self.url(&format!("/images/{from}/tag"), &[("repo", repo), ("tag", tag)])?;
        self.send("tag", self.client.post(url)).await?;
        Ok(())
    }

    async fn remove_image(&self, reference: &str) -> Result<Vec<RemoveResponse>> {
        let url = self.url(&format!("/images/{reference}"), &[])?;
        let response = self.send("remove", self.client.delete(url)).await?;
        Ok(response.json().await.map_err(DockerError::from)?)
    }

    async fn push_image(&self, reference: &str) -> Result<()> {
        let (name, tag) = split_repo_tag(reference)?;
        let url = self.url(&format!("/images/{name}/push"), &[("tag", tag)])?;
        let request = self
            .client
            .post(url)
            .header("X-Registry-Auth", &self.registry_auth);

        let response = self.send("push", request).await?;
        self.follow_stream("push", response).await
    }

    async fn build_image(
        &self,
        dockerfile: &str,
        labels: &BTreeMap<String, String>,
        tags: &[String],
    ) -> Result<()> {
        let labels = serde_json::to_string(labels)?;
        let mut query: Vec<(&str, &str)> = tags.iter().map(|t| ("t", t.as_str())).collect();
        query.push(("labels", &labels));
        query.push(("rm", "1"));

        let url = self.url("/build", &query)?;
        let request = self
            .client
            .post(url)
            .header("Content-Type", "application/x-tar")
            .body(dockerfile_context(dockerfile)?);

        let response = self.send("build", request).await?;
        self.follow_stream("build", response).await
    }
}
