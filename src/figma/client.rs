//! Async client for the Figma REST API.
//!
//! The auditor reads a file's node tree plus its component and style
//! tables, and optionally exports one rendered snapshot of an analyzed
//! frame. All other API surface is out of scope.

use crate::error::{DsaError, Result};
use reqwest::{header::RETRY_AFTER, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::api_types::{FileResponse, ImageResponse, NodesResponse};

const DEFAULT_BASE_URL: &str = "https://api.figma.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub enum FigmaAuth {
    PersonalAccessToken(String),
    OAuthToken(String),
}

impl FigmaAuth {
    pub fn from_env() -> Option<Self> {
        if let Ok(token) = std::env::var("FIGMA_TOKEN") {
            if !token.is_empty() {
                return Some(Self::PersonalAccessToken(token));
            }
        }

        if let Ok(token) = std::env::var("FIGMA_OAUTH_TOKEN") {
            if !token.is_empty() {
                return Some(Self::OAuthToken(token));
            }
        }

        None
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            FigmaAuth::PersonalAccessToken(token) => builder.header("X-FIGMA-TOKEN", token),
            FigmaAuth::OAuthToken(token) => builder.bearer_auth(token),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: Client,
    auth: FigmaAuth,
    base_url: Url,
}

impl FigmaClient {
    pub fn new(auth: FigmaAuth) -> Result<Self> {
        Self::with_base_url_and_timeout(auth, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url(auth: FigmaAuth, base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_base_url_and_timeout(auth, base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url_and_timeout(
        auth: FigmaAuth,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DsaError::Network)?;

        Ok(Self {
            http,
            auth,
            base_url,
        })
    }

    /// Fetch a file's full document tree and component/style tables.
    pub async fn fetch_file(&self, file_key: &str) -> Result<FileResponse> {
        let url = self.endpoint(&format!("/v1/files/{file_key}"))?;
        let req = self.authed(self.http.get(url));
        self.send_json(req).await
    }

    /// Fetch specific node subtrees (with their local tables) by id.
    pub async fn fetch_nodes(&self, file_key: &str, node_ids: &[String]) -> Result<NodesResponse> {
        if node_ids.is_empty() {
            return Err(DsaError::Config(
                "node_ids cannot be empty when fetching nodes from Figma".into(),
            ));
        }

        let ids = node_ids.join(",");
        let url = self.endpoint(&format!("/v1/files/{file_key}/nodes?ids={ids}"))?;
        let req = self.authed(self.http.get(url));
        self.send_json(req).await
    }

    /// Render one frame to PNG and return the temporary image URL.
    pub async fn export_snapshot_url(&self, file_key: &str, node_id: &str) -> Result<String> {
        let url = self.endpoint(&format!(
            "/v1/images/{file_key}?ids={node_id}&scale=1&format=png"
        ))?;
        let req = self.authed(self.http.get(url));
        let resp: ImageResponse = self.send_json(req).await?;

        if let Some(err) = resp.err {
            return Err(DsaError::figma_api(None, err));
        }
        resp.images
            .get(node_id)
            .cloned()
            .ok_or_else(|| DsaError::FigmaApi {
                status: None,
                message: format!("snapshot URL missing for node {node_id}"),
            })
    }

    /// Download a rendered snapshot as raw bytes; no decoding happens
    /// here, the caller writes them straight to disk.
    pub async fn download_snapshot(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await.map_err(DsaError::Network)?;
        let status = response.status();

        if status.is_success() {
            return response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(DsaError::Network);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DsaError::figma_api(
            Some(status),
            format!(
                "failed to download snapshot (status {}): {}",
                status.as_u16(),
                body
            ),
        ))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        self.auth.apply(builder)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(DsaError::InvalidUrl)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(DsaError::Network)?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body).map_err(DsaError::Serialization);
        }

        Err(DsaError::figma_api(
            Some(status),
            error_message(status, &body, retry_after.as_deref()),
        ))
    }
}

fn error_message(status: StatusCode, body: &str, retry_after: Option<&str>) -> String {
    let fallback = format!("Figma API returned status {}", status.as_u16());
    let parsed = serde_json::from_str::<Value>(body).ok();
    let from_body = parsed
        .as_ref()
        .and_then(|value| value.get("err").or_else(|| value.get("error")))
        .and_then(Value::as_str)
        .map(str::to_owned);

    match (status, retry_after, from_body) {
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), Some(msg)) => {
            format!("{msg} (rate limited, retry after {retry}s)")
        }
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), None) => {
            format!("rate limited by Figma API, retry after {retry}s")
        }
        (_, _, Some(msg)) => msg,
        _ => fallback,
    }
}
