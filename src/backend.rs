//! Scene extraction backend: wire models and the HTTP client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::frame::Frame;
use crate::{ClientError, Result};

pub const ANALYZE_PATH: &str = "/api/analyze_frames";
pub const DOWNLOAD_PATH: &str = "/api/download_frames";

/// Body of `POST /api/analyze_frames`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Envelope returned by `POST /api/analyze_frames`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default)]
    pub frames: Option<Vec<Frame>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/download_frames`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub frames: Vec<Frame>,
}

impl AnalyzeResponse {
    pub fn ok(frames: Vec<Frame>) -> Self {
        Self {
            success: true,
            frames: Some(frames),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            frames: None,
            error: Some(message.into()),
        }
    }

    /// Turn the envelope into the frame list, rejecting failures and malformed payloads
    pub fn into_frames(self) -> Result<Vec<Frame>> {
        if !self.success {
            let message = self.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(ClientError::Backend(message));
        }

        let frames = self
            .frames
            .ok_or_else(|| ClientError::Backend("response is missing frames".to_string()))?;

        for (i, frame) in frames.iter().enumerate() {
            frame
                .check()
                .map_err(|e| ClientError::Backend(format!("frame {}: {}", i, e)))?;
        }

        Ok(frames)
    }
}

/// Operations the scene extraction service offers
#[async_trait]
pub trait SceneBackend: Send + Sync {
    /// Ask the backend to extract scene frames from the video at `url`
    async fn analyze_frames(&self, url: &str) -> Result<AnalyzeResponse>;

    /// Ask the backend to pack `frames` into a zip archive
    async fn download_frames(&self, frames: &[Frame]) -> Result<Vec<u8>>;
}

/// reqwest-backed client for a running backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Without a timeout the transport default applies
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SceneBackend for HttpBackend {
    async fn analyze_frames(&self, url: &str) -> Result<AnalyzeResponse> {
        let endpoint = self.endpoint(ANALYZE_PATH);
        debug!("Sending analysis request to {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .json(&AnalyzeRequest { url: url.to_string() })
            .send()
            .await?;

        // Failures come back as 4xx/5xx with the same envelope, so parse regardless
        let status = response.status();
        let body = response.text().await?;
        debug!("Analysis response: HTTP {} ({} bytes)", status, body.len());

        serde_json::from_str(&body).map_err(|e| {
            ClientError::Backend(format!(
                "malformed analysis response (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })
    }

    async fn download_frames(&self, frames: &[Frame]) -> Result<Vec<u8>> {
        let endpoint = self.endpoint(DOWNLOAD_PATH);
        debug!("Requesting archive of {} frames from {}", frames.len(), endpoint);

        let response = self
            .client
            .post(&endpoint)
            .json(&DownloadRequest { frames: frames.to_vec() })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Export { status: status.as_u16() });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("zip") {
            warn!("Archive response has unexpected content type '{}'", content_type);
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
