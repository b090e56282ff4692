//! Remote story backend client
//!
//! HTTP client for an optional external backend that can run the full story
//! generation remotely. The pipeline only attempts this tier when a backend
//! URL is configured and differs from the local loopback default.

use crate::{Error, Result};
use hush_common::api::StoryGenerationRequest;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Loopback default used when no external backend is configured
pub const DEFAULT_LOCAL_BACKEND: &str = "http://127.0.0.1:8807";

/// Successful backend response body
#[derive(Debug, Deserialize)]
struct BackendStoryResponse {
    story_text: String,
}

/// Client for the remote story endpoint
pub struct RemoteBackendClient {
    /// HTTP client with a bounded connection timeout; the overall tier
    /// timeout is applied by the fallback chain
    client: Client,
    base_url: String,
}

impl RemoteBackendClient {
    /// Create a client for `base_url`
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be built (should not happen with
    /// valid config)
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Whether this client points at a genuinely remote backend
    ///
    /// The loopback default means "no backend configured" and the remote
    /// tier is skipped entirely.
    pub fn is_remote(&self) -> bool {
        self.base_url != DEFAULT_LOCAL_BACKEND
    }

    /// POST a story request and extract `story_text`
    pub async fn generate_story(&self, request: &StoryGenerationRequest) -> Result<String> {
        let url = format!("{}/story/generate", self.base_url);

        tracing::debug!(
            url = %url,
            theme = %request.theme,
            "Querying remote story backend"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Backend request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Backend returned error status: {}",
                response.status()
            )));
        }

        let body: BackendStoryResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse backend response: {}", e)))?;

        Ok(body.story_text)
    }
}
