use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{TranslateRequest, TranslateResponse, TranslationClient};
use crate::error::{PipelineError, PipelineResult};
use crate::speech_http_client::ServiceErrorBody;

/// HTTP client for the translation service.
#[derive(Clone)]
pub struct RemoteTranslateClient {
    http: Client,
    base_url: String,
}

impl RemoteTranslateClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the translate service (e.g. "http://127.0.0.1:3000")
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TranslationClient for RemoteTranslateClient {
    async fn translate(&self, request: &TranslateRequest) -> PipelineResult<TranslateResponse> {
        let url = format!("{}/api/translate", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| PipelineError::Translation(format!("translate request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ServiceErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("translation service returned {}", status),
            };
            return Err(PipelineError::Translation(message));
        }

        let body: TranslateResponse = response.json().await.map_err(|e| {
            PipelineError::Translation(format!("invalid translate response: {}", e))
        })?;

        Ok(body)
    }
}
