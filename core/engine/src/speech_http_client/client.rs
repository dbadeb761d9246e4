use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{ServiceErrorBody, SpeechHttpRequest, SpeechHttpResponse};
use super::TranscriptionGateway;
use crate::error::{PipelineError, PipelineResult};

/// HTTP client for the speech transcription service.
pub struct SpeechHttpClient {
    http: Client,
    base_url: String,
}

impl SpeechHttpClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the speech service (e.g. "http://127.0.0.1:3000")
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TranscriptionGateway for SpeechHttpClient {
    async fn recognize_segment(&self, audio_b64: &str) -> PipelineResult<String> {
        if audio_b64.is_empty() {
            return Err(PipelineError::AudioProcessing(
                "empty audio segment".to_string(),
            ));
        }

        let url = format!("{}/api/speech", self.base_url.trim_end_matches('/'));
        let request = SpeechHttpRequest {
            audio: audio_b64.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::AudioProcessing(format!("speech request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ServiceErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("speech service returned {}", status),
            };
            return Err(PipelineError::AudioProcessing(message));
        }

        let body: SpeechHttpResponse = response.json().await.map_err(|e| {
            PipelineError::AudioProcessing(format!("invalid speech response: {}", e))
        })?;

        Ok(body.transcription)
    }
}
