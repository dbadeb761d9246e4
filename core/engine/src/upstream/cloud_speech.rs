//! Cloud speech-recognition client.
//!
//! Posts base64 audio content to a recognize endpoint and space-joins the
//! top alternative of each returned result.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{SpeechProvider, UpstreamError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeConfig {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'static str,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognizeConfig,
    audio: RecognizeAudio<'a>,
}

#[derive(Debug, Serialize)]
struct RecognizeAudio<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternatives: Vec<RecognizeAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeAlternative {
    #[serde(default)]
    transcript: String,
}

pub struct RecognizeHttpClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl RecognizeHttpClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `endpoint` - Recognize endpoint URL
    /// * `api_key` - Vendor API key, sent as a query parameter
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SpeechProvider for RecognizeHttpClient {
    async fn recognize(&self, audio_b64: &str) -> Result<String, UpstreamError> {
        let request = RecognizeRequest {
            // Segments come from a 48 kHz mono opus/webm recorder.
            config: RecognizeConfig {
                encoding: "WEBM_OPUS",
                sample_rate_hertz: 48_000,
                language_code: "en-US",
                enable_automatic_punctuation: true,
            },
            audio: RecognizeAudio { content: audio_b64 },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }

        let body: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let transcription = body
            .results
            .iter()
            .map(|result| {
                result
                    .alternatives
                    .first()
                    .map(|alt| alt.transcript.as_str())
                    .unwrap_or("")
            })
            .collect::<Vec<_>>()
            .join(" ");

        Ok(transcription)
    }

    async fn check(&self) -> bool {
        // Any HTTP answer proves the vendor is reachable; a bare GET on the
        // recognize endpoint is expected to be rejected, not dropped.
        self.http.get(&self.endpoint).send().await.is_ok()
    }
}
