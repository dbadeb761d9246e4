//! DeepL-style translation client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{TranslationProvider, UpstreamError};
use crate::types::TargetLanguage;

pub const DEFAULT_DEEPL_API_URL: &str = "https://api-free.deepl.com/v2/translate";

#[derive(Debug, Serialize)]
struct DeepLRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

pub struct DeepLHttpClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl DeepLHttpClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TranslationProvider for DeepLHttpClient {
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, UpstreamError> {
        let request = DeepLRequest {
            text: [text],
            target_lang: target.code(),
        };

        let response = self
            .http
            .post(&self.api_url)
            .header(
                "Authorization",
                format!("DeepL-Auth-Key {}", self.api_key),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }

        let body: DeepLResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        body.translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| UpstreamError::Transport("empty translations list".to_string()))
    }

    async fn check(&self) -> bool {
        // Any HTTP answer proves the vendor is reachable; a bare GET on the
        // translate endpoint is expected to be rejected, not dropped.
        self.http.get(&self.api_url).send().await.is_ok()
    }
}
