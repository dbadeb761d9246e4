//! Health checks for the speech and translate services.

use std::time::Duration;

use reqwest::Client;

/// Outcome of probing one service.
#[derive(Debug, Clone)]
pub struct ServiceHealth {
    pub is_healthy: bool,
    pub service_name: String,
    pub url: String,
    pub error: Option<String>,
}

pub struct HealthChecker {
    http: Client,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    async fn probe(&self, service_name: &str, base_url: &str) -> ServiceHealth {
        let url = format!("{}/health", base_url.trim_end_matches('/'));
        let (is_healthy, error) = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => (true, None),
            Ok(response) => (false, Some(format!("HTTP {}", response.status()))),
            Err(e) => (false, Some(e.to_string())),
        };

        ServiceHealth {
            is_healthy,
            service_name: service_name.to_string(),
            url: base_url.to_string(),
            error,
        }
    }

    pub async fn check_speech_service(&self, base_url: &str) -> ServiceHealth {
        self.probe("speech", base_url).await
    }

    pub async fn check_translate_service(&self, base_url: &str) -> ServiceHealth {
        self.probe("translate", base_url).await
    }

    pub async fn check_all_services(
        &self,
        speech_url: &str,
        translate_url: &str,
    ) -> (ServiceHealth, ServiceHealth) {
        let (speech, translate) = tokio::join!(
            self.check_speech_service(speech_url),
            self.check_translate_service(translate_url)
        );
        (speech, translate)
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}
