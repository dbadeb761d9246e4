//! HTTP adapter service fronting the speech and translation vendors.
//!
//! The two fixed routes consumed by the pipeline clients live here, together
//! with the TOML runtime configuration the binary loads. Route construction
//! is in the library so tests can bind the router to an ephemeral port.

mod routes;

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::upstream::{SpeechProvider, TranslationProvider, DEFAULT_DEEPL_API_URL};

pub use routes::router;

/// Runtime configuration loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    pub service: ServiceConfig,
    pub speech: SpeechVendorConfig,
    pub translate: TranslateVendorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechVendorConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateVendorConfig {
    #[serde(default = "default_deepl_api_url")]
    pub api_url: String,
    /// Absent key means the translate route answers 503.
    pub api_key: Option<String>,
}

fn default_deepl_api_url() -> String {
    DEFAULT_DEEPL_API_URL.to_string()
}

pub fn load_runtime_config(path: &Path) -> anyhow::Result<RuntimeConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
    let config: RuntimeConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;
    Ok(config)
}

/// Shared route state.
#[derive(Clone)]
pub struct AppState {
    pub speech: Arc<dyn SpeechProvider>,
    pub translate: Option<Arc<dyn TranslationProvider>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_runtime_config_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[service]
port = 3000

[speech]
endpoint = "https://speech.example.com/v1/recognize"
api_key = "speech-key"

[translate]
api_key = "translate-key"
"#
        )
        .unwrap();

        let config = load_runtime_config(file.path()).unwrap();
        assert_eq!(config.service.port, 3000);
        assert_eq!(config.speech.api_key, "speech-key");
        assert_eq!(config.translate.api_url, DEFAULT_DEEPL_API_URL);
        assert_eq!(config.translate.api_key.as_deref(), Some("translate-key"));
    }

    #[test]
    fn translate_key_is_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[service]
port = 8089

[speech]
endpoint = "https://speech.example.com/v1/recognize"
api_key = "speech-key"

[translate]
"#
        )
        .unwrap();

        let config = load_runtime_config(file.path()).unwrap();
        assert!(config.translate.api_key.is_none());
    }
}
