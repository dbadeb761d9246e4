//! Vendor-facing clients used by the adapter service routes.

mod cloud_speech;
mod deepl;

use async_trait::async_trait;

use crate::types::TargetLanguage;

pub use cloud_speech::RecognizeHttpClient;
pub use deepl::{DeepLHttpClient, DEFAULT_DEEPL_API_URL};

/// Upstream vendor failure. Non-success statuses are kept apart from
/// transport failures because the routes map them to different responses.
#[derive(Debug)]
pub enum UpstreamError {
    /// The vendor answered with a non-success status.
    Status(reqwest::StatusCode),
    /// Transport or protocol failure before a usable response was read.
    Transport(String),
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(status) => write!(f, "upstream returned HTTP {}", status),
            Self::Transport(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for UpstreamError {}

/// Speech-recognition vendor seam.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn recognize(&self, audio_b64: &str) -> Result<String, UpstreamError>;

    /// Probe the vendor for reachability. False only when the upstream
    /// cannot be reached at all.
    async fn check(&self) -> bool {
        true
    }
}

/// Machine-translation vendor seam.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(&self, text: &str, target: TargetLanguage)
        -> Result<String, UpstreamError>;

    /// Probe the vendor for reachability. False only when the upstream
    /// cannot be reached at all.
    async fn check(&self) -> bool {
        true
    }
}
