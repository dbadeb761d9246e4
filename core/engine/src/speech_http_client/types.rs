use serde::{Deserialize, Serialize};

/// Request to the speech service.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechHttpRequest {
    /// Base64-encoded audio segment.
    pub audio: String,
}

/// Response from the speech service.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechHttpResponse {
    #[serde(default)]
    pub transcription: String,
}

/// Error body returned by the speech and translate services.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}
