mod client;
mod types;

use async_trait::async_trait;

use crate::error::PipelineResult;

pub use client::SpeechHttpClient;
pub use types::{ServiceErrorBody, SpeechHttpRequest, SpeechHttpResponse};

/// Stateless adapter that sends one encoded audio segment and returns the
/// recognized text. Failures surface as `AudioProcessing` errors; the caller
/// keeps the pipeline running and later segments may still succeed.
#[async_trait]
pub trait TranscriptionGateway: Send + Sync {
    async fn recognize_segment(&self, audio_b64: &str) -> PipelineResult<String>;
}
