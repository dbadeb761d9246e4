//! Fixed-interval segment ingestion.
//!
//! Alternative capture mode for environments that record raw audio instead
//! of using a built-in recognizer: a live input stream is sliced into
//! fixed-duration encoded segments, each segment is transcribed through the
//! gateway, and the results are appended in emission order.

mod pipeline;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::PipelineResult;
use crate::types::AudioSegment;

pub use pipeline::StreamingPipeline;

/// Audio input format and slicing interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub sample_rate: u32,
    pub channels: u8,
    pub segment_duration_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            channels: 1,
            segment_duration_ms: 3000,
        }
    }
}

/// Live audio input opened for fixed-interval segment capture.
///
/// `open` acquires the input and returns a receiver yielding one encoded
/// segment per `segment_duration_ms`, numbered consecutively from zero in
/// emission order. `close` stops the recorder and releases all input
/// tracks; the receiver ends shortly after.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    async fn open(
        &self,
        config: &CaptureConfig,
    ) -> PipelineResult<mpsc::UnboundedReceiver<AudioSegment>>;

    async fn close(&self) -> PipelineResult<()>;
}
