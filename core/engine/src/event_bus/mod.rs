mod channel;

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;

pub use channel::ChannelEventBus;

/// Topics published by the pipeline. The UI subscribes to these to render
/// both streams and the current error without polling.
pub mod topics {
    /// Interim (non-final) recognition text, superseded by the next batch.
    pub const INTERIM_RESULT: &str = "InterimResult";
    /// A finalized fragment was appended to the transcript.
    pub const TRANSCRIPT_APPENDED: &str = "TranscriptAppended";
    /// The published translation was replaced.
    pub const TRANSLATION_UPDATED: &str = "TranslationUpdated";
    /// The current error message changed.
    pub const PIPELINE_ERROR: &str = "PipelineError";
    /// A capture or streaming session started or stopped.
    pub const SESSION_STATE: &str = "SessionState";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub topic: EventTopic,
    pub payload: serde_json::Value,
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EventTopic(pub String);

impl EventTopic {
    pub fn new(topic: &str) -> Self {
        Self(topic.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSubscription {
    pub topic: EventTopic,
}

#[async_trait]
pub trait EventBus: Send + Sync {
    async fn start(&self) -> PipelineResult<()>;
    async fn stop(&self) -> PipelineResult<()>;
    async fn publish(&self, event: PipelineEvent) -> PipelineResult<()>;
    async fn subscribe(&self, topic: EventTopic) -> PipelineResult<EventSubscription>;
}

/// Wall-clock milliseconds used to stamp published events.
pub fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
