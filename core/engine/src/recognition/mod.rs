//! Speech-recognition session capability.
//!
//! The vendor SDK's live session handle with mutable callback slots is
//! modeled as a trait with start/stop operations plus an event stream; the
//! ambient capability detection becomes an injected factory that reports an
//! unsupported host as a typed error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::PipelineResult;
use crate::types::ResultBatch;

/// Events a live session delivers, in arrival order.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// One recognition callback's newly-available result range.
    Result(ResultBatch),
    /// Vendor-reported error; the session is no longer listening.
    Error(String),
    /// The session ended, either after `stop` or on the vendor's own
    /// initiative (silence timeout, service-side cutoff).
    End,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub continuous: bool,
    pub interim_results: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
        }
    }
}

/// One recognition session. Sessions are single-use once stopped; the
/// controller constructs a replacement through the backend factory.
#[async_trait]
pub trait RecognitionSession: Send + Sync {
    async fn start(&self) -> PipelineResult<()>;
    async fn stop(&self) -> PipelineResult<()>;
}

/// A freshly constructed session together with its event stream.
pub struct SessionHandle {
    pub session: Box<dyn RecognitionSession>,
    pub events: mpsc::UnboundedReceiver<SessionEvent>,
}

/// Factory for recognition sessions.
///
/// `create_session` returns `PipelineError::UnsupportedEnvironment` when the
/// host has no recognition capability; callers surface that as a visible
/// error state and attempt no further recognition.
pub trait RecognitionBackend: Send + Sync {
    fn create_session(&self, config: &SessionConfig) -> PipelineResult<SessionHandle>;
}
