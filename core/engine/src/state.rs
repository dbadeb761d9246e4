use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::Transcript;

struct StateInner {
    transcript: Transcript,
    translation: String,
    error: Option<String>,
}

/// User-visible pipeline snapshot: the accumulated transcript, the latest
/// published translation, and the single current error message.
///
/// The transcript is mutated only from the capture/streaming tasks (single
/// writer); the translation is replaced, never appended, so it always
/// corresponds to the latest debounced payload. A new error replaces the
/// previous one and successful operations clear it.
#[derive(Clone)]
pub struct PipelineState {
    inner: Arc<RwLock<StateInner>>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StateInner {
                transcript: Transcript::new(),
                translation: String::new(),
                error: None,
            })),
        }
    }

    /// Append one finalized fragment and return the full transcript text.
    pub async fn append_transcript(&self, fragment: &str) -> String {
        let mut inner = self.inner.write().await;
        inner.transcript.append(fragment);
        inner.transcript.as_str().to_string()
    }

    pub async fn transcript(&self) -> String {
        self.inner.read().await.transcript.as_str().to_string()
    }

    pub async fn set_translation(&self, translation: String) {
        let mut inner = self.inner.write().await;
        inner.translation = translation;
        inner.error = None;
    }

    pub async fn clear_translation(&self) {
        self.inner.write().await.translation.clear();
    }

    pub async fn translation(&self) -> String {
        self.inner.read().await.translation.clone()
    }

    pub async fn set_error(&self, message: String) {
        self.inner.write().await.error = Some(message);
    }

    pub async fn clear_error(&self) {
        self.inner.write().await.error = None;
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    /// Explicit user clear: resets transcript, translation and error state.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.transcript.clear();
        inner.translation.clear();
        inner.error = None;
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
