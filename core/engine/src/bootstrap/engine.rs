//! Facade methods delegating to the wired components.

use std::sync::Arc;

use super::core::PipelineEngine;
use crate::error::{PipelineError, PipelineResult};
use crate::event_bus::EventBus;
use crate::types::TargetLanguage;

impl PipelineEngine {
    pub async fn start_listening(&self) -> PipelineResult<()> {
        self.capture.start().await
    }

    pub async fn stop_listening(&self) -> PipelineResult<()> {
        self.capture.stop().await
    }

    pub fn is_listening(&self) -> bool {
        self.capture.listening()
    }

    pub async fn start_streaming(&self) -> PipelineResult<()> {
        match &self.streaming {
            Some(streaming) => streaming.start_streaming().await,
            None => {
                let err = PipelineError::UnsupportedEnvironment;
                self.state.set_error(err.message()).await;
                Err(err)
            }
        }
    }

    pub async fn stop_streaming(&self) -> PipelineResult<()> {
        match &self.streaming {
            Some(streaming) => streaming.stop_streaming().await,
            None => Ok(()),
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
            .as_ref()
            .map(|streaming| streaming.is_active())
            .unwrap_or(false)
    }

    /// Select the translation target. Takes effect on the next translation
    /// call; in-flight calls keep the language captured at submit time.
    pub async fn set_target_language(&self, target: TargetLanguage) {
        *self.target_language.write().await = target;
    }

    pub async fn target_language(&self) -> TargetLanguage {
        *self.target_language.read().await
    }

    /// Submit user-edited text through the same debounced translation path
    /// the capture modes use; rapid successive edits coalesce into one
    /// request per quiet period.
    pub async fn submit_text(&self, text: &str) {
        let target = *self.target_language.read().await;
        self.translator.submit(text, target);
    }

    pub async fn transcript(&self) -> String {
        self.state.transcript().await
    }

    pub async fn translation(&self) -> String {
        self.state.translation().await
    }

    pub async fn current_error(&self) -> Option<String> {
        self.state.error().await
    }

    /// Explicit user clear: resets transcript, translation and error state.
    pub async fn clear(&self) {
        self.state.clear().await;
    }

    pub fn event_bus(&self) -> Arc<dyn EventBus> {
        Arc::clone(&self.event_bus)
    }
}
