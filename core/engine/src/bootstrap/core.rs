use std::sync::Arc;

use tokio::sync::RwLock;

use crate::capture::CaptureController;
use crate::config_manager::ConfigManager;
use crate::event_bus::EventBus;
use crate::segment_stream::StreamingPipeline;
use crate::state::PipelineState;
use crate::telemetry::TelemetrySink;
use crate::translate_client::DebouncedTranslator;
use crate::types::TargetLanguage;

pub struct PipelineEngine {
    pub(crate) event_bus: Arc<dyn EventBus>,
    pub(crate) capture: Arc<CaptureController>,
    // Streaming ingestion is optional: hosts without a raw audio input run
    // capture mode only.
    pub(crate) streaming: Option<Arc<StreamingPipeline>>,
    pub(crate) translator: Arc<DebouncedTranslator>,
    pub(crate) config: Arc<dyn ConfigManager>,
    pub(crate) telemetry: Arc<dyn TelemetrySink>,
    pub(crate) state: PipelineState,
    pub(crate) target_language: Arc<RwLock<TargetLanguage>>,
    // Service URLs, kept for boot-time health checks.
    pub(crate) speech_service_url: Option<String>,
    pub(crate) translate_service_url: Option<String>,
}

impl Clone for PipelineEngine {
    fn clone(&self) -> Self {
        Self {
            event_bus: Arc::clone(&self.event_bus),
            capture: Arc::clone(&self.capture),
            streaming: self.streaming.as_ref().map(Arc::clone),
            translator: Arc::clone(&self.translator),
            config: Arc::clone(&self.config),
            telemetry: Arc::clone(&self.telemetry),
            state: self.state.clone(),
            target_language: Arc::clone(&self.target_language),
            speech_service_url: self.speech_service_url.clone(),
            translate_service_url: self.translate_service_url.clone(),
        }
    }
}
