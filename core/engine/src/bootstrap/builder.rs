use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::Duration;

use super::core::PipelineEngine;
use crate::capture::CaptureController;
use crate::config_manager::{ConfigManager, PipelineConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::event_bus::EventBus;
use crate::recognition::{RecognitionBackend, SessionConfig};
use crate::segment_stream::{AudioCapture, CaptureConfig, StreamingPipeline};
use crate::speech_http_client::{SpeechHttpClient, TranscriptionGateway};
use crate::state::PipelineState;
use crate::telemetry::TelemetrySink;
use crate::translate_client::{DebouncedTranslator, RemoteTranslateClient, TranslationClient};
use crate::types::TargetLanguage;

const SPEECH_CLIENT_TIMEOUT_SECS: u64 = 30;

pub struct PipelineEngineBuilder {
    event_bus: Option<Arc<dyn EventBus>>,
    recognition: Option<Arc<dyn RecognitionBackend>>,
    gateway: Option<Arc<dyn TranscriptionGateway>>,
    translation: Option<Arc<dyn TranslationClient>>,
    audio_capture: Option<Arc<dyn AudioCapture>>,
    config: Option<Arc<dyn ConfigManager>>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
    quiet_period: Duration,
    capture_config: CaptureConfig,
    session_config: SessionConfig,
    initial_target: TargetLanguage,
    speech_service_url: Option<String>,
    translate_service_url: Option<String>,
}

impl PipelineEngineBuilder {
    pub fn new() -> Self {
        Self {
            event_bus: None,
            recognition: None,
            gateway: None,
            translation: None,
            audio_capture: None,
            config: None,
            telemetry: None,
            quiet_period: crate::translate_client::DEFAULT_QUIET_PERIOD,
            capture_config: CaptureConfig::default(),
            session_config: SessionConfig::default(),
            initial_target: TargetLanguage::Es,
            speech_service_url: None,
            translate_service_url: None,
        }
    }

    pub fn event_bus(mut self, event_bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn recognition(mut self, recognition: Arc<dyn RecognitionBackend>) -> Self {
        self.recognition = Some(recognition);
        self
    }

    pub fn transcription_gateway(mut self, gateway: Arc<dyn TranscriptionGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn translation(mut self, translation: Arc<dyn TranslationClient>) -> Self {
        self.translation = Some(translation);
        self
    }

    pub fn audio_capture(mut self, audio_capture: Arc<dyn AudioCapture>) -> Self {
        self.audio_capture = Some(audio_capture);
        self
    }

    pub fn config(mut self, config: Arc<dyn ConfigManager>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Apply the wiring knobs of a loaded pipeline configuration.
    pub fn with_pipeline_config(mut self, config: &PipelineConfig) -> Self {
        self.quiet_period = Duration::from_millis(config.debounce_quiet_period_ms);
        self.capture_config = CaptureConfig {
            sample_rate: config.capture_sample_rate,
            channels: config.capture_channels,
            segment_duration_ms: config.segment_duration_ms,
        };
        self.initial_target = config.target_language;
        self
    }

    pub fn quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Use the HTTP transcription gateway at `url`.
    pub fn speech_with_http_client(mut self, url: &str) -> Self {
        self.gateway = Some(Arc::new(SpeechHttpClient::new(
            url,
            SPEECH_CLIENT_TIMEOUT_SECS,
        )));
        self.speech_service_url = Some(url.to_string());
        self
    }

    /// Use the HTTP translation client at `url`.
    pub fn translate_with_http_client(mut self, url: &str) -> Self {
        self.translation = Some(Arc::new(RemoteTranslateClient::new(url)));
        self.translate_service_url = Some(url.to_string());
        self
    }

    pub fn build(self) -> PipelineResult<PipelineEngine> {
        let event_bus = self
            .event_bus
            .ok_or_else(|| PipelineError::internal("event_bus is missing"))?;
        let recognition = self
            .recognition
            .ok_or_else(|| PipelineError::internal("recognition backend is missing"))?;
        let gateway = self
            .gateway
            .ok_or_else(|| PipelineError::internal("transcription gateway is missing"))?;
        let translation = self
            .translation
            .ok_or_else(|| PipelineError::internal("translation client is missing"))?;
        let config = self
            .config
            .ok_or_else(|| PipelineError::internal("config is missing"))?;
        let telemetry = self
            .telemetry
            .ok_or_else(|| PipelineError::internal("telemetry is missing"))?;

        let state = PipelineState::new();
        let target_language = Arc::new(RwLock::new(self.initial_target));

        let translator = Arc::new(DebouncedTranslator::new(
            translation,
            state.clone(),
            Arc::clone(&event_bus),
            self.quiet_period,
        ));

        let capture = Arc::new(CaptureController::new(
            recognition,
            Arc::clone(&translator),
            state.clone(),
            Arc::clone(&event_bus),
            Arc::clone(&target_language),
            self.session_config,
        ));

        let streaming = self.audio_capture.map(|audio_capture| {
            Arc::new(StreamingPipeline::new(
                audio_capture,
                Arc::clone(&gateway),
                Arc::clone(&translator),
                state.clone(),
                Arc::clone(&event_bus),
                Arc::clone(&target_language),
                self.capture_config.clone(),
            ))
        });

        Ok(PipelineEngine {
            event_bus,
            capture,
            streaming,
            translator,
            config,
            telemetry,
            state,
            target_language,
            speech_service_url: self.speech_service_url,
            translate_service_url: self.translate_service_url,
        })
    }
}

impl Default for PipelineEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
