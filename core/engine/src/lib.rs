pub mod bootstrap;
pub mod capture;
pub mod config_manager;
pub mod display_buffer;
pub mod error;
pub mod event_bus;
pub mod health_check;
pub mod recognition;
pub mod segment_stream;
pub mod service;
pub mod speech_http_client;
pub mod state;
pub mod telemetry;
pub mod translate_client;
pub mod types;
pub mod upstream;

pub use bootstrap::{PipelineEngine, PipelineEngineBuilder};
pub use capture::CaptureController;
pub use config_manager::{ConfigManager, PipelineConfig, StaticConfig};
pub use display_buffer::DisplayBuffer;
pub use error::{PipelineError, PipelineResult};
pub use event_bus::{ChannelEventBus, EventBus, EventSubscription, EventTopic, PipelineEvent};
pub use health_check::{HealthChecker, ServiceHealth};
pub use recognition::{
    RecognitionBackend, RecognitionSession, SessionConfig, SessionEvent, SessionHandle,
};
pub use segment_stream::{AudioCapture, CaptureConfig, StreamingPipeline};
pub use speech_http_client::{SpeechHttpClient, TranscriptionGateway};
pub use state::PipelineState;
pub use telemetry::{NullTelemetry, StdoutTelemetry, TelemetryDatum, TelemetrySink};
pub use translate_client::{
    DebouncedTranslator, RemoteTranslateClient, TranslateRequest, TranslateResponse,
    TranslationClient, DEFAULT_QUIET_PERIOD,
};
pub use types::{AudioSegment, RecognitionResult, ResultBatch, TargetLanguage, Transcript};
