use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;
use tokio::sync::{mpsc, RwLock};

use super::{AudioCapture, CaptureConfig};
use crate::error::PipelineResult;
use crate::event_bus::{topics, unix_ms, EventBus, EventTopic, PipelineEvent};
use crate::speech_http_client::TranscriptionGateway;
use crate::state::PipelineState;
use crate::translate_client::DebouncedTranslator;
use crate::types::TargetLanguage;

pub struct StreamingPipeline {
    capture: Arc<dyn AudioCapture>,
    gateway: Arc<dyn TranscriptionGateway>,
    translator: Arc<DebouncedTranslator>,
    state: PipelineState,
    event_bus: Arc<dyn EventBus>,
    target_language: Arc<RwLock<TargetLanguage>>,
    config: CaptureConfig,
    active: Arc<AtomicBool>,
}

impl StreamingPipeline {
    pub fn new(
        capture: Arc<dyn AudioCapture>,
        gateway: Arc<dyn TranscriptionGateway>,
        translator: Arc<DebouncedTranslator>,
        state: PipelineState,
        event_bus: Arc<dyn EventBus>,
        target_language: Arc<RwLock<TargetLanguage>>,
        config: CaptureConfig,
    ) -> Self {
        Self {
            capture,
            gateway,
            translator,
            state,
            event_bus,
            target_language,
            config,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Acquire the audio input and start processing segments.
    ///
    /// Each emitted segment is base64-encoded and transcribed concurrently;
    /// transcript appends are serialized by the segment's emission sequence
    /// number, so a slow early segment never lands after a fast later one.
    pub async fn start_streaming(&self) -> PipelineResult<()> {
        if self.active.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let segments = match self.capture.open(&self.config).await {
            Ok(receiver) => receiver,
            Err(e) => {
                self.active.store(false, Ordering::SeqCst);
                let message = e.message();
                self.state.set_error(message.clone()).await;
                publish_error(&self.event_bus, &message).await;
                return Err(e);
            }
        };
        self.state.clear_error().await;

        let (done_tx, done_rx) = mpsc::unbounded_channel::<(u64, Option<String>)>();
        tokio::spawn(run_dispatcher(
            segments,
            Arc::clone(&self.gateway),
            self.state.clone(),
            Arc::clone(&self.event_bus),
            done_tx,
        ));
        tokio::spawn(run_appender(
            done_rx,
            self.state.clone(),
            Arc::clone(&self.translator),
            Arc::clone(&self.event_bus),
            Arc::clone(&self.target_language),
        ));

        let _ = self
            .event_bus
            .publish(PipelineEvent {
                topic: EventTopic::new(topics::SESSION_STATE),
                payload: json!({"streaming": true}),
                timestamp_ms: unix_ms(),
            })
            .await;
        Ok(())
    }

    /// Stop the recorder, release the input, clear the displayed
    /// translation and mark the pipeline inactive. Results of segments
    /// already in flight may still land (last-applied-wins).
    pub async fn stop_streaming(&self) -> PipelineResult<()> {
        self.active.store(false, Ordering::SeqCst);

        if let Err(e) = self.capture.close().await {
            self.state.set_error(e.message()).await;
        }
        self.state.clear_translation().await;

        let _ = self
            .event_bus
            .publish(PipelineEvent {
                topic: EventTopic::new(topics::SESSION_STATE),
                payload: json!({"streaming": false}),
                timestamp_ms: unix_ms(),
            })
            .await;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub async fn transcript(&self) -> String {
        self.state.transcript().await
    }
}

/// Fan segments out to the gateway, one task per segment. A failed segment
/// reports its sequence number with no text so later segments still drain.
async fn run_dispatcher(
    mut segments: mpsc::UnboundedReceiver<crate::types::AudioSegment>,
    gateway: Arc<dyn TranscriptionGateway>,
    state: PipelineState,
    event_bus: Arc<dyn EventBus>,
    done_tx: mpsc::UnboundedSender<(u64, Option<String>)>,
) {
    while let Some(segment) = segments.recv().await {
        let gateway = Arc::clone(&gateway);
        let state = state.clone();
        let event_bus = Arc::clone(&event_bus);
        let done = done_tx.clone();

        tokio::spawn(async move {
            let encoded = BASE64.encode(&segment.data);
            match gateway.recognize_segment(&encoded).await {
                Ok(text) => {
                    let _ = done.send((segment.seq, Some(text)));
                }
                Err(e) => {
                    let message = e.message();
                    state.set_error(message.clone()).await;
                    publish_error(&event_bus, &message).await;
                    let _ = done.send((segment.seq, None));
                }
            }
        });
    }
}

/// Drain completed segments strictly in emission order through a reorder
/// buffer keyed by sequence number.
async fn run_appender(
    mut done_rx: mpsc::UnboundedReceiver<(u64, Option<String>)>,
    state: PipelineState,
    translator: Arc<DebouncedTranslator>,
    event_bus: Arc<dyn EventBus>,
    target_language: Arc<RwLock<TargetLanguage>>,
) {
    let mut next_seq: u64 = 0;
    let mut completed: BTreeMap<u64, Option<String>> = BTreeMap::new();

    while let Some((seq, outcome)) = done_rx.recv().await {
        completed.insert(seq, outcome);

        while let Some(outcome) = completed.remove(&next_seq) {
            next_seq += 1;
            let Some(text) = outcome else { continue };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let transcript = state.append_transcript(text).await;
            state.clear_error().await;
            let _ = event_bus
                .publish(PipelineEvent {
                    topic: EventTopic::new(topics::TRANSCRIPT_APPENDED),
                    payload: json!({
                        "fragment": text,
                        "transcript": transcript,
                    }),
                    timestamp_ms: unix_ms(),
                })
                .await;

            // Streaming mode re-translates the accumulated transcript.
            let target = *target_language.read().await;
            translator.submit(transcript.trim(), target);
        }
    }
}

async fn publish_error(event_bus: &Arc<dyn EventBus>, message: &str) {
    let _ = event_bus
        .publish(PipelineEvent {
            topic: EventTopic::new(topics::PIPELINE_ERROR),
            payload: json!({"error": message}),
            timestamp_ms: unix_ms(),
        })
        .await;
}
