//! Continuous-listening controller.
//!
//! Owns the recognition session lifecycle (start, stop, auto-restart after a
//! provider-initiated end), accumulates finalized text into the transcript,
//! and hands each batch's incremental addition to the debounced translator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::json;
use tokio::sync::{mpsc, Mutex, RwLock};

use crate::error::PipelineResult;
use crate::event_bus::{topics, unix_ms, EventBus, EventTopic, PipelineEvent};
use crate::recognition::{RecognitionBackend, RecognitionSession, SessionConfig, SessionEvent};
use crate::state::PipelineState;
use crate::translate_client::DebouncedTranslator;
use crate::types::{ResultBatch, TargetLanguage};

struct SessionSlot {
    session: Box<dyn RecognitionSession>,
    events: Option<mpsc::UnboundedReceiver<SessionEvent>>,
    started: bool,
}

pub struct CaptureController {
    backend: Arc<dyn RecognitionBackend>,
    translator: Arc<DebouncedTranslator>,
    state: PipelineState,
    event_bus: Arc<dyn EventBus>,
    target_language: Arc<RwLock<TargetLanguage>>,
    session_config: SessionConfig,
    listening: Arc<AtomicBool>,
    // Exclusively owned session; no other component holds a reference to it.
    slot: Arc<Mutex<Option<SessionSlot>>>,
}

impl CaptureController {
    pub fn new(
        backend: Arc<dyn RecognitionBackend>,
        translator: Arc<DebouncedTranslator>,
        state: PipelineState,
        event_bus: Arc<dyn EventBus>,
        target_language: Arc<RwLock<TargetLanguage>>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            backend,
            translator,
            state,
            event_bus,
            target_language,
            session_config,
            listening: Arc::new(AtomicBool::new(false)),
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Begin continuous listening.
    ///
    /// Constructs a session through the backend when none exists. An
    /// unsupported host is written to the visible error state and returned
    /// as a typed error; no session is created and listening stays off.
    pub async fn start(&self) -> PipelineResult<()> {
        if self.listening.load(Ordering::SeqCst) {
            return Ok(());
        }

        let mut slot = self.slot.lock().await;
        if slot.is_none() {
            match self.backend.create_session(&self.session_config) {
                Ok(handle) => {
                    *slot = Some(SessionSlot {
                        session: handle.session,
                        events: Some(handle.events),
                        started: false,
                    });
                }
                Err(e) => {
                    let message = e.message();
                    self.state.set_error(message.clone()).await;
                    publish_error(&self.event_bus, &message).await;
                    return Err(e);
                }
            }
        }

        if let Some(entry) = slot.as_mut() {
            if let Some(events) = entry.events.take() {
                self.spawn_event_pump(events);
            }
            if let Err(e) = entry.session.start().await {
                let message = e.message();
                self.state.set_error(message.clone()).await;
                publish_error(&self.event_bus, &message).await;
                return Err(e);
            }
            entry.started = true;
        }
        drop(slot);

        self.listening.store(true, Ordering::SeqCst);
        let _ = self
            .event_bus
            .publish(PipelineEvent {
                topic: EventTopic::new(topics::SESSION_STATE),
                payload: json!({"listening": true}),
                timestamp_ms: unix_ms(),
            })
            .await;
        Ok(())
    }

    /// Stop listening and discard the current session.
    ///
    /// Vendor sessions are single-use after stop, so a fresh session object
    /// is constructed right away; a subsequent `start()` has an immediately
    /// usable instance. Idempotent: when already stopped the fresh session
    /// object is the only side effect.
    pub async fn stop(&self) -> PipelineResult<()> {
        // Flip listening first so an End event arriving mid-teardown does
        // not trigger a restart.
        self.listening.store(false, Ordering::SeqCst);

        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.take() {
            if entry.started {
                if let Err(e) = entry.session.stop().await {
                    // Non-fatal: the session is discarded either way.
                    self.state.set_error(e.message()).await;
                }
            }
        }
        if let Ok(handle) = self.backend.create_session(&self.session_config) {
            *slot = Some(SessionSlot {
                session: handle.session,
                events: Some(handle.events),
                started: false,
            });
        }
        drop(slot);

        let _ = self
            .event_bus
            .publish(PipelineEvent {
                topic: EventTopic::new(topics::SESSION_STATE),
                payload: json!({"listening": false}),
                timestamp_ms: unix_ms(),
            })
            .await;
        Ok(())
    }

    /// Explicit user clear: resets transcript, translation and error state.
    pub async fn clear(&self) {
        self.state.clear().await;
    }

    /// Controller teardown: stop the session and cancel any pending
    /// debounced translation so nothing fires afterwards.
    pub async fn shutdown(&self) -> PipelineResult<()> {
        self.stop().await?;
        self.translator.cancel();
        Ok(())
    }

    pub fn listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub async fn transcript(&self) -> String {
        self.state.transcript().await
    }

    pub async fn current_error(&self) -> Option<String> {
        self.state.error().await
    }

    fn spawn_event_pump(&self, mut events: mpsc::UnboundedReceiver<SessionEvent>) {
        let listening = Arc::clone(&self.listening);
        let slot = Arc::clone(&self.slot);
        let state = self.state.clone();
        let translator = Arc::clone(&self.translator);
        let event_bus = Arc::clone(&self.event_bus);
        let target_language = Arc::clone(&self.target_language);

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    SessionEvent::Result(batch) => {
                        handle_result_batch(
                            batch,
                            &state,
                            &translator,
                            &event_bus,
                            &target_language,
                        )
                        .await;
                    }
                    SessionEvent::Error(message) => {
                        listening.store(false, Ordering::SeqCst);
                        state.set_error(message.clone()).await;
                        publish_error(&event_bus, &message).await;
                    }
                    SessionEvent::End => {
                        // Vendor sessions may self-terminate (silence
                        // timeout). While listening is still on, restart at
                        // once so continuous listening stays continuous.
                        if !listening.load(Ordering::SeqCst) {
                            continue;
                        }
                        let restart_error = {
                            let slot_guard = slot.lock().await;
                            match slot_guard.as_ref() {
                                Some(entry) => entry.session.start().await.err(),
                                None => None,
                            }
                        };
                        if let Some(e) = restart_error {
                            listening.store(false, Ordering::SeqCst);
                            let message = e.message();
                            state.set_error(message.clone()).await;
                            publish_error(&event_bus, &message).await;
                        }
                    }
                }
            }
        });
    }
}

/// Process one recognition batch: finals are appended to the transcript in
/// result order and the batch's incremental addition goes to the debounced
/// translator; interims are published for live display only.
async fn handle_result_batch(
    batch: ResultBatch,
    state: &PipelineState,
    translator: &DebouncedTranslator,
    event_bus: &Arc<dyn EventBus>,
    target_language: &RwLock<TargetLanguage>,
) {
    let mut addition = String::new();
    for (offset, result) in batch.results.iter().enumerate() {
        if result.is_final {
            let transcript = state.append_transcript(&result.text).await;
            addition.push_str(&result.text);
            addition.push(' ');
            let _ = event_bus
                .publish(PipelineEvent {
                    topic: EventTopic::new(topics::TRANSCRIPT_APPENDED),
                    payload: json!({
                        "fragment": result.text,
                        "transcript": transcript,
                    }),
                    timestamp_ms: unix_ms(),
                })
                .await;
        } else {
            let _ = event_bus
                .publish(PipelineEvent {
                    topic: EventTopic::new(topics::INTERIM_RESULT),
                    payload: json!({
                        "text": result.text,
                        "result_index": batch.result_index + offset,
                    }),
                    timestamp_ms: unix_ms(),
                })
                .await;
        }
    }

    let addition = addition.trim();
    if !addition.is_empty() {
        let target = *target_language.read().await;
        translator.submit(addition, target);
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
