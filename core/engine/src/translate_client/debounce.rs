//! Quiet-period coalescing in front of the translation service.
//!
//! Rapid text mutations are batched so that at most one translation request
//! fires per quiet period, always carrying the most recent payload. The
//! worker is a two-state machine: Idle (no payload) and Pending (latest
//! payload plus a deadline). `submit` replaces the payload and resets the
//! deadline; `cancel` discards it; the deadline elapsing fires the request.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

use super::types::{TranslateRequest, TranslationClient};
use crate::event_bus::{topics, unix_ms, EventBus, EventTopic, PipelineEvent};
use crate::state::PipelineState;
use crate::types::TargetLanguage;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

enum Command {
    Submit {
        text: String,
        target_lang: TargetLanguage,
    },
    Cancel,
}

/// Debounced front end of the translation service.
///
/// Dropping the translator shuts the worker down without firing any pending
/// request, which is the teardown contract: nothing translates after the
/// consumer is gone.
pub struct DebouncedTranslator {
    commands: mpsc::UnboundedSender<Command>,
    state: PipelineState,
}

impl DebouncedTranslator {
    pub fn new(
        client: Arc<dyn TranslationClient>,
        state: PipelineState,
        event_bus: Arc<dyn EventBus>,
        quiet_period: Duration,
    ) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(
            receiver,
            client,
            state.clone(),
            event_bus,
            quiet_period,
        ));

        Self { commands, state }
    }

    /// Record `text` as the latest pending payload and restart the quiet
    /// period. Only the most recent call within any quiet period survives.
    /// The target language is captured now; changing it later affects the
    /// next submission only.
    pub fn submit(&self, text: impl Into<String>, target_lang: TargetLanguage) {
        let _ = self.commands.send(Command::Submit {
            text: text.into(),
            target_lang,
        });
    }

    /// Discard any pending payload without side effects. In-flight requests
    /// already sent are not cancelled; their results still apply.
    pub fn cancel(&self) {
        let _ = self.commands.send(Command::Cancel);
    }

    /// The latest published translation.
    pub async fn translation(&self) -> String {
        self.state.translation().await
    }
}

async fn run_worker(
    mut receiver: mpsc::UnboundedReceiver<Command>,
    client: Arc<dyn TranslationClient>,
    state: PipelineState,
    event_bus: Arc<dyn EventBus>,
    quiet_period: Duration,
) {
    let mut pending: Option<(String, TargetLanguage)> = None;
    let mut deadline = Instant::now();

    loop {
        // Idle blocks on the next command; Pending additionally races the
        // deadline. A closed channel means the translator was dropped, so
        // any pending payload is discarded unfired.
        let command = if pending.is_some() {
            tokio::select! {
                command = receiver.recv() => match command {
                    Some(command) => Some(command),
                    None => return,
                },
                _ = sleep_until(deadline) => None,
            }
        } else {
            match receiver.recv().await {
                Some(command) => Some(command),
                None => return,
            }
        };

        match command {
            Some(Command::Submit { text, target_lang }) => {
                pending = Some((text, target_lang));
                deadline = Instant::now() + quiet_period;
            }
            Some(Command::Cancel) => {
                pending = None;
            }
            None => {
                let Some((text, target_lang)) = pending.take() else {
                    continue;
                };
                if text.trim().is_empty() {
                    continue;
                }

                let request = TranslateRequest { text, target_lang };
                match client.translate(&request).await {
                    Ok(response) => {
                        state.set_translation(response.translation.clone()).await;
                        let _ = event_bus
                            .publish(PipelineEvent {
                                topic: EventTopic::new(topics::TRANSLATION_UPDATED),
                                payload: json!({
                                    "translation": response.translation,
                                    "target_lang": target_lang.code(),
                                }),
                                timestamp_ms: unix_ms(),
                            })
                            .await;
                    }
                    Err(e) => {
                        // Prior transcript and last-good translation stay
                        // untouched; only the error state changes.
                        let message = e.message();
                        state.set_error(message.clone()).await;
                        let _ = event_bus
                            .publish(PipelineEvent {
                                topic: EventTopic::new(topics::PIPELINE_ERROR),
                                payload: json!({"error": message}),
                                timestamp_ms: unix_ms(),
                            })
                            .await;
                    }
                }
            }
        }
    }
}
