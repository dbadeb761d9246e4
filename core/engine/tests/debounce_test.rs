//! Debounced translator unit tests with a mock translation client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Duration;

use parlance_core::{
    ChannelEventBus, DebouncedTranslator, EventBus, PipelineError, PipelineResult, PipelineState,
    TargetLanguage, TranslateRequest, TranslateResponse, TranslationClient,
};

struct MockTranslationClient {
    calls: Arc<Mutex<Vec<TranslateRequest>>>,
    fail: Arc<AtomicBool>,
}

#[async_trait]
impl TranslationClient for MockTranslationClient {
    async fn translate(&self, request: &TranslateRequest) -> PipelineResult<TranslateResponse> {
        self.calls.lock().unwrap().push(request.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(PipelineError::Translation(
                "Translation service unavailable".to_string(),
            ));
        }
        Ok(TranslateResponse {
            translation: format!("{}:{}", request.target_lang.code(), request.text),
        })
    }
}

fn build_translator(
    quiet_period: Duration,
) -> (
    DebouncedTranslator,
    PipelineState,
    Arc<Mutex<Vec<TranslateRequest>>>,
    Arc<AtomicBool>,
) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let fail = Arc::new(AtomicBool::new(false));
    let client = Arc::new(MockTranslationClient {
        calls: Arc::clone(&calls),
        fail: Arc::clone(&fail),
    });
    let state = PipelineState::new();
    let bus: Arc<dyn EventBus> = Arc::new(ChannelEventBus::new());
    let translator = DebouncedTranslator::new(client, state.clone(), bus, quiet_period);
    (translator, state, calls, fail)
}

#[tokio::test]
async fn burst_fires_exactly_once_with_last_payload() {
    // "Hola" then "Hola mundo" 200 ms apart inside the default
    // 1000 ms quiet period.
    let (translator, state, calls, _) = build_translator(Duration::from_millis(1000));

    translator.submit("Hola", TargetLanguage::Es);
    tokio::time::sleep(Duration::from_millis(200)).await;
    translator.submit("Hola mundo", TargetLanguage::Es);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "Hola mundo");
    assert_eq!(calls[0].target_lang, TargetLanguage::Es);
    assert_eq!(state.translation().await, "ES:Hola mundo");
}

#[tokio::test]
async fn each_quiet_period_fires_independently() {
    let (translator, _state, calls, _) = build_translator(Duration::from_millis(100));

    translator.submit("first", TargetLanguage::Fr);
    tokio::time::sleep(Duration::from_millis(250)).await;
    translator.submit("second", TargetLanguage::Fr);
    tokio::time::sleep(Duration::from_millis(250)).await;

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].text, "first");
    assert_eq!(calls[1].text, "second");
}

#[tokio::test]
async fn whitespace_only_payload_is_dropped() {
    let (translator, state, calls, _) = build_translator(Duration::from_millis(50));

    translator.submit("   ", TargetLanguage::De);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(state.translation().await, "");
    assert!(state.error().await.is_none());
}

#[tokio::test]
async fn cancel_discards_pending_payload() {
    let (translator, _state, calls, _) = build_translator(Duration::from_millis(100));

    translator.submit("doomed", TargetLanguage::It);
    translator.cancel();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failure_keeps_prior_translation_and_sets_error() {
    // An upstream failure leaves the displayed translation unchanged
    // and surfaces the failure message.
    let (translator, state, calls, fail) = build_translator(Duration::from_millis(50));

    translator.submit("hello", TargetLanguage::Ja);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(state.translation().await, "JA:hello");

    fail.store(true, Ordering::SeqCst);
    translator.submit("world", TargetLanguage::Ja);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(calls.lock().unwrap().len(), 2);
    assert_eq!(state.translation().await, "JA:hello");
    assert_eq!(
        state.error().await.as_deref(),
        Some("Translation service unavailable")
    );
}

#[tokio::test]
async fn language_is_captured_at_submit_time() {
    let (translator, state, calls, _) = build_translator(Duration::from_millis(50));

    translator.submit("bonjour", TargetLanguage::Fr);
    tokio::time::sleep(Duration::from_millis(200)).await;

    translator.submit("ciao", TargetLanguage::It);
    tokio::time::sleep(Duration::from_millis(200)).await;

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls[0].target_lang, TargetLanguage::Fr);
    assert_eq!(calls[1].target_lang, TargetLanguage::It);
    assert_eq!(state.translation().await, "IT:ciao");
}
