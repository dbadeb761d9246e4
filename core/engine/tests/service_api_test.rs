//! Adapter service route tests against a locally bound server, including
//! the pipeline's own HTTP clients driven end to end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use parlance_core::service::{router, AppState};
use parlance_core::upstream::{SpeechProvider, TranslationProvider, UpstreamError};
use parlance_core::{
    PipelineError, RemoteTranslateClient, SpeechHttpClient, TargetLanguage, TranscriptionGateway,
    TranslateRequest, TranslationClient,
};

struct EchoSpeech {
    fail: bool,
}

#[async_trait]
impl SpeechProvider for EchoSpeech {
    async fn recognize(&self, audio_b64: &str) -> Result<String, UpstreamError> {
        if self.fail {
            return Err(UpstreamError::Transport("vendor exploded".to_string()));
        }
        Ok(format!("heard {} bytes", audio_b64.len()))
    }
}

enum TranslateMode {
    Ok,
    UpstreamStatus,
    Transport,
}

struct CountingTranslate {
    calls: Arc<AtomicUsize>,
    mode: TranslateMode,
}

#[async_trait]
impl TranslationProvider for CountingTranslate {
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            TranslateMode::Ok => Ok(format!("{}:{}", target.code(), text)),
            TranslateMode::UpstreamStatus => Err(UpstreamError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )),
            TranslateMode::Transport => {
                Err(UpstreamError::Transport("connection reset".to_string()))
            }
        }
    }
}

async fn serve(state: AppState) -> String {
    let app = router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn state_with(mode: TranslateMode, calls: Arc<AtomicUsize>) -> AppState {
    AppState {
        speech: Arc::new(EchoSpeech { fail: false }),
        translate: Some(Arc::new(CountingTranslate { calls, mode })),
    }
}

#[tokio::test]
async fn empty_text_short_circuits_without_upstream_call() {
    // POST /api/translate with empty text answers an empty
    // translation and never reaches the provider.
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::Ok, Arc::clone(&calls))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/translate", base))
        .json(&json!({"text": "", "targetLang": "ES"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["translation"], "");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn translate_round_trip_uses_target_language() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::Ok, Arc::clone(&calls))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/translate", base))
        .json(&json!({"text": "good morning", "targetLang": "JA"}))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["translation"], "JA:good morning");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_target_language_defaults_to_spanish() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::Ok, calls)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/translate", base))
        .json(&json!({"text": "hello"}))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["translation"], "ES:hello");
}

#[tokio::test]
async fn unconfigured_translate_answers_503_even_for_empty_text() {
    // The configuration check comes before the payload is looked at, so an
    // empty text does not slip through as an empty translation.
    let base = serve(AppState {
        speech: Arc::new(EchoSpeech { fail: false }),
        translate: None,
    })
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/translate", base))
        .json(&json!({"text": "", "targetLang": "ES"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Translation service not configured");
}

#[tokio::test]
async fn unconfigured_translate_answers_503() {
    let base = serve(AppState {
        speech: Arc::new(EchoSpeech { fail: false }),
        translate: None,
    })
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/translate", base))
        .json(&json!({"text": "hello", "targetLang": "FR"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Translation service not configured");
}

#[tokio::test]
async fn upstream_status_maps_to_502() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::UpstreamStatus, calls)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/translate", base))
        .json(&json!({"text": "hello", "targetLang": "DE"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Translation service unavailable");
}

#[tokio::test]
async fn transport_failure_maps_to_500() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::Transport, calls)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/translate", base))
        .json(&json!({"text": "hello", "targetLang": "IT"}))
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to translate text");
}

#[tokio::test]
async fn speech_without_audio_answers_400() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::Ok, calls)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/speech", base))
        .json(&json!({"audio": ""}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No audio data provided");
}

#[tokio::test]
async fn speech_vendor_failure_answers_500() {
    let base = serve(AppState {
        speech: Arc::new(EchoSpeech { fail: true }),
        translate: None,
    })
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/speech", base))
        .json(&json!({"audio": "AAAA"}))
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to process audio");
}

#[tokio::test]
async fn health_probes_both_upstreams() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::Ok, calls)).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["speech"], true);
    assert_eq!(body["services"]["translate"], true);
}

#[tokio::test]
async fn health_reports_unconfigured_translate_as_unhealthy() {
    let base = serve(AppState {
        speech: Arc::new(EchoSpeech { fail: false }),
        translate: None,
    })
    .await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["speech"], true);
    assert_eq!(body["services"]["translate"], false);
}

#[tokio::test]
async fn health_reports_unreachable_upstream() {
    struct DownSpeech;

    #[async_trait]
    impl SpeechProvider for DownSpeech {
        async fn recognize(&self, _audio_b64: &str) -> Result<String, UpstreamError> {
            Err(UpstreamError::Transport("unreachable".to_string()))
        }

        async fn check(&self) -> bool {
            false
        }
    }

    let base = serve(AppState {
        speech: Arc::new(DownSpeech),
        translate: None,
    })
    .await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["services"]["speech"], false);
}

#[tokio::test]
async fn speech_http_client_round_trips_through_service() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::Ok, calls)).await;

    let gateway = SpeechHttpClient::new(base, 5);
    let transcription = gateway.recognize_segment("AAAA").await.unwrap();
    assert_eq!(transcription, "heard 4 bytes");
}

#[tokio::test]
async fn speech_http_client_surfaces_service_error_body() {
    let base = serve(AppState {
        speech: Arc::new(EchoSpeech { fail: true }),
        translate: None,
    })
    .await;

    let gateway = SpeechHttpClient::new(base, 5);
    let err = gateway.recognize_segment("AAAA").await.unwrap_err();
    assert_eq!(
        err,
        PipelineError::AudioProcessing("Failed to process audio".to_string())
    );
}

#[tokio::test]
async fn translate_client_round_trips_through_service() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::Ok, calls)).await;

    let client = RemoteTranslateClient::new(base);
    let response = client
        .translate(&TranslateRequest {
            text: "good evening".to_string(),
            target_lang: TargetLanguage::Fr,
        })
        .await
        .unwrap();
    assert_eq!(response.translation, "FR:good evening");
}

#[tokio::test]
async fn translate_client_surfaces_upstream_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(state_with(TranslateMode::UpstreamStatus, calls)).await;

    let client = RemoteTranslateClient::new(base);
    let err = client
        .translate(&TranslateRequest {
            text: "good evening".to_string(),
            target_lang: TargetLanguage::Es,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PipelineError::Translation("Translation service unavailable".to_string())
    );
}
