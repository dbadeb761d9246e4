use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;

use parlance_core::service::{router, AppState};
use parlance_core::upstream::{SpeechProvider, UpstreamError};
use parlance_core::HealthChecker;

struct NoopSpeech;

#[async_trait]
impl SpeechProvider for NoopSpeech {
    async fn recognize(&self, _audio_b64: &str) -> Result<String, UpstreamError> {
        Ok(String::new())
    }
}

async fn serve_adapter() -> String {
    let app = router(AppState {
        speech: Arc::new(NoopSpeech),
        translate: None,
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// An address nothing listens on.
async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn running_service_reports_healthy() {
    let base = serve_adapter().await;
    let checker = HealthChecker::new();

    let health = checker.check_speech_service(&base).await;
    assert!(health.is_healthy);
    assert!(health.error.is_none());
    assert_eq!(health.service_name, "speech");
}

#[tokio::test]
async fn unreachable_service_reports_unhealthy() {
    let base = dead_url().await;
    let checker = HealthChecker::new();

    let health = checker.check_translate_service(&base).await;
    assert!(!health.is_healthy);
    assert!(health.error.is_some());
}

#[tokio::test]
async fn check_all_probes_both_services() {
    let up = serve_adapter().await;
    let down = dead_url().await;
    let checker = HealthChecker::new();

    let (speech, translate) = checker.check_all_services(&up, &down).await;
    assert!(speech.is_healthy);
    assert!(!translate.is_healthy);
}
