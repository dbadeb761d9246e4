use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::AppState;
use crate::types::TargetLanguage;
use crate::upstream::UpstreamError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/speech", post(speech))
        .route("/api/translate", post(translate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    // Probe both vendors concurrently; an unconfigured translate upstream
    // reports unhealthy.
    let speech_check = state.speech.check();
    let translate_check = async {
        match state.translate.as_ref() {
            Some(provider) => provider.check().await,
            None => false,
        }
    };
    let (speech_healthy, translate_healthy) = tokio::join!(speech_check, translate_check);

    Json(json!({
        "status": "ok",
        "services": {
            "speech": speech_healthy,
            "translate": translate_healthy,
        },
    }))
}

#[derive(Debug, Deserialize)]
struct SpeechBody {
    audio: Option<String>,
}

async fn speech(State(state): State<AppState>, Json(body): Json<SpeechBody>) -> Response {
    let request_id = Uuid::new_v4();

    let Some(audio) = body.audio.filter(|a| !a.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No audio data provided"})),
        )
            .into_response();
    };

    match state.speech.recognize(&audio).await {
        Ok(transcription) => Json(json!({"transcription": transcription})).into_response(),
        Err(e) => {
            eprintln!("[WARN] speech request {} failed: {}", request_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to process audio"})),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslateBody {
    text: Option<String>,
    #[serde(rename = "targetLang")]
    target_lang: Option<String>,
}

async fn translate(State(state): State<AppState>, Json(body): Json<TranslateBody>) -> Response {
    let request_id = Uuid::new_v4();

    // A missing upstream key answers 503 before the payload is looked at.
    let Some(provider) = state.translate.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "Translation service not configured"})),
        )
            .into_response();
    };

    // Empty payloads short-circuit without touching the upstream provider.
    let text = body.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Json(json!({"translation": ""})).into_response();
    }

    let target = body
        .target_lang
        .as_deref()
        .and_then(|code| TargetLanguage::from_code(code).ok())
        .unwrap_or(TargetLanguage::Es);

    match provider.translate(&text, target).await {
        Ok(translation) => Json(json!({"translation": translation})).into_response(),
        Err(UpstreamError::Status(status)) => {
            eprintln!(
                "[WARN] translate request {} upstream error: HTTP {}",
                request_id, status
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "Translation service unavailable"})),
            )
                .into_response()
        }
        Err(e) => {
            eprintln!("[WARN] translate request {} failed: {}", request_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to translate text"})),
            )
                .into_response()
        }
    }
}
