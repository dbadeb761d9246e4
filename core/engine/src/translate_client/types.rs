use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::types::TargetLanguage;

/// Translation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(rename = "targetLang")]
    pub target_lang: TargetLanguage,
}

/// Translation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

/// Translation service seam.
#[async_trait]
pub trait TranslationClient: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> PipelineResult<TranslateResponse>;
}
