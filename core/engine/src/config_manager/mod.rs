use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::types::TargetLanguage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub target_language: TargetLanguage,
    pub speech_service_url: String,
    pub translate_service_url: String,
    /// Quiet period the translator waits for before firing, in milliseconds.
    pub debounce_quiet_period_ms: u64,
    pub segment_duration_ms: u64,
    pub capture_sample_rate: u32,
    pub capture_channels: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_language: TargetLanguage::Es,
            speech_service_url: "http://127.0.0.1:3000".to_string(),
            translate_service_url: "http://127.0.0.1:3000".to_string(),
            debounce_quiet_period_ms: 1000,
            segment_duration_ms: 3000,
            capture_sample_rate: 48_000,
            capture_channels: 1,
        }
    }
}

#[async_trait]
pub trait ConfigManager: Send + Sync {
    async fn load(&self) -> PipelineResult<PipelineConfig>;
    async fn current(&self) -> PipelineResult<PipelineConfig>;
}

/// In-memory configuration, fixed at construction.
pub struct StaticConfig {
    config: PipelineConfig,
}

impl StaticConfig {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[async_trait]
impl ConfigManager for StaticConfig {
    async fn load(&self) -> PipelineResult<PipelineConfig> {
        Ok(self.config.clone())
    }

    async fn current(&self) -> PipelineResult<PipelineConfig> {
        Ok(self.config.clone())
    }
}
