//! Engine lifecycle: boot and shutdown.

use tokio::time::Duration;

use super::core::PipelineEngine;
use crate::error::PipelineResult;
use crate::health_check::HealthChecker;
use crate::telemetry::TelemetryDatum;

impl PipelineEngine {
    /// Start the engine: event bus up, configuration applied, dependent
    /// services probed until ready (bounded retries), boot telemetry
    /// recorded.
    pub async fn boot(&self) -> PipelineResult<()> {
        self.event_bus.start().await?;
        let config = self.config.load().await?;
        *self.target_language.write().await = config.target_language;

        if let (Some(speech_url), Some(translate_url)) =
            (&self.speech_service_url, &self.translate_service_url)
        {
            const MAX_RETRIES: u32 = 15;
            const RETRY_DELAY_MS: u64 = 1000;

            let checker = HealthChecker::new();
            let mut speech_healthy = false;
            let mut translate_healthy = false;

            eprintln!("[INFO] Waiting for speech and translate services to be ready...");

            for attempt in 1..=MAX_RETRIES {
                let (speech, translate) =
                    checker.check_all_services(speech_url, translate_url).await;
                speech_healthy = speech.is_healthy;
                translate_healthy = translate.is_healthy;

                if speech_healthy && translate_healthy {
                    eprintln!(
                        "[INFO] Service health checks passed (attempt {}/{})",
                        attempt, MAX_RETRIES
                    );
                    break;
                }
                if attempt < MAX_RETRIES {
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                }
            }

            // Degraded services don't block boot; the pipeline surfaces
            // per-call errors once requests start failing.
            if !speech_healthy {
                eprintln!(
                    "[WARN] Speech service is not healthy: {} - segments will fail until it is up",
                    speech_url
                );
            }
            if !translate_healthy {
                eprintln!(
                    "[WARN] Translate service is not healthy: {} - translations will fail until it is up",
                    translate_url
                );
            }
        }

        self.telemetry
            .record(TelemetryDatum::count("pipeline.boot"))
            .await?;
        self.telemetry
            .record(TelemetryDatum::count(format!(
                "pipeline.target.{}",
                config.target_language.code()
            )))
            .await?;
        Ok(())
    }

    /// Tear the engine down: capture stopped, pending debounced translation
    /// cancelled, streaming closed if active, event bus stopped.
    pub async fn shutdown(&self) -> PipelineResult<()> {
        self.capture.shutdown().await?;
        if let Some(streaming) = &self.streaming {
            if streaming.is_active() {
                streaming.stop_streaming().await?;
            }
        }
        self.event_bus.stop().await?;
        self.telemetry
            .record(TelemetryDatum::count("pipeline.shutdown"))
            .await?;
        Ok(())
    }
}
