use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryDatum {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

impl TelemetryDatum {
    /// A single occurrence of a named event.
    pub fn count(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 1.0,
            unit: "count".to_string(),
        }
    }
}

#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn record(&self, datum: TelemetryDatum) -> PipelineResult<()>;
}

/// Prints each datum to stderr; used by the binary and in tests.
pub struct StdoutTelemetry;

#[async_trait]
impl TelemetrySink for StdoutTelemetry {
    async fn record(&self, datum: TelemetryDatum) -> PipelineResult<()> {
        eprintln!("[TELEMETRY] {} {} {}", datum.name, datum.value, datum.unit);
        Ok(())
    }
}

/// Discards all data.
pub struct NullTelemetry;

#[async_trait]
impl TelemetrySink for NullTelemetry {
    async fn record(&self, _datum: TelemetryDatum) -> PipelineResult<()> {
        Ok(())
    }
}
