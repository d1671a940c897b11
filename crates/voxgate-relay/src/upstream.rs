pub mod http;
pub mod simulated;

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{ConvertRequest, TrainRequest},
};

/// Trait for voice-worker implementations
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Run a training job to completion and return the worker payload
    async fn train(&self, request: &TrainRequest) -> Result<serde_json::Value>;

    /// Convert audio with a trained voice and return the worker payload
    async fn convert(&self, request: &ConvertRequest) -> Result<serde_json::Value>;

    /// Whether results are synthesized locally instead of relayed
    fn simulated(&self) -> bool;
}

/// Parse a humane duration string from configuration
pub(crate) fn parse_duration(field: &str, value: &str) -> anyhow::Result<Duration> {
    duration_str::parse(value).map_err(|e| anyhow::anyhow!("invalid duration '{value}' for {field}: {e}"))
}
