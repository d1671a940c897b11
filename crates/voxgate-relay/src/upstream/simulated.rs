use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use voxgate_config::SimulationConfig;

use super::{Upstream, parse_duration};
use crate::{
    error::Result,
    types::{ConvertRequest, TrainRequest},
};

/// Sample rate reported when the request does not ask for one
const DEFAULT_SAMPLE_RATE: &str = "40k";

/// Epoch count reported when the request does not ask for one
const DEFAULT_EPOCHS: u64 = 20;

/// Worker stand-in that synthesizes responses locally
///
/// Lets the full request path be exercised without a GPU worker. The
/// artificial delays approximate a worker that takes real time to
/// answer, so client-side progress handling stays honest.
pub struct SimulatedUpstream {
    train_delay: Duration,
    convert_delay: Duration,
}

impl SimulatedUpstream {
    pub const fn new(train_delay: Duration, convert_delay: Duration) -> Self {
        Self {
            train_delay,
            convert_delay,
        }
    }

    /// Build from the simulation configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if a delay string does not parse
    pub fn from_config(config: &SimulationConfig) -> anyhow::Result<Self> {
        Ok(Self::new(
            parse_duration("simulation.train_delay", &config.train_delay)?,
            parse_duration("simulation.convert_delay", &config.convert_delay)?,
        ))
    }
}

#[async_trait]
impl Upstream for SimulatedUpstream {
    async fn train(&self, request: &TrainRequest) -> Result<Value> {
        tokio::time::sleep(self.train_delay).await;

        let voice = request.exp_dir1.as_deref().unwrap_or_default();
        let sample_rate = request.requested_sample_rate().unwrap_or(DEFAULT_SAMPLE_RATE);
        let epochs = request.requested_epochs().unwrap_or(DEFAULT_EPOCHS);

        Ok(json!({
            "voice_name": voice,
            "model_path": format!("logs/{voice}/weights/{voice}.pth"),
            "index_path": format!("logs/{voice}/added_IVF256_Flat_nprobe_1_{voice}_v2.index"),
            "sample_rate": sample_rate,
            "epochs": epochs,
            "mock": true,
            "note": "Simulated training run, no model was produced",
        }))
    }

    async fn convert(&self, request: &ConvertRequest) -> Result<Value> {
        tokio::time::sleep(self.convert_delay).await;

        Ok(json!({
            "output_url": request.audio_url.as_deref().unwrap_or_default(),
            "model_name": request.model_name.as_deref().unwrap_or_default(),
            "mock": true,
            "note": "Simulated conversion, audio returned unchanged",
        }))
    }

    fn simulated(&self) -> bool {
        true
    }
}
