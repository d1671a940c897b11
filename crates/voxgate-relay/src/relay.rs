use jiff::Timestamp;
use serde_json::Value;
use voxgate_config::Config;
use voxgate_store::{VoiceRecord, VoiceRecorder, VoiceStatus};

use crate::{
    error::Result,
    types::{ConvertRequest, TrainRequest},
    upstream::{Upstream, http::HttpUpstream, simulated::SimulatedUpstream},
};

/// Core broker: validates requests, dispatches to the voice worker, and
/// hands completed training runs to the persistence recorder
pub struct Relay {
    upstream: Box<dyn Upstream>,
    recorder: VoiceRecorder,
}

impl Relay {
    pub(crate) fn new(upstream: Box<dyn Upstream>, recorder: VoiceRecorder) -> Self {
        Self { upstream, recorder }
    }

    /// Assemble the relay from configuration
    ///
    /// The worker implementation is chosen once at startup: live when an
    /// upstream base URL is configured and the simulate override is off,
    /// simulated otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured duration does not parse
    pub fn from_config(config: &Config, recorder: VoiceRecorder) -> anyhow::Result<Self> {
        let upstream: Box<dyn Upstream> = match &config.upstream {
            Some(upstream_config) if !config.simulation_active() => {
                Box::new(HttpUpstream::from_config(upstream_config)?)
            }
            _ => Box::new(SimulatedUpstream::from_config(&config.simulation)?),
        };

        Ok(Self::new(upstream, recorder))
    }

    /// Whether responses are synthesized locally
    pub fn simulated(&self) -> bool {
        self.upstream.simulated()
    }

    /// Relay one training request to completion
    ///
    /// On success exactly one `VoiceRecord` is enqueued for background
    /// persistence; the write can never change the returned payload.
    pub async fn train(&self, request: &TrainRequest) -> Result<Value> {
        let fields = request.validate()?;

        tracing::info!(
            voice = %fields.exp_dir,
            user_id = %fields.user_id,
            simulated = self.upstream.simulated(),
            "training request"
        );

        let payload = self.upstream.train(request).await?;

        tracing::info!(voice = %fields.exp_dir, "training completed");

        let (status, test_mode) = if self.upstream.simulated() {
            (VoiceStatus::TestCompleted, true)
        } else {
            (VoiceStatus::Completed, false)
        };

        self.recorder.record(VoiceRecord {
            user_id: fields.user_id.to_owned(),
            exp_dir: fields.exp_dir.to_owned(),
            audio_url: fields.audio_url.to_owned(),
            status,
            result: payload.clone(),
            test_mode,
            completed_at: Timestamp::now(),
        });

        Ok(payload)
    }

    /// Relay one conversion request; no persistence side effect
    pub async fn convert(&self, request: &ConvertRequest) -> Result<Value> {
        let fields = request.validate()?;

        tracing::info!(
            model = %fields.model_name,
            simulated = self.upstream.simulated(),
            "conversion request"
        );

        self.upstream.convert(request).await
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("simulated", &self.upstream.simulated())
            .finish_non_exhaustive()
    }
}
