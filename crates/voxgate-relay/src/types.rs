use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RelayError, Result};

/// Training request forwarded to the voice worker
///
/// Only the fields the relay itself reads are typed. Everything else the
/// client sends (sample rate, pitch method, epoch and batch counters,
/// checkpoint paths, GPU lists) lands in `extras` and is forwarded
/// untouched, so new worker knobs need no relay change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRequest {
    /// Voice model name; doubles as the experiment directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_dir1: Option<String>,
    /// Source audio the model is trained on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainset_dir4: Option<String>,
    /// Owning user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Remaining worker parameters, passed through verbatim
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

/// Validated view of the required training fields
#[derive(Debug, Clone, Copy)]
pub struct TrainFields<'a> {
    pub exp_dir: &'a str,
    pub audio_url: &'a str,
    pub user_id: &'a str,
}

impl TrainRequest {
    /// Check the required fields are present and non-empty
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` naming every missing field
    pub fn validate(&self) -> Result<TrainFields<'_>> {
        let mut missing = Vec::new();
        let exp_dir = required("exp_dir1", self.exp_dir1.as_deref(), &mut missing);
        let audio_url = required("trainset_dir4", self.trainset_dir4.as_deref(), &mut missing);
        let user_id = required("user_id", self.user_id.as_deref(), &mut missing);

        if missing.is_empty() {
            Ok(TrainFields {
                exp_dir,
                audio_url,
                user_id,
            })
        } else {
            Err(missing_fields(&missing))
        }
    }

    /// Sample rate asked for by the client, when it is a string like "40k"
    pub fn requested_sample_rate(&self) -> Option<&str> {
        self.extras.get("sr2").and_then(Value::as_str)
    }

    /// Epoch count asked for by the client
    pub fn requested_epochs(&self) -> Option<u64> {
        self.extras.get("total_epoch11").and_then(Value::as_u64)
    }
}

/// Conversion request forwarded to the voice worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// Audio to convert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Trained voice model to convert with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Pitch shift in semitones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f0_up_key: Option<i64>,
    /// Requesting user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Remaining worker parameters, passed through verbatim
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

/// Validated view of the required conversion fields
#[derive(Debug, Clone, Copy)]
pub struct ConvertFields<'a> {
    pub audio_url: &'a str,
    pub model_name: &'a str,
}

impl ConvertRequest {
    /// Check the required fields are present and non-empty
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` naming every missing field
    pub fn validate(&self) -> Result<ConvertFields<'_>> {
        let mut missing = Vec::new();
        let audio_url = required("audio_url", self.audio_url.as_deref(), &mut missing);
        let model_name = required("model_name", self.model_name.as_deref(), &mut missing);

        if missing.is_empty() {
            Ok(ConvertFields { audio_url, model_name })
        } else {
            Err(missing_fields(&missing))
        }
    }
}

fn required<'a>(name: &'static str, value: Option<&'a str>, missing: &mut Vec<&'static str>) -> &'a str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            ""
        }
    }
}

fn missing_fields(missing: &[&str]) -> RelayError {
    RelayError::InvalidRequest(format!("Missing required fields: {}", missing.join(", ")))
}
