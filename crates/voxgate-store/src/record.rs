use jiff::Timestamp;
use serde::Serialize;

/// Completion state recorded for a trained voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceStatus {
    /// A GPU worker finished the training run
    Completed,
    /// A simulated run finished; no model was actually trained
    TestCompleted,
}

/// Document written to the store after a training run completes
///
/// Field names match the document layout existing clients read, so the
/// camelCase keys are kept verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceRecord {
    /// Owner of the voice; also the parent document key
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Voice model name; also the document key
    pub exp_dir: String,
    /// Source audio the model was trained on
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
    /// Completion state
    pub status: VoiceStatus,
    /// Worker response payload, stored verbatim
    pub result: serde_json::Value,
    /// Whether the result came from a simulated run
    pub test_mode: bool,
    /// When the relay observed completion
    #[serde(rename = "completedAt")]
    pub completed_at: Timestamp,
}
