use async_trait::async_trait;

use crate::{error::StoreError, record::VoiceRecord};

/// Persistence backend for trained voice models
#[async_trait]
pub trait VoiceStore: Send + Sync {
    /// Insert or update the document for one trained voice
    ///
    /// Upserts merge into any existing document rather than replacing it,
    /// so retraining the same voice keeps unrelated fields intact.
    async fn upsert(&self, record: &VoiceRecord) -> Result<(), StoreError>;
}

/// Store used when persistence is not configured
///
/// Upserts are acknowledged and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVoiceStore;

#[async_trait]
impl VoiceStore for NoopVoiceStore {
    async fn upsert(&self, record: &VoiceRecord) -> Result<(), StoreError> {
        tracing::debug!(
            user_id = %record.user_id,
            voice = %record.exp_dir,
            "persistence disabled, dropping voice record"
        );
        Ok(())
    }
}
