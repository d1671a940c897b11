use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{record::VoiceRecord, store::VoiceStore};

/// Async recorder that persists voice documents from a background task
///
/// Records are sent via an unbounded channel and processed
/// asynchronously so persistence never blocks the response
#[derive(Clone)]
pub struct VoiceRecorder {
    tx: mpsc::UnboundedSender<VoiceRecord>,
}

impl VoiceRecorder {
    /// Create a new recorder and spawn its background processing task
    ///
    /// The background task runs until the sender is dropped
    #[must_use]
    pub fn new(store: Arc<dyn VoiceStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(process_records(rx, store));

        Self { tx }
    }

    /// Enqueue a voice record for background persistence
    ///
    /// This is non-blocking and fire-and-forget. If the channel is
    /// closed (background task stopped), the record is silently dropped
    pub fn record(&self, record: VoiceRecord) {
        if let Err(e) = self.tx.send(record) {
            tracing::warn!(
                error = %e,
                "failed to enqueue voice record, channel closed"
            );
        }
    }
}

impl std::fmt::Debug for VoiceRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceRecorder").finish_non_exhaustive()
    }
}

/// Background task that persists queued records
async fn process_records(mut rx: mpsc::UnboundedReceiver<VoiceRecord>, store: Arc<dyn VoiceStore>) {
    while let Some(record) = rx.recv().await {
        if let Err(e) = store.upsert(&record).await {
            tracing::warn!(
                error = %e,
                user_id = %record.user_id,
                voice = %record.exp_dir,
                "failed to persist voice record"
            );
        }
    }

    tracing::debug!("voice recorder shutting down");
}
