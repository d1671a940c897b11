#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod client;
pub mod error;
pub mod record;
pub mod recorder;
pub mod store;

pub use client::HttpVoiceStore;
pub use error::StoreError;
pub use record::{VoiceRecord, VoiceStatus};
pub use recorder::VoiceRecorder;
pub use store::{NoopVoiceStore, VoiceStore};
