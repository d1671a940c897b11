#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod relay;
mod types;
mod upstream;

pub use error::{RelayError, Result};
pub use relay::Relay;
pub use types::{ConvertFields, ConvertRequest, TrainFields, TrainRequest};
