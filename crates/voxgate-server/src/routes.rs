use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use voxgate_relay::{ConvertRequest, Relay, RelayError, TrainRequest};

use crate::extract::ExtractJson;

/// Shared state behind the relay endpoints
pub struct AppState {
    pub relay: Relay,
}

/// Success envelope shared by the relay endpoints
#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
    message: &'static str,
    data: Value,
}

fn success(message: &'static str, data: Value) -> Response {
    Json(SuccessResponse {
        success: true,
        message,
        data,
    })
    .into_response()
}

/// Service banner with mode and version diagnostics
pub async fn root_handler(State(state): State<Arc<AppState>>) -> Response {
    let mode = if state.relay.simulated() { "simulation" } else { "live" };

    Json(serde_json::json!({
        "message": "Voxgate RVC relay is running",
        "status": "active",
        "timestamp": jiff::Timestamp::now(),
        "mode": mode,
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

/// Handle training requests
///
/// The relay call runs on a detached task: a client hanging up does not
/// cancel an in-flight training run or its persistence write, and a
/// panic inside the relay surfaces as a generic 500 instead of a dead
/// connection.
pub async fn train_handler(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<TrainRequest>,
) -> Result<Response, RelayError> {
    let payload = tokio::spawn(async move { state.relay.train(&request).await })
        .await
        .map_err(|e| {
            tracing::error!("training task failed: {e}");
            RelayError::Internal
        })??;

    Ok(success("Training completed", payload))
}

/// Handle conversion requests
pub async fn convert_handler(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<ConvertRequest>,
) -> Result<Response, RelayError> {
    let payload = tokio::spawn(async move { state.relay.convert(&request).await })
        .await
        .map_err(|e| {
            tracing::error!("conversion task failed: {e}");
            RelayError::Internal
        })??;

    Ok(success("Conversion completed", payload))
}
