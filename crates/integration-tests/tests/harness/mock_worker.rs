//! Mock GPU worker for integration tests
//!
//! Implements the `/train` and `/convert` routes with canned responses
//! that echo enough of the request to prove the relay forwarded it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock voice worker that returns predictable responses
pub struct MockWorker {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockWorkerState>,
}

struct MockWorkerState {
    train_count: AtomicU32,
    convert_count: AtomicU32,
    /// Number of requests to fail before succeeding (0 = never fail)
    fail_count: AtomicU32,
}

impl MockWorker {
    /// Start the mock worker, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0).await
    }

    /// Start a mock worker that fails the first `n` requests with 500
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(n).await
    }

    async fn start_inner(fail_count: u32) -> anyhow::Result<Self> {
        let state = Arc::new(MockWorkerState {
            train_count: AtomicU32::new(0),
            convert_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
        });

        let app = Router::new()
            .route("/train", routing::post(handle_train))
            .route("/convert", routing::post(handle_convert))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the relay upstream
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of training requests received
    pub fn train_count(&self) -> u32 {
        self.state.train_count.load(Ordering::Relaxed)
    }

    /// Number of conversion requests received
    pub fn convert_count(&self) -> u32 {
        self.state.convert_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockWorker {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Consume one configured failure, if any remain
fn take_failure(state: &MockWorkerState) -> bool {
    let remaining = state.fail_count.load(Ordering::Relaxed);
    if remaining > 0 {
        state.fail_count.fetch_sub(1, Ordering::Relaxed);
        return true;
    }
    false
}

async fn handle_train(
    State(state): State<Arc<MockWorkerState>>,
    Json(req): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.train_count.fetch_add(1, Ordering::Relaxed);

    if take_failure(&state) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "mock worker intentional failure" })),
        )
            .into_response();
    }

    let voice = req["exp_dir1"].as_str().unwrap_or_default();

    Json(serde_json::json!({
        "voice_name": voice,
        "model_path": format!("logs/{voice}/weights/{voice}.pth"),
        "epochs": 20,
    }))
    .into_response()
}

async fn handle_convert(
    State(state): State<Arc<MockWorkerState>>,
    Json(req): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.convert_count.fetch_add(1, Ordering::Relaxed);

    if take_failure(&state) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "mock worker intentional failure" })),
        )
            .into_response();
    }

    Json(serde_json::json!({
        "output_url": "https://cdn.example.dev/converted.wav",
        "model_name": req["model_name"],
    }))
    .into_response()
}
