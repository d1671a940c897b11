//! Mock document store capturing persistence writes
//!
//! Accepts the PATCH upserts the relay issues after completed training
//! runs and records everything needed for assertions.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// One captured upsert
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub project: String,
    pub user_id: String,
    pub voice: String,
    pub merge: bool,
    pub api_key: Option<String>,
    pub record: serde_json::Value,
}

/// Mock document store that captures upserted voice records
pub struct MockStore {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockStoreState>,
}

struct MockStoreState {
    upsert_count: AtomicU32,
    /// Number of upserts to reject before accepting (0 = never fail)
    fail_count: AtomicU32,
    documents: Mutex<Vec<StoredDocument>>,
}

impl MockStore {
    /// Start the mock store, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0).await
    }

    /// Start a mock store that rejects the first `n` upserts with 403
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(n).await
    }

    async fn start_inner(fail_count: u32) -> anyhow::Result<Self> {
        let state = Arc::new(MockStoreState {
            upsert_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            documents: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(
                "/v1/projects/{project}/exp_dir/{user}/voices/{voice}",
                routing::patch(handle_upsert),
            )
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

    /// Base URL for configuring the mock as the document store
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of upserts attempted, including rejected ones
    pub fn upsert_count(&self) -> u32 {
        self.state.upsert_count.load(Ordering::Relaxed)
    }

    /// Documents accepted so far
    pub fn documents(&self) -> Vec<StoredDocument> {
        self.state.documents.lock().unwrap().clone()
    }

    /// Wait until at least `expected` upserts were attempted
    ///
    /// Persistence is fire-and-forget on the relay side, so tests poll
    /// instead of racing the background writer.
    pub async fn wait_for_upserts(&self, expected: u32) -> bool {
        for _ in 0..50 {
            if self.upsert_count() >= expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.upsert_count() >= expected
    }
}

impl Drop for MockStore {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_upsert(
    State(state): State<Arc<MockStoreState>>,
    Path((project, user_id, voice)): Path<(String, String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(record): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.upsert_count.fetch_add(1, Ordering::Relaxed);

    let remaining = state.fail_count.load(Ordering::Relaxed);
    if remaining > 0 {
        state.fail_count.fetch_sub(1, Ordering::Relaxed);
        return (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "error": "mock store intentional failure" })),
        )
            .into_response();
    }

    let document = StoredDocument {
        project,
        user_id,
        voice,
        merge: params.get("merge").is_some_and(|v| v == "true"),
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        record,
    };
    state.documents.lock().unwrap().push(document);

    Json(serde_json::json!({ "updateTime": "2026-01-01T00:00:00Z" })).into_response()
}
