mod extract;
mod health;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use voxgate_config::Config;
use voxgate_relay::Relay;
use voxgate_store::{HttpVoiceStore, NoopVoiceStore, VoiceRecorder, VoiceStore};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Must be called from within a Tokio runtime; the persistence
    /// recorder spawns its background task here.
    ///
    /// # Errors
    ///
    /// Returns an error if store or relay construction fails
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let store: Arc<dyn VoiceStore> = match &config.store {
            Some(store_config) => Arc::new(HttpVoiceStore::new(
                store_config.url.clone(),
                store_config.project_id.clone(),
                store_config.api_key.clone(),
            )?),
            None => {
                tracing::warn!("no store configured, training results will not be persisted");
                Arc::new(NoopVoiceStore)
            }
        };

        let recorder = VoiceRecorder::new(store);
        let relay = Relay::from_config(&config, recorder)?;

        if relay.simulated() {
            tracing::info!("simulation mode active, no GPU worker will be contacted");
        }

        let state = Arc::new(routes::AppState { relay });

        let mut app = Router::new()
            .route("/", axum::routing::get(routes::root_handler))
            .route("/api/train", axum::routing::post(routes::train_handler))
            .route("/api/convert", axum::routing::post(routes::convert_handler))
            .with_state(state);

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
