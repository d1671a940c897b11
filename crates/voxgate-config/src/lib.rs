#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod server;
pub mod simulation;
pub mod store;
pub mod upstream;

use serde::Deserialize;

pub use health::*;
pub use server::*;
pub use simulation::*;
pub use store::*;
pub use upstream::*;

/// Top-level voxgate configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote GPU worker configuration; absent means simulation mode
    #[serde(default)]
    pub upstream: Option<UpstreamConfig>,
    /// Simulated-backend latency configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Document-store credentials; absent disables persistence
    #[serde(default)]
    pub store: Option<StoreConfig>,
}

impl Config {
    /// Whether requests will be simulated instead of relayed
    ///
    /// Simulation is active when no upstream base URL is configured or
    /// when the upstream section sets the explicit `simulate` override.
    /// The answer is fixed for the process lifetime.
    pub fn simulation_active(&self) -> bool {
        self.upstream
            .as_ref()
            .is_none_or(|upstream| upstream.simulate || upstream.base_url.is_none())
    }
}
