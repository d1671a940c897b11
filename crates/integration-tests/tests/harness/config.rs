//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use voxgate_config::{Config, HealthConfig, ServerConfig, SimulationConfig, StoreConfig, UpstreamConfig};

/// Builder for constructing test configurations
///
/// Simulation delays default to a few milliseconds so simulated runs
/// stay measurable without slowing the suite down.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                upstream: None,
                simulation: SimulationConfig {
                    train_delay: "30ms".to_owned(),
                    convert_delay: "10ms".to_owned(),
                },
                store: None,
            },
        }
    }

    /// Point the relay at a mock GPU worker
    pub fn with_upstream(mut self, base_url: &str) -> Self {
        self.config.upstream = Some(UpstreamConfig {
            base_url: Some(base_url.parse().expect("valid URL")),
            ..UpstreamConfig::default()
        });
        self
    }

    /// Force simulation even though an upstream is configured
    pub fn with_simulate_override(mut self) -> Self {
        self.config
            .upstream
            .get_or_insert_with(UpstreamConfig::default)
            .simulate = true;
        self
    }

    /// Point persistence at a mock document store
    pub fn with_store(mut self, base_url: &str) -> Self {
        self.config.store = Some(StoreConfig {
            url: base_url.parse().expect("valid URL"),
            project_id: "test-project".to_owned(),
            api_key: SecretString::from("test-key"),
        });
        self
    }

    /// Override the simulated training delay
    pub fn with_train_delay(mut self, delay: &str) -> Self {
        self.config.simulation.train_delay = delay.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
