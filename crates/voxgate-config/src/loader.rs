use std::{net::SocketAddr, path::Path};

use secrecy::ExposeSecret;
use url::Url;

use crate::{Config, StoreConfig, UpstreamConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Build configuration from plain environment variables
    ///
    /// Fallback for deployments that run without a config file.
    /// Recognizes `VOXGATE_UPSTREAM_URL`, `VOXGATE_SIMULATE`, the
    /// `VOXGATE_STORE_URL` / `VOXGATE_STORE_PROJECT` /
    /// `VOXGATE_STORE_API_KEY` triplet, and `PORT`. A partial store
    /// triplet disables persistence with a warning rather than failing
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized variable holds an unparseable
    /// value, or validation fails
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = read_env("VOXGATE_UPSTREAM_URL") {
            let base_url = raw
                .parse::<Url>()
                .map_err(|e| anyhow::anyhow!("invalid VOXGATE_UPSTREAM_URL '{raw}': {e}"))?;
            config.upstream = Some(UpstreamConfig {
                base_url: Some(base_url),
                ..UpstreamConfig::default()
            });
        }

        if env_flag("VOXGATE_SIMULATE") {
            config.upstream.get_or_insert_with(UpstreamConfig::default).simulate = true;
        }

        let url = read_env("VOXGATE_STORE_URL");
        let project_id = read_env("VOXGATE_STORE_PROJECT");
        let api_key = read_env("VOXGATE_STORE_API_KEY");

        match (url, project_id, api_key) {
            (Some(url), Some(project_id), Some(api_key)) => {
                let url = url
                    .parse::<Url>()
                    .map_err(|e| anyhow::anyhow!("invalid VOXGATE_STORE_URL '{url}': {e}"))?;
                config.store = Some(StoreConfig {
                    url,
                    project_id,
                    api_key: api_key.into(),
                });
            }
            (None, None, None) => {}
            _ => {
                tracing::warn!(
                    "incomplete store configuration: set all of VOXGATE_STORE_URL, VOXGATE_STORE_PROJECT, and VOXGATE_STORE_API_KEY; persistence disabled"
                );
            }
        }

        if let Some(raw) = read_env("PORT") {
            let port: u16 = raw.parse().map_err(|e| anyhow::anyhow!("invalid PORT '{raw}': {e}"))?;
            config.server.listen_address = Some(SocketAddr::from(([0, 0, 0, 0], port)));
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a duration string does not parse or the store
    /// section is incomplete
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_upstream()?;
        self.validate_simulation()?;
        self.validate_store()?;
        Ok(())
    }

    /// Check upstream timeouts parse as durations
    fn validate_upstream(&self) -> anyhow::Result<()> {
        let Some(ref upstream) = self.upstream else {
            return Ok(());
        };

        check_duration("upstream.train_timeout", &upstream.train_timeout)?;
        check_duration("upstream.convert_timeout", &upstream.convert_timeout)?;
        Ok(())
    }

    /// Check simulated delays parse as durations
    fn validate_simulation(&self) -> anyhow::Result<()> {
        check_duration("simulation.train_delay", &self.simulation.train_delay)?;
        check_duration("simulation.convert_delay", &self.simulation.convert_delay)?;
        Ok(())
    }

    /// Validate store configuration when persistence is enabled
    fn validate_store(&self) -> anyhow::Result<()> {
        let Some(ref store) = self.store else {
            return Ok(());
        };

        if store.project_id.is_empty() {
            anyhow::bail!("store.project_id must not be empty");
        }

        if store.api_key.expose_secret().is_empty() {
            anyhow::bail!("store.api_key must not be empty");
        }

        Ok(())
    }
}

fn check_duration(field: &str, value: &str) -> anyhow::Result<()> {
    duration_str::parse(value).map_err(|e| anyhow::anyhow!("invalid duration '{value}' for {field}: {e}"))?;
    Ok(())
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| {
        let value = value.trim();
        value == "1" || value.eq_ignore_ascii_case("true")
    })
}
