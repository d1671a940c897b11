use serde::Deserialize;
use url::Url;

/// Remote GPU worker configuration
///
/// Leaving the section out entirely, or omitting `base_url`, puts the
/// relay in simulation mode for the lifetime of the process.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL of the worker; `/train` and `/convert` are appended
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Force simulation even when a base URL is configured
    #[serde(default)]
    pub simulate: bool,
    /// Per-request timeout for training relays (e.g. "10m").
    /// Training is slow; give the worker minutes, not seconds.
    #[serde(default = "default_train_timeout")]
    pub train_timeout: String,
    /// Per-request timeout for conversion relays (e.g. "2m")
    #[serde(default = "default_convert_timeout")]
    pub convert_timeout: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            simulate: false,
            train_timeout: default_train_timeout(),
            convert_timeout: default_convert_timeout(),
        }
    }
}

fn default_train_timeout() -> String {
    "10m".to_string()
}

fn default_convert_timeout() -> String {
    "2m".to_string()
}
