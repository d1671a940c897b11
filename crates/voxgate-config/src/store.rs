use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Document store configuration
///
/// Opt-in section that enables persistence of completed training runs.
/// Leaving it out disables persistence; the relay never fails a request
/// over a missing or broken store.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Base URL for the document store REST API
    pub url: Url,
    /// Project the voice documents live under
    pub project_id: String,
    /// API key sent with every store request
    pub api_key: SecretString,
}
