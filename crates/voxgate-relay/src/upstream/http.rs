use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;
use voxgate_config::UpstreamConfig;

use super::{Upstream, parse_duration};
use crate::{
    error::{RelayError, Result},
    http_client::http_client,
    types::{ConvertRequest, TrainRequest},
};

/// Live voice worker reached over HTTP
///
/// Requests are forwarded verbatim as JSON to `{base_url}/train` and
/// `{base_url}/convert` and awaited to completion. Training gets a much
/// longer timeout than conversion.
pub struct HttpUpstream {
    client: Client,
    base_url: Url,
    train_timeout: Duration,
    convert_timeout: Duration,
}

impl HttpUpstream {
    pub fn new(base_url: Url, train_timeout: Duration, convert_timeout: Duration) -> Self {
        Self {
            client: http_client(),
            base_url,
            train_timeout,
            convert_timeout,
        }
    }

    /// Build from the upstream configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or a timeout string
    /// does not parse
    pub fn from_config(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("upstream.base_url is required for live relaying"))?;
        let train_timeout = parse_duration("upstream.train_timeout", &config.train_timeout)?;
        let convert_timeout = parse_duration("upstream.convert_timeout", &config.convert_timeout)?;

        Ok(Self::new(base_url, train_timeout, convert_timeout))
    }

    async fn dispatch<T: Serialize + Sync>(&self, route: &str, timeout: Duration, payload: &T) -> Result<Value> {
        let url = format!("{}/{route}", self.base_url.as_str().trim_end_matches('/'));

        tracing::debug!("forwarding {route} request to {url}");

        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("worker request to {url} failed: {e}");
                RelayError::UpstreamUnreachable(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(RelayError::UpstreamUnreachable)?;

        if status.is_success() {
            Ok(json_or_string(&body))
        } else {
            tracing::error!("worker error ({status}): {body}");
            Err(RelayError::UpstreamError {
                status: status.as_u16(),
                detail: json_or_string(&body),
            })
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn train(&self, request: &TrainRequest) -> Result<Value> {
        self.dispatch("train", self.train_timeout, request).await
    }

    async fn convert(&self, request: &ConvertRequest) -> Result<Value> {
        self.dispatch("convert", self.convert_timeout, request).await
    }

    fn simulated(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for HttpUpstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUpstream")
            .field("base_url", &self.base_url)
            .field("train_timeout", &self.train_timeout)
            .field("convert_timeout", &self.convert_timeout)
            .finish_non_exhaustive()
    }
}

/// Parse a worker body as JSON, falling back to a plain string value
fn json_or_string(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}
