use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::StoreError;
use crate::record::VoiceRecord;
use crate::store::VoiceStore;

/// Async HTTP client for the voice document store
#[derive(Clone)]
pub struct HttpVoiceStore {
    http: reqwest::Client,
    base_url: Url,
    project_id: String,
    api_key: SecretString,
}

impl HttpVoiceStore {
    /// Create a new store client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: Url, project_id: String, api_key: SecretString) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder().build().map_err(StoreError::Request)?;

        Ok(Self {
            http,
            base_url,
            project_id,
            api_key,
        })
    }

    /// Document URL for one voice
    ///
    /// Voices nest under their owner so a user's collection can be listed
    /// with a single prefix query.
    fn document_url(&self, user_id: &str, voice: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(&format!(
                "v1/projects/{}/exp_dir/{user_id}/voices/{voice}",
                self.project_id
            ))
            .map_err(|e| StoreError::Api {
                status: 0,
                message: format!("invalid URL: {e}"),
            })
    }
}

#[async_trait]
impl VoiceStore for HttpVoiceStore {
    /// PATCH `/v1/projects/:projectId/exp_dir/:userId/voices/:voice?merge=true`
    async fn upsert(&self, record: &VoiceRecord) -> Result<(), StoreError> {
        let url = self.document_url(&record.user_id, &record.exp_dir)?;

        let response = self
            .http
            .patch(url)
            .header("x-api-key", self.api_key.expose_secret())
            .query(&[("merge", "true")])
            .json(record)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Api { status, message })
        }
    }
}

impl std::fmt::Debug for HttpVoiceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpVoiceStore")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}
