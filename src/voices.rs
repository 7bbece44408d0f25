//! Voice management resource.

use tracing::{debug, info};

use crate::config::HumeConfig;
use crate::error::Error;
use crate::http::HttpClient;
use crate::messages::{CreateVoiceRequest, Voice, VoiceListResponse, VoiceProvider};

const VOICES_PATH: &str = "/v0/tts/voices";

/// Client for the voice management endpoints.
pub struct VoicesClient {
    http: HttpClient,
}

impl VoicesClient {
    /// Creates a voices client with the given configuration.
    pub fn new(config: HumeConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Creates a voices client against an alternate base URL.
    pub fn with_base_url(config: HumeConfig, base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::with_base_url(config, base_url),
        }
    }

    /// Lists voices from the shared library or the caller's saved custom
    /// voices, depending on `provider`.
    pub async fn list(&self, provider: VoiceProvider) -> Result<Vec<Voice>, Error> {
        debug!(provider = provider.as_str(), "Listing voices");
        let response: VoiceListResponse = self
            .http
            .get_json(VOICES_PATH, &[("provider", provider.as_str())])
            .await?;
        Ok(response.voices_page)
    }

    /// Saves a new custom voice from a prior generation.
    pub async fn create(&self, generation_id: &str, name: &str) -> Result<Voice, Error> {
        info!(name = %name, "Creating custom voice");
        self.http
            .post_json(VOICES_PATH, &CreateVoiceRequest::new(generation_id, name))
            .await
    }

    /// Deletes a previously saved custom voice by name. Semantics for an
    /// unknown name are whatever the remote API returns.
    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        info!(name = %name, "Deleting custom voice");
        self.http.delete(VOICES_PATH, &[("name", name)]).await
    }
}
