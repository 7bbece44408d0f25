//! Client configuration.

/// Environment variable consulted by [`HumeConfig::from_env`].
pub const API_KEY_ENV: &str = "HUME_API_KEY";

/// Credentials for the Hume API.
///
/// Constructed once by the caller and passed to each client. The API key is
/// not validated locally; a missing or wrong key surfaces as an
/// authentication failure from the service itself.
#[derive(Debug, Clone, Default)]
pub struct HumeConfig {
    /// API key sent with every request.
    pub api_key: Option<String>,
    /// Secret key. Carried alongside the API key but not consumed by any
    /// current endpoint; every call authenticates with the API key alone.
    pub secret_key: Option<String>,
}

impl HumeConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            secret_key: None,
        }
    }

    /// Falls back to the `HUME_API_KEY` environment variable.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            secret_key: None,
        }
    }

    /// Sets the secret key.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    // An absent key is sent as an empty credential and rejected server-side.
    pub(crate) fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}
