//! Authenticated HTTP transport for the Hume REST API.

use std::io::Write;
use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, error};

use crate::config::HumeConfig;
use crate::error::Error;

/// Base URL for the Hume REST API.
pub const API_BASE_URL: &str = "https://api.hume.ai";

/// Issues authenticated REST requests.
///
/// Three response modes: buffered JSON, buffered binary into a temporary
/// file, and a chunked byte stream. Every non-success status becomes
/// [`Error::Api`] carrying the exact status and body; no retries.
pub struct HttpClient {
    client: Client,
    config: HumeConfig,
    base_url: String,
}

impl HttpClient {
    /// Creates a transport against the production API.
    pub fn new(config: HumeConfig) -> Self {
        Self::with_base_url(config, API_BASE_URL)
    }

    /// Creates a transport against an alternate base URL.
    pub fn with_base_url(config: HumeConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: base_url.into(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "API request");
        self.client
            .request(method, url)
            .header("X-Hume-Api-Key", self.config.api_key_or_empty())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, Error> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "API request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// GET returning parsed JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Ok(response.json().await?)
    }

    /// POST with a JSON body, returning parsed JSON.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(response.json().await?)
    }

    /// DELETE with query parameters.
    pub async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<(), Error> {
        self.send(self.request(Method::DELETE, path).query(query))
            .await?;
        Ok(())
    }

    /// POST with a JSON body, buffering the full binary response into a
    /// temporary file.
    pub async fn post_file<B>(&self, path: &str, body: &B) -> Result<NamedTempFile, Error>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        let mut file = NamedTempFile::new()?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?)?;
        }
        file.flush()?;
        Ok(file)
    }

    /// POST with a JSON body, returning the chunked response byte stream.
    pub async fn post_stream<B>(&self, path: &str, body: &B) -> Result<ByteStream, Error>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(ByteStream {
            inner: Box::pin(response.bytes_stream()),
        })
    }
}

/// Lazy, finite, non-restartable stream of response body chunks.
///
/// Dropping the stream cancels the underlying request.
pub struct ByteStream {
    inner: Pin<Box<dyn Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send>>,
}

impl ByteStream {
    /// Next chunk of the body, or `None` once the stream is exhausted.
    pub async fn next_chunk(&mut self) -> Option<Result<bytes::Bytes, Error>> {
        self.inner.next().await.map(|r| r.map_err(Error::from))
    }
}
