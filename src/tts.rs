//! Text-to-Speech REST resource.

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::HumeConfig;
use crate::error::Error;
use crate::http::{ByteStream, HttpClient};
use crate::messages::{SnippetChunk, SynthesisRequest, SynthesisResponse};

const TTS_PATH: &str = "/v0/tts";
const TTS_FILE_PATH: &str = "/v0/tts/file";
const TTS_STREAM_FILE_PATH: &str = "/v0/tts/stream/file";
const TTS_STREAM_JSON_PATH: &str = "/v0/tts/stream/json";

/// Client for the synthesis endpoints.
///
/// All calls are stateless and independent; streaming calls deliver chunks
/// inline as they arrive, either to a callback or through a pulled stream.
pub struct TtsClient {
    http: HttpClient,
}

impl TtsClient {
    /// Creates a TTS client with the given configuration.
    pub fn new(config: HumeConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Creates a TTS client against an alternate base URL.
    pub fn with_base_url(config: HumeConfig, base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::with_base_url(config, base_url),
        }
    }

    /// Synthesizes speech, returning generations with base64 audio inline.
    pub async fn synthesize_json(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesisResponse, Error> {
        self.http.post_json(TTS_PATH, request).await
    }

    /// Synthesizes speech into a temporary file holding the complete
    /// decoded audio.
    pub async fn synthesize_file(
        &self,
        request: &SynthesisRequest,
    ) -> Result<NamedTempFile, Error> {
        self.http.post_file(TTS_FILE_PATH, request).await
    }

    /// Streams raw audio bytes, pull style.
    pub async fn stream_file_chunks(
        &self,
        request: &SynthesisRequest,
    ) -> Result<ByteStream, Error> {
        self.http.post_stream(TTS_STREAM_FILE_PATH, request).await
    }

    /// Streams raw audio bytes, invoking the callback once per received
    /// chunk until the body is exhausted.
    pub async fn stream_file<F>(
        &self,
        request: &SynthesisRequest,
        mut chunk_callback: F,
    ) -> Result<(), Error>
    where
        F: FnMut(&[u8]),
    {
        let mut stream = self.stream_file_chunks(request).await?;
        while let Some(chunk) = stream.next_chunk().await {
            chunk_callback(&chunk?);
        }
        Ok(())
    }

    /// Streams structured snippet chunks, pull style.
    pub async fn stream_json_chunks(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SnippetStream, Error> {
        let stream = self.http.post_stream(TTS_STREAM_JSON_PATH, request).await?;
        Ok(SnippetStream {
            inner: stream,
            buffer: Vec::new(),
        })
    }

    /// Streams structured snippet chunks, invoking the callback once per
    /// chunk. Any embedded base64 audio is left for the caller to decode.
    pub async fn stream_json<F>(
        &self,
        request: &SynthesisRequest,
        mut chunk_callback: F,
    ) -> Result<(), Error>
    where
        F: FnMut(SnippetChunk),
    {
        let mut stream = self.stream_json_chunks(request).await?;
        while let Some(chunk) = stream.next_chunk().await {
            chunk_callback(chunk?);
        }
        Ok(())
    }
}

/// Structured chunk stream: one [`SnippetChunk`] per JSON line of the
/// response body, independent of how the bytes were framed on the wire.
pub struct SnippetStream {
    inner: ByteStream,
    buffer: Vec<u8>,
}

impl SnippetStream {
    /// Next snippet chunk, or `None` once the stream is exhausted.
    pub async fn next_chunk(&mut self) -> Option<Result<SnippetChunk, Error>> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.buffer.drain(..=pos).collect();
                if line.iter().all(|b| b.is_ascii_whitespace()) {
                    continue;
                }
                debug!(len = line.len(), "Snippet line received");
                return Some(serde_json::from_slice(&line).map_err(Error::from));
            }
            match self.inner.next_chunk().await {
                Some(Ok(bytes)) => self.buffer.extend_from_slice(&bytes),
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    // Final line may arrive without a trailing newline.
                    if self.buffer.iter().all(|b| b.is_ascii_whitespace()) {
                        return None;
                    }
                    let line = std::mem::take(&mut self.buffer);
                    return Some(serde_json::from_slice(&line).map_err(Error::from));
                }
            }
        }
    }
}
