//! Low-latency TTS input streaming over WebSocket.

use tokio::sync::RwLock;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info};

use crate::config::HumeConfig;
use crate::error::Error;
use crate::messages::{SnippetChunk, TtsStreamClose, TtsStreamFlush, TtsStreamInput, VoiceSpec};
use crate::ws::{SessionState, WebSocket};
use crate::TTS_STREAM_ENDPOINT;

/// Events emitted by a TTS input stream session.
#[derive(Debug, Clone)]
pub enum TtsStreamEvent {
    /// Audio chunk for the current generation.
    Chunk(SnippetChunk),
    /// Server closed the connection.
    Close,

    Ping,
    Pong,
}

/// WebSocket session for incremental text input with streamed audio output.
///
/// Lifecycle is unconnected -> connected -> closed; closed is terminal and
/// further sends fail. The session owns its socket exclusively.
pub struct TtsStreamClient {
    config: HumeConfig,
    endpoint: String,
    conn: RwLock<SessionState>,
    session_id: String,
}

impl TtsStreamClient {
    /// Creates an unconnected session with the given configuration.
    pub fn new(config: HumeConfig) -> Self {
        Self::with_endpoint(config, TTS_STREAM_ENDPOINT)
    }

    /// Creates an unconnected session against an alternate endpoint.
    pub fn with_endpoint(config: HumeConfig, endpoint: impl Into<String>) -> Self {
        Self {
            config,
            endpoint: endpoint.into(),
            conn: RwLock::new(SessionState::Unconnected),
            session_id: uuid::Uuid::new_v4().to_string()[..8].to_string(),
        }
    }

    /// Opens the WebSocket connection. A no-op when already connected;
    /// fails with [`Error::Closed`] once the session has been closed.
    pub async fn connect(&self) -> Result<(), Error> {
        let mut state = self.conn.write().await;
        match &*state {
            SessionState::Connected(_) => return Ok(()),
            SessionState::Closed => return Err(Error::Closed),
            SessionState::Unconnected => {}
        }
        info!(session_id = %self.session_id, endpoint = %self.endpoint, "TTS stream connecting");
        let conn = WebSocket::connect(&self.endpoint, self.config.api_key_or_empty()).await?;
        *state = SessionState::Connected(std::sync::Arc::new(conn));
        info!(session_id = %self.session_id, "TTS stream connected");
        Ok(())
    }

    async fn conn(&self) -> Result<std::sync::Arc<WebSocket>, Error> {
        match &*self.conn.read().await {
            SessionState::Connected(conn) => Ok(std::sync::Arc::clone(conn)),
            SessionState::Unconnected => Err(Error::NotConnected),
            SessionState::Closed => Err(Error::Closed),
        }
    }

    /// Sends one input frame. May be called repeatedly to stream text
    /// incrementally; the server buffers input until a flush.
    pub async fn send_input(&self, text: &str, voice: Option<VoiceSpec>) -> Result<(), Error> {
        let mut frame = TtsStreamInput::new(text);
        if let Some(voice) = voice {
            frame = frame.with_voice(voice);
        }
        let json = serde_json::to_string(&frame)?;
        debug!(json = %json, "Sending TTS input");
        self.conn().await?.send_text(&json).await
    }

    /// Asks the server to finalize generation for all buffered input.
    pub async fn flush(&self) -> Result<(), Error> {
        debug!(session_id = %self.session_id, "Sending TTS flush");
        let json = serde_json::to_string(&TtsStreamFlush::new())?;
        self.conn().await?.send_text(&json).await
    }

    /// Receives the next event, in arrival order.
    ///
    /// Server error frames surface as [`Error::Server`]; transport errors
    /// as their respective variants. Neither tears down the session object;
    /// callers decide when to [`close`](Self::close).
    pub async fn next_event(&self) -> Result<TtsStreamEvent, Error> {
        let conn = self.conn().await?;
        match conn.recv().await? {
            Message::Text(text) => parse_frame(&text),
            Message::Binary(bytes) => match String::from_utf8(bytes) {
                Ok(text) => parse_frame(&text),
                Err(e) => {
                    error!(error = %e, "Invalid UTF-8 in binary message");
                    Err(Error::InvalidUtf8)
                }
            },
            Message::Ping(_) => Ok(TtsStreamEvent::Ping),
            Message::Pong(_) => Ok(TtsStreamEvent::Pong),
            Message::Close(frame) => {
                debug!(frame = ?frame, "TTS stream received close");
                Ok(TtsStreamEvent::Close)
            }
            Message::Frame(_) => Err(Error::ConnectionLost),
        }
    }

    /// Drives the session until the generation completes or the connection
    /// ends, pushing each audio chunk to `on_chunk` and each recoverable
    /// error to `on_error`, in arrival order.
    pub async fn run<C, E>(&self, mut on_chunk: C, mut on_error: E) -> Result<(), Error>
    where
        C: FnMut(SnippetChunk),
        E: FnMut(Error),
    {
        loop {
            match self.next_event().await {
                Ok(TtsStreamEvent::Chunk(chunk)) => {
                    let last = chunk.is_last_chunk;
                    on_chunk(chunk);
                    if last {
                        return Ok(());
                    }
                }
                Ok(TtsStreamEvent::Close) => return Ok(()),
                Ok(_) => {}
                Err(e @ (Error::NotConnected | Error::Closed)) => return Err(e),
                Err(e @ (Error::Json(_) | Error::Server { .. })) => on_error(e),
                Err(e) => {
                    // Transport failure; the stream cannot continue.
                    on_error(e);
                    return Ok(());
                }
            }
        }
    }

    /// Sends the close frame and releases the socket. Idempotent; closing
    /// an unconnected session just makes the closed state permanent.
    pub async fn close(&self) -> Result<(), Error> {
        let mut state = self.conn.write().await;
        if let SessionState::Connected(conn) = &*state {
            let json = serde_json::to_string(&TtsStreamClose::new())?;
            let _ = conn.send_text(&json).await;
            let _ = conn.close().await;
        }
        *state = SessionState::Closed;
        info!(session_id = %self.session_id, "TTS stream closed");
        Ok(())
    }
}

fn parse_frame(text: &str) -> Result<TtsStreamEvent, Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let is_error = value.get("type").and_then(|t| t.as_str()) == Some("error")
        || value.get("error").is_some();
    if is_error {
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or(text)
            .to_string();
        error!(message = %message, "TTS stream server error");
        return Err(Error::Server { message });
    }
    let chunk: SnippetChunk = serde_json::from_value(value)?;
    debug!(
        audio_len = chunk.audio.as_deref().map(str::len).unwrap_or(0),
        is_last = chunk.is_last_chunk,
        "TTS audio chunk received"
    );
    Ok(TtsStreamEvent::Chunk(chunk))
}
