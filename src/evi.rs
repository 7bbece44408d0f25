//! Bidirectional Empathic Voice Interface (EVI) chat session.

use base64::Engine;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info};

use crate::config::HumeConfig;
use crate::error::Error;
use crate::messages::{EviAudioInput, EviUserInput, GenericMessage};
use crate::ws::{SessionState, WebSocket};
use crate::EVI_CHAT_ENDPOINT;

/// Events emitted by an EVI chat session.
///
/// Payloads are delivered as received, tagged by the remote protocol's
/// `type` field; the client does not interpret their contents.
#[derive(Debug, Clone)]
pub enum EviEvent {
    /// Echo of a user text or transcribed audio message.
    UserMessage(serde_json::Value),
    /// Assistant text message.
    AssistantMessage(serde_json::Value),
    /// Assistant finished its turn.
    AssistantEnd(serde_json::Value),
    /// Base64 audio segment of the assistant's reply.
    AudioOutput(serde_json::Value),
    /// Session metadata sent after connect.
    ChatMetadata(serde_json::Value),
    /// The user interrupted the assistant.
    UserInterruption(serde_json::Value),
    /// Event type this client does not know, delivered verbatim.
    Other {
        /// The remote protocol's type tag.
        kind: String,
        /// Raw event payload.
        payload: serde_json::Value,
    },
    /// Server closed the connection.
    Close,

    Ping,
    Pong,
}

/// WebSocket session for bidirectional voice chat.
///
/// Same lifecycle as the TTS input stream: unconnected -> connected ->
/// closed, with closed terminal.
pub struct EviChatClient {
    config: HumeConfig,
    endpoint: String,
    conn: RwLock<SessionState>,
    session_id: String,
}

impl EviChatClient {
    /// Creates an unconnected chat session with the given configuration.
    pub fn new(config: HumeConfig) -> Self {
        Self::with_endpoint(config, EVI_CHAT_ENDPOINT)
    }

    /// Creates an unconnected chat session against an alternate endpoint.
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
        info!(session_id = %self.session_id, endpoint = %self.endpoint, "EVI chat connecting");
        let conn = WebSocket::connect(&self.endpoint, self.config.api_key_or_empty()).await?;
        *state = SessionState::Connected(Arc::new(conn));
        info!(session_id = %self.session_id, "EVI chat connected");
        Ok(())
    }

    async fn conn(&self) -> Result<Arc<WebSocket>, Error> {
        match &*self.conn.read().await {
            SessionState::Connected(conn) => Ok(Arc::clone(conn)),
            SessionState::Unconnected => Err(Error::NotConnected),
            SessionState::Closed => Err(Error::Closed),
        }
    }

    /// Transmits a text message frame.
    pub async fn send_user_input(&self, text: &str) -> Result<(), Error> {
        let json = serde_json::to_string(&EviUserInput::new(text))?;
        debug!(json = %json, "Sending EVI user input");
        self.conn().await?.send_text(&json).await
    }

    /// Transmits an audio message frame with a pre-encoded base64 payload.
    pub async fn send_audio_input(&self, data: &str) -> Result<(), Error> {
        debug!(data_len = data.len(), "Sending EVI audio input");
        let json = serde_json::to_string(&EviAudioInput::new(data))?;
        self.conn().await?.send_text(&json).await
    }

    /// Reads the file fully, base64-encodes it and transmits it as an
    /// audio message frame. Purely a local composition over
    /// [`send_audio_input`](Self::send_audio_input).
    pub async fn send_audio_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        self.send_audio_input(&encoded).await
    }

    /// Receives the next event, in arrival order.
    pub async fn next_event(&self) -> Result<EviEvent, Error> {
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
            Message::Ping(_) => Ok(EviEvent::Ping),
            Message::Pong(_) => Ok(EviEvent::Pong),
            Message::Close(frame) => {
                debug!(frame = ?frame, "EVI chat received close");
                Ok(EviEvent::Close)
            }
            Message::Frame(_) => Err(Error::ConnectionLost),
        }
    }

    /// Drives the session until the connection ends, pushing each event to
    /// `on_event` and each recoverable error to `on_error`, in arrival
    /// order. Callbacks run inline; a slow callback delays later frames.
    pub async fn run<C, E>(&self, mut on_event: C, mut on_error: E) -> Result<(), Error>
    where
        C: FnMut(EviEvent),
        E: FnMut(Error),
    {
        loop {
            match self.next_event().await {
                Ok(EviEvent::Close) => return Ok(()),
                Ok(event) => on_event(event),
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

    /// Releases the socket. Idempotent; sends after close fail with
    /// [`Error::Closed`].
    pub async fn close(&self) -> Result<(), Error> {
        let mut state = self.conn.write().await;
        if let SessionState::Connected(conn) = &*state {
            let _ = conn.close().await;
        }
        *state = SessionState::Closed;
        info!(session_id = %self.session_id, "EVI chat closed");
        Ok(())
    }
}

fn parse_frame(text: &str) -> Result<EviEvent, Error> {
    let generic: GenericMessage = serde_json::from_str(text)?;
    let payload: serde_json::Value = serde_json::from_str(text)?;
    debug!(msg_type = %generic.msg_type, "EVI event received");
    match generic.msg_type.as_str() {
        "user_message" => Ok(EviEvent::UserMessage(payload)),
        "assistant_message" => Ok(EviEvent::AssistantMessage(payload)),
        "assistant_end" => Ok(EviEvent::AssistantEnd(payload)),
        "audio_output" => Ok(EviEvent::AudioOutput(payload)),
        "chat_metadata" => Ok(EviEvent::ChatMetadata(payload)),
        "user_interruption" => Ok(EviEvent::UserInterruption(payload)),
        "error" => {
            let message = payload
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(text)
                .to_string();
            error!(message = %message, "EVI server error");
            Err(Error::Server { message })
        }
        other => Ok(EviEvent::Other {
            kind: other.to_string(),
            payload,
        }),
    }
}
