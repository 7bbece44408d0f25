//! Error types for the Hume client library.

use thiserror::Error;

/// Error type for Hume client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket connection error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The API rejected a REST request with a non-success status.
    ///
    /// Carries the exact status code and response body received. Expected
    /// for bad input or auth failure; the client never retries.
    #[error("API error: status {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The server sent an error frame over a WebSocket session.
    #[error("Server error: {message}")]
    Server {
        /// Error message from server.
        message: String,
    },

    /// Operation attempted before the session was connected.
    #[error("Session not connected")]
    NotConnected,

    /// Operation attempted after the session was closed.
    #[error("Session closed")]
    Closed,

    /// Connection timeout.
    #[error("Connection timeout")]
    ConnectionTimeout,

    /// The connection ended without a close frame.
    #[error("Connection lost")]
    ConnectionLost,

    /// Invalid UTF-8 in a text frame.
    #[error("Invalid UTF-8 in message")]
    InvalidUtf8,
}
