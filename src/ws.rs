//! WebSocket connection wrapper shared by the streaming sessions.

use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::error::Error;

const CONN_TIMEOUT: Duration = Duration::from_secs(10);

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Lifecycle of a streaming session. Closed is terminal.
pub(crate) enum SessionState {
    Unconnected,
    Connected(Arc<WebSocket>),
    Closed,
}

/// WebSocket connection wrapper.
///
/// Owns the underlying socket exclusively; sessions never share one.
pub(crate) struct WebSocket {
    write: Mutex<futures_util::stream::SplitSink<WsStream, Message>>,
    read: Mutex<futures_util::stream::SplitStream<WsStream>>,
}

impl WebSocket {
    /// Opens a connection to the given URL, supplying the API key as the
    /// `apiKey` query parameter per the platform's WebSocket auth contract.
    pub async fn connect(url: &str, api_key: &str) -> Result<Self, Error> {
        info!(url = %url, "WebSocket connecting");

        let request = authenticated_url(url, api_key);

        let (ws_stream, _) = timeout(CONN_TIMEOUT, tokio_tungstenite::connect_async(request.as_str()))
            .await
            .map_err(|_| Error::ConnectionTimeout)?
            .map_err(Error::WebSocket)?;

        info!("WebSocket connected");

        let (write, read) = ws_stream.split();

        Ok(Self {
            write: Mutex::new(write),
            read: Mutex::new(read),
        })
    }

    /// Sends a text message.
    pub async fn send_text(&self, text: &str) -> Result<(), Error> {
        let mut writer = self.write.lock().await;
        writer
            .send(Message::Text(text.to_string()))
            .await
            .map_err(Error::WebSocket)
    }

    /// Receives the next message, blocking until one arrives.
    ///
    /// The client enforces no read timeout; an idle-but-open connection
    /// stays pending until the server sends or closes.
    pub async fn recv(&self) -> Result<Message, Error> {
        let mut reader = self.read.lock().await;
        match reader.next().await {
            Some(Ok(msg)) => Ok(msg),
            Some(Err(e)) => Err(Error::WebSocket(e)),
            None => Err(Error::ConnectionLost),
        }
    }

    /// Closes the WebSocket connection.
    pub async fn close(&self) -> Result<(), Error> {
        debug!("WebSocket closing");
        let mut writer = self.write.lock().await;
        let _ = writer.send(Message::Close(None)).await;
        let _ = writer.close().await;
        info!("WebSocket closed");
        Ok(())
    }
}

/// Appends the `apiKey` query parameter, inserting the root path when the
/// URL has none so the upgrade request line carries a valid URI.
fn authenticated_url(url: &str, api_key: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };
    let after_scheme = base.find("://").map(|i| i + 3).unwrap_or(0);
    let mut out = base.to_string();
    if !base[after_scheme..].contains('/') {
        out.push('/');
    }
    out.push('?');
    if let Some(query) = query {
        out.push_str(query);
        out.push('&');
    }
    out.push_str("apiKey=");
    out.push_str(api_key);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_url_inserts_root_path_for_bare_authority() {
        assert_eq!(
            authenticated_url("ws://127.0.0.1:9000", "k"),
            "ws://127.0.0.1:9000/?apiKey=k"
        );
    }

    #[test]
    fn test_authenticated_url_keeps_existing_path() {
        assert_eq!(
            authenticated_url("wss://api.hume.ai/v0/evi/chat", "k"),
            "wss://api.hume.ai/v0/evi/chat?apiKey=k"
        );
    }

    #[test]
    fn test_authenticated_url_appends_to_existing_query() {
        assert_eq!(
            authenticated_url("wss://api.hume.ai/v0/evi/chat?chat_id=c1", "k"),
            "wss://api.hume.ai/v0/evi/chat?chat_id=c1&apiKey=k"
        );
    }
}
