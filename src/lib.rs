//! Rust client library for the Hume AI voice platform: TTS REST endpoints,
//! low-latency TTS input streaming, and the bidirectional Empathic Voice
//! Interface (EVI) chat.
//!
//! # Example
//!
//! ```no_run
//! use hume_client::{HumeConfig, SynthesisRequest, TtsClient, Utterance, VoiceSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hume_client::Error> {
//!     let config = HumeConfig::from_env();
//!     let tts = TtsClient::new(config);
//!
//!     let request = SynthesisRequest::new(vec![
//!         Utterance::new("Hello, world!").with_voice(VoiceSpec::new("Kora")),
//!     ]);
//!
//!     // Buffered: one response with base64 audio inline.
//!     let response = tts.synthesize_json(&request).await?;
//!     for generation in &response.generations {
//!         println!("generation {}: {} bytes of base64", generation.generation_id, generation.audio.len());
//!     }
//!
//!     // Streamed: raw audio chunks as they arrive.
//!     tts.stream_file(&request, |chunk| {
//!         println!("chunk: {} bytes", chunk.len());
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod evi;
mod http;
mod messages;
mod tts;
mod tts_stream;
mod voices;
mod ws;

pub use config::{HumeConfig, API_KEY_ENV};
pub use error::Error;
pub use evi::{EviChatClient, EviEvent};
pub use http::{ByteStream, HttpClient, API_BASE_URL};
pub use messages::*;
pub use tts::{SnippetStream, TtsClient};
pub use tts_stream::{TtsStreamClient, TtsStreamEvent};
pub use voices::VoicesClient;

/// TTS input streaming WebSocket endpoint.
pub const TTS_STREAM_ENDPOINT: &str = "wss://api.hume.ai/v0/tts/stream/input";

/// EVI chat WebSocket endpoint.
pub const EVI_CHAT_ENDPOINT: &str = "wss://api.hume.ai/v0/evi/chat";

/// Default voice name.
pub const DEFAULT_VOICE: &str = "Kora";
