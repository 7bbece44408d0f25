//! Wire types for the Hume REST endpoints and WebSocket protocols.

use serde::{Deserialize, Serialize};

// ============================================================================
// Common
// ============================================================================

/// Generic message with just a type field, used for initial frame dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericMessage {
    /// The message type.
    #[serde(rename = "type")]
    pub msg_type: String,
}

/// Voice library selector: the shared Hume library or the caller's saved
/// custom voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceProvider {
    /// Shared voice library.
    #[serde(rename = "HUME_AI")]
    HumeAi,
    /// Voices saved by the caller's account.
    #[serde(rename = "CUSTOM_VOICE")]
    CustomVoice,
}

impl VoiceProvider {
    /// Returns the API string representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HumeAi => "HUME_AI",
            Self::CustomVoice => "CUSTOM_VOICE",
        }
    }
}

/// Voice selection embedded in an utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSpec {
    /// Voice name (e.g. "Kora").
    pub name: String,
    /// Library the voice belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<VoiceProvider>,
}

impl VoiceSpec {
    /// Creates a voice selection by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider: None,
        }
    }

    /// Sets the voice library.
    pub fn with_provider(mut self, provider: VoiceProvider) -> Self {
        self.provider = Some(provider);
        self
    }
}

// ============================================================================
// Synthesis request
// ============================================================================

/// One unit of text plus voice selection submitted for synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    /// Text to synthesize.
    pub text: String,
    /// Voice selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceSpec>,
    /// Acting instructions for emotion and style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Speaking speed multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    /// Trailing silence in seconds appended after the utterance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_silence: Option<f32>,
}

impl Utterance {
    /// Creates an utterance with just text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            description: None,
            speed: None,
            trailing_silence: None,
        }
    }

    /// Sets the voice selection.
    pub fn with_voice(mut self, voice: VoiceSpec) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Sets the acting instructions.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the speaking speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets the trailing silence.
    pub fn with_trailing_silence(mut self, seconds: f32) -> Self {
        self.trailing_silence = Some(seconds);
        self
    }
}

/// Output format for synthesized audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Format type ("mp3", "wav" or "pcm").
    #[serde(rename = "type")]
    pub format_type: String,
    /// Sample rate in Hz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
}

impl AudioFormat {
    /// Creates a format specification.
    pub fn new(format_type: impl Into<String>) -> Self {
        Self {
            format_type: format_type.into(),
            sample_rate: None,
        }
    }

    /// MP3 output.
    pub fn mp3() -> Self {
        Self::new("mp3")
    }

    /// WAV output.
    pub fn wav() -> Self {
        Self::new("wav")
    }

    /// Raw PCM output at the given sample rate.
    pub fn pcm(sample_rate: u32) -> Self {
        Self {
            format_type: "pcm".to_string(),
            sample_rate: Some(sample_rate),
        }
    }
}

/// Context for voice continuity across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisContext {
    /// Generation to continue from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,
}

/// Request body shared by the synthesis and streaming endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Ordered utterances to synthesize.
    pub utterances: Vec<Utterance>,
    /// Output format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,
    /// Context from a previous generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<SynthesisContext>,
    /// Low-latency mode for the streaming endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_mode: Option<bool>,
    /// Number of audio variations to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_generations: Option<u8>,
}

impl SynthesisRequest {
    /// Creates a request from a list of utterances.
    pub fn new(utterances: Vec<Utterance>) -> Self {
        Self {
            utterances,
            format: None,
            context: None,
            instant_mode: None,
            num_generations: None,
        }
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Continues from a previous generation.
    pub fn with_context(mut self, context: SynthesisContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Enables or disables instant mode.
    pub fn with_instant_mode(mut self, enabled: bool) -> Self {
        self.instant_mode = Some(enabled);
        self
    }

    /// Sets the number of generations.
    pub fn with_num_generations(mut self, num: u8) -> Self {
        self.num_generations = Some(num);
        self
    }
}

// ============================================================================
// Synthesis response
// ============================================================================

/// One synthesis result produced for a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// Generation ID, usable for voice saving and continuation.
    pub generation_id: String,
    /// Base64-encoded audio.
    pub audio: String,
    /// Audio duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Encoded audio size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

/// Response of the buffered JSON synthesis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResponse {
    /// One entry per requested generation.
    pub generations: Vec<Generation>,
    /// Request ID assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Streamed chunk from the JSON streaming endpoint and the TTS input
/// WebSocket: a sub-segment of one generation's audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetChunk {
    /// Generation this snippet belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,
    /// Snippet ID within the generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet_id: Option<String>,
    /// Base64-encoded audio, absent on pure metadata chunks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Format of the audio payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,
    /// True on the final chunk of a generation.
    #[serde(default)]
    pub is_last_chunk: bool,
}

// ============================================================================
// Voices
// ============================================================================

/// Voice record from the voice management endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    /// Voice name.
    pub name: String,
    /// Voice ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Library the voice belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<VoiceProvider>,
}

/// Paged voice list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceListResponse {
    /// Voices on this page.
    #[serde(default)]
    pub voices_page: Vec<Voice>,
}

/// Body of the voice creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoiceRequest {
    /// Generation to save the voice from.
    pub generation_id: String,
    /// Name for the saved voice.
    pub name: String,
}

impl CreateVoiceRequest {
    /// Creates a voice creation body.
    pub fn new(generation_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            generation_id: generation_id.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// TTS input stream frames
// ============================================================================

/// Input frame for the TTS input WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsStreamInput {
    /// Text to buffer for synthesis.
    pub text: String,
    /// Voice selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceSpec>,
}

impl TtsStreamInput {
    /// Creates an input frame.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
        }
    }

    /// Sets the voice selection.
    pub fn with_voice(mut self, voice: VoiceSpec) -> Self {
        self.voice = Some(voice);
        self
    }
}

/// Control frame asking the server to finalize generation for buffered input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsStreamFlush {
    /// Always true.
    pub flush: bool,
}

impl TtsStreamFlush {
    /// Creates a flush frame.
    pub fn new() -> Self {
        Self { flush: true }
    }
}

impl Default for TtsStreamFlush {
    fn default() -> Self {
        Self::new()
    }
}

/// Control frame ending the input stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsStreamClose {
    /// Always true.
    pub close: bool,
}

impl TtsStreamClose {
    /// Creates a close frame.
    pub fn new() -> Self {
        Self { close: true }
    }
}

impl Default for TtsStreamClose {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// EVI frames
// ============================================================================

/// Text message frame for the EVI chat WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EviUserInput {
    /// The message type (always "user_input").
    #[serde(rename = "type")]
    pub msg_type: String,
    /// User text.
    pub text: String,
}

impl EviUserInput {
    /// Creates a user input frame.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            msg_type: "user_input".to_string(),
            text: text.into(),
        }
    }
}

/// Audio message frame for the EVI chat WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EviAudioInput {
    /// The message type (always "audio_input").
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Base64-encoded audio.
    pub data: String,
}

impl EviAudioInput {
    /// Creates an audio input frame with a pre-encoded payload.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            msg_type: "audio_input".to_string(),
            data: data.into(),
        }
    }
}
