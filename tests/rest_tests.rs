//! REST endpoint tests against a mock HTTP server.

use base64::Engine;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hume_client::{
    AudioFormat, Error, HumeConfig, SynthesisRequest, TtsClient, Utterance, VoiceProvider,
    VoiceSpec, VoicesClient,
};

fn test_config() -> HumeConfig {
    HumeConfig::new("test-key")
}

fn test_request() -> SynthesisRequest {
    SynthesisRequest::new(vec![
        Utterance::new("Hello, world!").with_voice(VoiceSpec::new("Kora"))
    ])
    .with_format(AudioFormat::mp3())
}

#[tokio::test]
async fn test_api_error_carries_status_and_body_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/tts/voices"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1) // exactly one request: no retry
        .mount(&server)
        .await;

    let voices = VoicesClient::with_base_url(test_config(), server.uri());
    let err = voices.list(VoiceProvider::HumeAi).await.unwrap_err();

    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("Expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_surfaces_identically() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/tts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let tts = TtsClient::with_base_url(test_config(), server.uri());
    let err = tts.synthesize_json(&test_request()).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_voices_list_selects_provider_via_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/tts/voices"))
        .and(query_param("provider", "HUME_AI"))
        .and(header("X-Hume-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "voices_page": [
                {"name": "Kora", "provider": "HUME_AI"},
                {"name": "Dacher", "provider": "HUME_AI"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/tts/voices"))
        .and(query_param("provider", "CUSTOM_VOICE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "voices_page": [
                {"name": "my-voice", "id": "v-1", "provider": "CUSTOM_VOICE"}
            ]
        })))
        .mount(&server)
        .await;

    let voices = VoicesClient::with_base_url(test_config(), server.uri());

    let shared = voices.list(VoiceProvider::HumeAi).await.unwrap();
    assert_eq!(shared.len(), 2);
    assert_eq!(shared[0].name, "Kora");

    let custom = voices.list(VoiceProvider::CustomVoice).await.unwrap();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0].name, "my-voice");
    assert_eq!(custom[0].id.as_deref(), Some("v-1"));
}

#[tokio::test]
async fn test_voice_create_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/tts/voices"))
        .and(body_json(json!({"generation_id": "gen-1", "name": "narrator"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "narrator",
            "id": "v-9",
            "provider": "CUSTOM_VOICE"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v0/tts/voices"))
        .and(query_param("name", "narrator"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let voices = VoicesClient::with_base_url(test_config(), server.uri());

    let created = voices.create("gen-1", "narrator").await.unwrap();
    assert_eq!(created.name, "narrator");
    assert_eq!(created.provider, Some(VoiceProvider::CustomVoice));

    voices.delete("narrator").await.unwrap();
}

#[tokio::test]
async fn test_synthesize_json_audio_round_trips_base64() {
    let raw_audio: Vec<u8> = (0u8..=255).collect();
    let encoded = base64::engine::general_purpose::STANDARD.encode(&raw_audio);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/tts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generations": [
                {"generation_id": "gen-1", "audio": encoded, "duration": 1.5}
            ],
            "request_id": "req-1"
        })))
        .mount(&server)
        .await;

    let tts = TtsClient::with_base_url(test_config(), server.uri());
    let response = tts.synthesize_json(&test_request()).await.unwrap();

    assert_eq!(response.generations.len(), 1);
    let generation = &response.generations[0];
    assert_eq!(generation.generation_id, "gen-1");
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&generation.audio)
        .unwrap();
    assert_eq!(decoded, raw_audio);
}

#[tokio::test]
async fn test_synthesize_file_buffers_full_body() {
    let raw_audio = b"RIFF....WAVEfmt fake audio body".to_vec();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/tts/file"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(raw_audio.clone()))
        .mount(&server)
        .await;

    let tts = TtsClient::with_base_url(test_config(), server.uri());
    let file = tts.synthesize_file(&test_request()).await.unwrap();

    let written = std::fs::read(file.path()).unwrap();
    assert_eq!(written, raw_audio);
}

#[tokio::test]
async fn test_stream_file_concatenation_matches_synthesize_file() {
    // Three chunks of sizes 10, 20 and 5; chunk boundaries on the wire are
    // up to the transport, so assert on the concatenation.
    let chunks: [&[u8]; 3] = [&[0xAA; 10], &[0xBB; 20], &[0xCC; 5]];
    let body: Vec<u8> = chunks.concat();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/tts/stream/file"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v0/tts/file"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let tts = TtsClient::with_base_url(test_config(), server.uri());

    let mut streamed = Vec::new();
    let mut calls = 0usize;
    tts.stream_file(&test_request(), |chunk| {
        assert!(!chunk.is_empty());
        streamed.extend_from_slice(chunk);
        calls += 1;
    })
    .await
    .unwrap();

    assert!(calls >= 1);
    assert_eq!(streamed, body);

    let file = tts.synthesize_file(&test_request()).await.unwrap();
    let buffered = std::fs::read(file.path()).unwrap();
    assert_eq!(streamed, buffered);
}

#[tokio::test]
async fn test_stream_json_delivers_one_chunk_per_line_in_order() {
    let audio = base64::engine::general_purpose::STANDARD.encode(b"pcm");
    let body = format!(
        "{}\n{}\n{}\n",
        json!({"generation_id": "g1", "snippet_id": "0", "audio": audio, "audio_format": "mp3", "is_last_chunk": false}),
        json!({"generation_id": "g1", "snippet_id": "1", "audio": audio, "audio_format": "mp3", "is_last_chunk": false}),
        json!({"generation_id": "g1", "snippet_id": "2", "audio": audio, "audio_format": "mp3", "is_last_chunk": true}),
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/tts/stream/json"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.into_bytes()))
        .mount(&server)
        .await;

    let tts = TtsClient::with_base_url(test_config(), server.uri());

    let mut seen = Vec::new();
    tts.stream_json(&test_request(), |chunk| seen.push(chunk))
        .await
        .unwrap();

    assert_eq!(seen.len(), 3);
    for (i, chunk) in seen.iter().enumerate() {
        assert_eq!(chunk.generation_id.as_deref(), Some("g1"));
        assert_eq!(chunk.snippet_id.as_deref(), Some(i.to_string().as_str()));
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(chunk.audio.as_deref().unwrap())
            .unwrap();
        assert_eq!(decoded, b"pcm");
    }
    assert!(!seen[0].is_last_chunk);
    assert!(seen[2].is_last_chunk);
}

#[tokio::test]
async fn test_stream_json_pull_style_without_trailing_newline() {
    let body = format!(
        "{}\n{}",
        json!({"generation_id": "g1", "snippet_id": "0", "is_last_chunk": false}),
        json!({"generation_id": "g1", "snippet_id": "1", "is_last_chunk": true}),
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/tts/stream/json"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.into_bytes()))
        .mount(&server)
        .await;

    let tts = TtsClient::with_base_url(test_config(), server.uri());
    let mut stream = tts.stream_json_chunks(&test_request()).await.unwrap();

    let first = stream.next_chunk().await.unwrap().unwrap();
    assert_eq!(first.snippet_id.as_deref(), Some("0"));
    let second = stream.next_chunk().await.unwrap().unwrap();
    assert!(second.is_last_chunk);
    assert!(stream.next_chunk().await.is_none());
}

#[tokio::test]
async fn test_absent_api_key_is_not_a_local_error() {
    // No pre-validation: the request goes out and the 401 comes back.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/tts/voices"))
        .and(header("X-Hume-Api-Key", ""))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let voices = VoicesClient::with_base_url(HumeConfig::default(), server.uri());
    let err = voices.list(VoiceProvider::HumeAi).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 401, .. }));
}
