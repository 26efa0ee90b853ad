//! Adapters exercised against an in-process fake of the OpenAI HTTP API.
//!
//! The fake binds to an ephemeral localhost port, records every JSON body it
//! receives and answers according to a per-test `Behavior`.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use wits_core::{
    AiResponder, AudioSynthesizer, GenerationSnapshot, ResponderError, SessionConfig,
    SynthesisError, TurnLedger,
};
use wits_openai::{ChatResponder, OpenAiClient, OpenAiConfig, OpenAiError, SpeechSynthesizer};

const API_KEY: &str = "sk-test-key";

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    BlankContent,
    Status(u16),
}

struct FakeApi {
    behavior: Behavior,
    requests: Mutex<Vec<(String, Value)>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {API_KEY}"))
}

fn error_response(status: u16, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap();
    (status, Json(json!({ "error": { "message": message } }))).into_response()
}

async fn chat(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.requests
        .lock()
        .unwrap()
        .push(("chat".to_string(), body));

    if !authorized(&headers) {
        return error_response(401, "Incorrect API key provided");
    }

    match api.behavior {
        Behavior::Succeed => Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  A strong argument.  " } }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160 }
        }))
        .into_response(),
        Behavior::BlankContent => Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "   " } }]
        }))
        .into_response(),
        Behavior::Status(status) => error_response(status, "scripted failure"),
    }
}

async fn speech(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.requests
        .lock()
        .unwrap()
        .push(("speech".to_string(), body));

    if !authorized(&headers) {
        return error_response(401, "Incorrect API key provided");
    }

    match api.behavior {
        Behavior::Succeed | Behavior::BlankContent => {
            ([(header::CONTENT_TYPE, "audio/mpeg")], b"ID3-fake-mp3".to_vec()).into_response()
        }
        Behavior::Status(status) => error_response(status, "scripted failure"),
    }
}

/// Start the fake and return a client pointed at it.
async fn serve(behavior: Behavior, api_key: &str) -> (Arc<OpenAiClient>, Arc<FakeApi>) {
    let api = Arc::new(FakeApi {
        behavior,
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/v1/chat/completions", post(chat))
        .route("/v1/audio/speech", post(speech))
        .with_state(Arc::clone(&api));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = OpenAiConfig::new(api_key)
        .with_base_url(format!("http://127.0.0.1:{port}/v1/"))
        .with_max_response_tokens(321);
    (Arc::new(OpenAiClient::new(config).unwrap()), api)
}

fn opening_snapshot() -> GenerationSnapshot {
    let config = SessionConfig::new("School uniforms", "Uniforms help", "Uniforms hurt")
        .with_turns_per_side(4)
        .with_temperature(0.4);
    let ledger = TurnLedger::new(Arc::new(config));
    GenerationSnapshot::for_ordinal(&ledger.transcript(), 1)
}

// ── Chat ───────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_responder_trims_content_and_maps_usage() {
    let (client, api) = serve(Behavior::Succeed, API_KEY).await;
    let responder = ChatResponder::new(client);

    let reply = responder.generate(&opening_snapshot()).await.unwrap();
    assert_eq!(reply.text, "A strong argument.");
    assert_eq!(reply.usage.input_tokens, 120);
    assert_eq!(reply.usage.output_tokens, 40);
    assert_eq!(reply.usage.total_tokens, 160);
    assert_eq!(reply.usage.model, "gpt-4o");

    let requests = api.requests.lock().unwrap();
    let (endpoint, body) = &requests[0];
    assert_eq!(endpoint, "chat");
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["max_tokens"], 321);
    assert!((body["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "Begin your opening statement.");
}

#[tokio::test]
async fn chat_responder_rejects_blank_content() {
    let (client, _api) = serve(Behavior::BlankContent, API_KEY).await;
    let err = ChatResponder::new(client)
        .generate(&opening_snapshot())
        .await
        .unwrap_err();
    assert!(matches!(err, ResponderError::EmptyResponse));
}

#[tokio::test]
async fn chat_errors_are_categorized_by_status() {
    let (client, _api) = serve(Behavior::Succeed, "sk-wrong").await;
    let err = ChatResponder::new(client)
        .generate(&opening_snapshot())
        .await
        .unwrap_err();
    assert!(matches!(err, ResponderError::Authentication(_)));
    assert!(err.to_string().contains("Incorrect API key provided"));

    let (client, _api) = serve(Behavior::Status(429), API_KEY).await;
    let err = ChatResponder::new(client)
        .generate(&opening_snapshot())
        .await
        .unwrap_err();
    assert!(matches!(err, ResponderError::RateLimited(_)));

    let (client, _api) = serve(Behavior::Status(500), API_KEY).await;
    let err = ChatResponder::new(client)
        .generate(&opening_snapshot())
        .await
        .unwrap_err();
    assert!(matches!(err, ResponderError::Failed(_)));
}

#[tokio::test]
async fn ping_uses_small_model_and_budget() {
    let (client, api) = serve(Behavior::Succeed, API_KEY).await;
    ChatResponder::new(client).ping().await.unwrap();

    let requests = api.requests.lock().unwrap();
    let (_, body) = &requests[0];
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["max_tokens"], 5);
    assert!(body.get("temperature").is_none());
}

#[tokio::test]
async fn ping_reports_authentication_failure() {
    let (client, _api) = serve(Behavior::Succeed, "sk-wrong").await;
    let err = ChatResponder::new(client).ping().await.unwrap_err();
    assert!(matches!(err, OpenAiError::Authentication { status: 401, .. }));
    assert_eq!(err.user_message(), "Invalid or missing OpenAI API key");
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = OpenAiConfig::new(API_KEY).with_base_url(format!("http://127.0.0.1:{port}/v1"));
    let client = Arc::new(OpenAiClient::new(config).unwrap());
    let err = ChatResponder::new(client).ping().await.unwrap_err();
    assert!(matches!(err, OpenAiError::Connection(_)));
}

// ── Speech ─────────────────────────────────────────────────────────

#[tokio::test]
async fn speech_returns_body_bytes() {
    let (client, api) = serve(Behavior::Succeed, API_KEY).await;
    let synthesizer = SpeechSynthesizer::new(client);

    let audio = synthesizer.synthesize("Hello there", "nova", 1.25).await.unwrap();
    assert_eq!(audio.as_ref(), b"ID3-fake-mp3");

    let requests = api.requests.lock().unwrap();
    let (endpoint, body) = &requests[0];
    assert_eq!(endpoint, "speech");
    assert_eq!(body["model"], "tts-1");
    assert_eq!(body["voice"], "nova");
    assert_eq!(body["input"], "Hello there");
    assert_eq!(body["response_format"], "mp3");
    assert!((body["speed"].as_f64().unwrap() - 1.25).abs() < 1e-6);
}

#[tokio::test]
async fn speech_rejects_unknown_voice_without_calling_api() {
    let (client, api) = serve(Behavior::Succeed, API_KEY).await;
    let err = SpeechSynthesizer::new(client)
        .synthesize("Hello", "robot", 1.0)
        .await
        .unwrap_err();
    assert!(matches!(err, SynthesisError::UnknownVoice(ref v) if v == "robot"));
    assert!(api.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn speech_accepts_custom_voice_list() {
    let (client, _api) = serve(Behavior::Succeed, API_KEY).await;
    let synthesizer = SpeechSynthesizer::new(client).with_voices(["robot"]);
    assert_eq!(synthesizer.voices(), ["robot".to_string()]);
    assert!(synthesizer.synthesize("Hello", "robot", 1.0).await.is_ok());
}

#[tokio::test]
async fn speech_errors_are_categorized_by_status() {
    let (client, _api) = serve(Behavior::Status(429), API_KEY).await;
    let err = SpeechSynthesizer::new(client)
        .synthesize("Hello", "alloy", 1.0)
        .await
        .unwrap_err();
    assert!(matches!(err, SynthesisError::RateLimited(_)));
}
