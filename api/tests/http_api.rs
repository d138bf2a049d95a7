use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};
use axum_test::TestServer;
use clap::Parser;
use healthscan_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use serde_json::{Value, json};
use test_context::{AsyncTestContext, test_context};

// PNG signature, enough for format detection.
const PNG_BASE64: &str = "iVBORw0KGgo=";
const FAIL_TRIGGER: &str = "__fail__";
const BREAK_TRIGGER: &str = "__break__";

const ANALYSIS_TEXT: &str =
    "## Food Identification\nGrilled salmon with rice.\nHealth Score: 82\nCalories: 540";

type CallLog = Arc<Mutex<Vec<String>>>;

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
    })
}

/// Stand-in for the Gemini REST API. Prompts containing a trigger make it fail.
async fn fake_gemini(
    State(calls): State<CallLog>,
    Path(call): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    calls.lock().unwrap().push(call.clone());

    let parts = body["contents"][0]["parts"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    let prompt = parts
        .iter()
        .find_map(|part| part["text"].as_str())
        .unwrap_or_default()
        .to_string();

    if prompt.contains(FAIL_TRIGGER) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"code": 500, "message": "quota exceeded", "status": "INTERNAL"}})),
        )
            .into_response();
    }

    if call.ends_with(":streamGenerateContent") {
        let body = if prompt.contains(BREAK_TRIGGER) {
            format!("data: {}\r\n\r\ndata: {{not json\r\n\r\n", candidate("Partial "))
        } else {
            ["Eat ", "more ", "greens."]
                .iter()
                .map(|fragment| format!("data: {}\r\n\r\n", candidate(fragment)))
                .collect()
        };
        return ([(CONTENT_TYPE, "text/event-stream")], body).into_response();
    }

    let has_image = parts.iter().any(|part| part.get("inline_data").is_some());
    let text = if has_image {
        ANALYSIS_TEXT
    } else {
        "Hello! Ask me about your meals."
    };
    Json(candidate(text)).into_response()
}

async fn spawn_fake_gemini(calls: CallLog) -> SocketAddr {
    let app = Router::new()
        .route("/v1beta/models/{call}", post(fake_gemini))
        .with_state(calls);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn test_server(base_url: &str, extra: &[&str]) -> TestServer {
    let mut argv = vec![
        "healthscan-api",
        "--gemini-api-key",
        "test-key",
        "--gemini-base-url",
        base_url,
        "--vision-model",
        "vision-test",
        "--chat-model",
        "chat-test",
        "--metrics-enabled",
        "false",
    ];
    argv.extend_from_slice(extra);

    let args = Arc::new(Args::try_parse_from(argv).unwrap());
    let app = router(state(args).await.unwrap()).unwrap();
    TestServer::new(app).unwrap()
}

struct ApiContext {
    server: TestServer,
    calls: CallLog,
}

impl AsyncTestContext for ApiContext {
    async fn setup() -> Self {
        let calls = CallLog::default();
        let addr = spawn_fake_gemini(calls.clone()).await;
        let server = test_server(&format!("http://{addr}/v1beta"), &[]).await;
        ApiContext { server, calls }
    }
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_models_lists_catalogue_and_current_config(ctx: &mut ApiContext) {
    let response = ctx.server.get("/models").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["current_config"]["vision_model"], "vision-test");
    assert_eq!(body["current_config"]["chat_model"], "chat-test");
    assert!(body["available_models"]["multimodal"].is_array());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_analyze_food_extracts_metrics(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/analyze-food")
        .json(&json!({"image_data": format!("data:image/png;base64,{PNG_BASE64}")}))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"], ANALYSIS_TEXT);
    assert_eq!(body["health_score"], 82);
    assert_eq!(body["estimated_calories"], 540);
    assert_eq!(body["model_used"], "vision-test");
    assert!(body["timestamp"].as_f64().unwrap() > 0.0);

    assert_eq!(
        ctx.calls.lock().unwrap().as_slice(),
        ["vision-test:generateContent".to_string()]
    );
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_analyze_food_rejects_undecodable_image(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/analyze-food")
        .json(&json!({"image_data": "definitely not base64!"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let detail = response.json::<Value>()["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Invalid image data"), "{detail}");
    assert!(ctx.calls.lock().unwrap().is_empty());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_analyze_food_requires_image_data(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/analyze-food")
        .json(&json!({"prompt": "What is this?"}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_analyze_food_upstream_failure_is_500(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/analyze-food")
        .json(&json!({"image_data": PNG_BASE64, "prompt": FAIL_TRIGGER}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let detail = response.json::<Value>()["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Food analysis failed:"), "{detail}");
    assert!(detail.contains("quota exceeded"), "{detail}");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_chat_without_stream_returns_full_reply(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/chat")
        .json(&json!({
            "messages": [{"role": "user", "content": "Is rice healthy?"}],
            "stream": false
        }))
        .await;
    response.assert_status_ok();

    assert_eq!(
        response.json::<Value>(),
        json!({"success": true, "response": "Eat more greens.", "model_used": "chat-test"})
    );
    assert_eq!(
        ctx.calls.lock().unwrap().as_slice(),
        ["chat-test:streamGenerateContent".to_string()]
    );
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_chat_streams_frames_then_sentinel(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/chat")
        .json(&json!({"messages": [{"role": "user", "content": "Is rice healthy?"}]}))
        .await;
    response.assert_status_ok();

    let content_type = response.header(CONTENT_TYPE);
    assert!(content_type.to_str().unwrap().starts_with("text/event-stream"));
    assert_eq!(response.header("x-accel-buffering"), "no");

    assert_eq!(
        response.text(),
        "data: {\"content\":\"Eat \"}\n\n\
         data: {\"content\":\"more \"}\n\n\
         data: {\"content\":\"greens.\"}\n\n\
         data: [DONE]\n\n"
    );
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_chat_stream_reports_mid_stream_error_in_band(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/chat")
        .json(&json!({"messages": [{"role": "user", "content": BREAK_TRIGGER}]}))
        .await;
    response.assert_status_ok();

    let body = response.text();
    assert!(body.starts_with("data: {\"content\":\"Partial \"}\n\n"), "{body}");
    assert!(
        body.contains("data: {\"content\":\"Error generating response: Failed to parse LLM response"),
        "{body}"
    );
    assert!(body.ends_with("data: [DONE]\n\n"), "{body}");
    assert_eq!(body.matches("[DONE]").count(), 1);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_chat_upstream_refusal_becomes_reply_text(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/chat")
        .json(&json!({
            "messages": [{"role": "user", "content": FAIL_TRIGGER}],
            "stream": false
        }))
        .await;
    response.assert_status_ok();

    let reply = response.json::<Value>()["response"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(reply.starts_with("Error generating response:"), "{reply}");
    assert!(reply.contains("quota exceeded"), "{reply}");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_chat_rejects_empty_messages(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/chat")
        .json(&json!({"messages": []}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(ctx.calls.lock().unwrap().is_empty());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_health_reports_connected(ctx: &mut ApiContext) {
    let response = ctx.server.get("/health").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["gemini_status"], "connected");
    assert_eq!(body["models"], json!({"vision": "vision-test", "chat": "chat-test"}));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_openapi_document_lists_routes(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let paths = response.json::<Value>()["paths"].clone();
    for path in ["/analyze-food", "/chat", "/health", "/models"] {
        assert!(paths.get(path).is_some(), "missing {path}");
    }
}

#[tokio::test]
async fn test_health_is_unhealthy_when_upstream_is_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let server = test_server(&format!("http://{addr}/v1beta"), &[]).await;
    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "unhealthy");
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_root_path_prefixes_routes() {
    let calls = CallLog::default();
    let addr = spawn_fake_gemini(calls).await;
    let server = test_server(&format!("http://{addr}/v1beta"), &["--root-path", "/api"]).await;

    server.get("/api/models").await.assert_status_ok();
    server
        .get("/models")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
