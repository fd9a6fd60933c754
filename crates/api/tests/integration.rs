//! Integration tests for the API layer.
//!
//! Each test spins up a real HTTP server on a random port backed by a
//! scripted reasoner.

use std::sync::Arc;

use newsdesk_api::{create_router, ApiKeyConfig, AppState};
use newsdesk_common::ConversationTurn;
use newsdesk_coordinator::testing::ScriptedReasoner;
use newsdesk_coordinator::{Newsroom, SolicitationMarkers};
use serde_json::{json, Value};

fn listing() -> Vec<ConversationTurn> {
    vec![
        ConversationTurn::discovery(
            "1) Title: A\nDescription: a\nURL: https://a.test\n\n2) Title: B\nDescription: b\nURL: https://b.test",
        ),
        ConversationTurn::coordinator("Which one?"),
    ]
}

fn article() -> Vec<ConversationTurn> {
    vec![
        ConversationTurn::drafting("# B\n\nBody.\n\n**Sources**\n- [B](https://b.test)"),
        ConversationTurn::coordinator("# B\n\nBody.\n\n**Sources**\n- [B](https://b.test)"),
    ]
}

/// Spin up a test server on a random port and return the base URL.
async fn start_test_server(reasoner: ScriptedReasoner, api_key: Option<&str>) -> String {
    let newsroom = Newsroom::new(Arc::new(reasoner), SolicitationMarkers::default());
    let mut state = AppState::new(newsroom);
    if let Some(key) = api_key {
        state = state.with_api_key(ApiKeyConfig::new(key));
    }
    let router = create_router(Arc::new(state), Some(vec!["*".to_string()]));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn send(request: reqwest::RequestBuilder) -> (u16, Value) {
    let resp = request.send().await.unwrap();
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap();
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

async fn post_json(base: &str, path: &str, body: Value) -> (u16, Value) {
    send(reqwest::Client::new().post(format!("{base}{path}")).json(&body)).await
}

async fn get(base: &str, path: &str) -> (u16, Value) {
    send(reqwest::Client::new().get(format!("{base}{path}"))).await
}

#[tokio::test]
async fn health_endpoint() {
    let base = start_test_server(ScriptedReasoner::new(Vec::<Vec<_>>::new()), None).await;
    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["active_sessions"], 0);
}

#[tokio::test]
async fn full_session_over_http() {
    let base = start_test_server(ScriptedReasoner::new([listing(), article()]), None).await;

    let (status, created) = post_json(&base, "/api/v1/sessions", json!({"topic": "AI"})).await;
    assert_eq!(status, 201);
    assert_eq!(created["state"], "awaiting_human_input");
    assert_eq!(created["turns"].as_array().unwrap().len(), 2);
    assert!(created.get("artifact").is_none());
    let id = created["session_id"].as_str().unwrap().to_string();

    let (status, live) = get(&base, &format!("/api/v1/sessions/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(live["transcript"].as_array().unwrap().len(), 3);
    assert_eq!(live["transcript"][0]["role"], "human");

    let (status, done) = post_json(
        &base,
        &format!("/api/v1/sessions/{id}/replies"),
        json!({"content": "2"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(done["state"], "terminal");
    assert_eq!(done["outcome"]["kind"], "completed");
    assert!(done["artifact"].as_str().unwrap().contains("https://b.test"));

    let (status, _) = get(&base, &format!("/api/v1/sessions/{id}")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn empty_reply_abandons_and_drops_session() {
    let base = start_test_server(ScriptedReasoner::new([listing()]), None).await;

    let (_, created) = post_json(&base, "/api/v1/sessions", json!({"topic": "AI"})).await;
    let id = created["session_id"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        &base,
        &format!("/api/v1/sessions/{id}/replies"),
        json!({"content": "  "}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["outcome"]["kind"], "abandoned");
    assert!(body.get("artifact").is_none());

    let (_, health) = get(&base, "/health").await;
    assert_eq!(health["active_sessions"], 0);
}

#[tokio::test]
async fn blank_topic_is_abandoned_immediately() {
    let base = start_test_server(ScriptedReasoner::new(Vec::<Vec<_>>::new()), None).await;
    let (status, body) = post_json(&base, "/api/v1/sessions", json!({"topic": ""})).await;
    assert_eq!(status, 201);
    assert_eq!(body["state"], "terminal");
    assert_eq!(body["outcome"]["kind"], "abandoned");
}

#[tokio::test]
async fn reasoner_failure_is_a_gateway_error() {
    let reasoner = ScriptedReasoner::new(Vec::<Vec<_>>::new())
        .then_fail(newsdesk_common::NewsdeskError::Llm("model down".into()));
    let base = start_test_server(reasoner, None).await;

    let (status, body) = post_json(&base, "/api/v1/sessions", json!({"topic": "AI"})).await;
    assert_eq!(status, 502);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn sessions_are_isolated() {
    let base = start_test_server(ScriptedReasoner::new([listing(), listing()]), None).await;

    let (_, a) = post_json(&base, "/api/v1/sessions", json!({"topic": "AI"})).await;
    let (_, b) = post_json(&base, "/api/v1/sessions", json!({"topic": "space"})).await;
    let (a, b) = (
        a["session_id"].as_str().unwrap().to_string(),
        b["session_id"].as_str().unwrap().to_string(),
    );
    assert_ne!(a, b);

    let (_, ta) = get(&base, &format!("/api/v1/sessions/{a}")).await;
    let (_, tb) = get(&base, &format!("/api/v1/sessions/{b}")).await;
    assert_eq!(ta["transcript"][0]["text"], "AI");
    assert_eq!(tb["transcript"][0]["text"], "space");

    let status = reqwest::Client::new()
        .delete(format!("{base}/api/v1/sessions/{a}"))
        .send()
        .await
        .unwrap()
        .status()
        .as_u16();
    assert_eq!(status, 204);

    let (status, _) = get(&base, &format!("/api/v1/sessions/{a}")).await;
    assert_eq!(status, 404);
    let (status, _) = get(&base, &format!("/api/v1/sessions/{b}")).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let base = start_test_server(ScriptedReasoner::new(Vec::<Vec<_>>::new()), None).await;
    let (status, body) = post_json(
        &base,
        "/api/v1/sessions/nope/replies",
        json!({"content": "1"}),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn api_key_guards_session_routes_but_not_health() {
    let base = start_test_server(ScriptedReasoner::new([listing()]), Some("desk-key")).await;

    let (status, _) = get(&base, "/health").await;
    assert_eq!(status, 200);

    let (status, body) = post_json(&base, "/api/v1/sessions", json!({"topic": "AI"})).await;
    assert_eq!(status, 401);
    assert_eq!(body["code"], "MISSING_API_KEY");

    let (status, _) = send(
        reqwest::Client::new()
            .post(format!("{base}/api/v1/sessions"))
            .bearer_auth("desk-key")
            .json(&json!({"topic": "AI"})),
    )
    .await;
    assert_eq!(status, 201);
}
