//! HTTP route handlers for the API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use newsdesk_common::{ConversationTurn, NewsdeskError};
use newsdesk_coordinator::{SessionOutcome, SessionState, StepReport};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        active_sessions: state.session_count().await,
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub content: String,
}

/// Result of starting a session or replying to one.
#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub session_id: String,
    pub state: &'static str,
    pub turns: Vec<ConversationTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SessionOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

impl StepResponse {
    fn new(session_id: String, report: StepReport) -> Self {
        let artifact = report.artifact().map(str::to_string);
        let outcome = match report.state {
            SessionState::Terminal { ref outcome } => Some(outcome.clone()),
            _ => None,
        };
        Self {
            session_id,
            state: report.state.name(),
            turns: report.new_turns,
            outcome,
            artifact,
        }
    }
}

/// Session status response.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub state: &'static str,
    pub transcript: Vec<ConversationTurn>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: &'static str,
}

impl ErrorResponse {
    fn not_found(session_id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: format!("Session '{session_id}' not found"),
            code: "SESSION_NOT_FOUND",
        }
    }
}

impl From<NewsdeskError> for ErrorResponse {
    fn from(e: NewsdeskError) -> Self {
        let (status, code) = match &e {
            NewsdeskError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            NewsdeskError::Coordination(_) => (StatusCode::CONFLICT, "COORDINATION_ERROR"),
            NewsdeskError::Llm(_)
            | NewsdeskError::Upstream { .. }
            | NewsdeskError::Transport(_)
            | NewsdeskError::Lookup(_)
            | NewsdeskError::Delegate(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        Self {
            status,
            error: e.to_string(),
            code,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Start a session from a topic and run its first step.
///
/// Sessions that end in the first step are never registered.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<StepResponse>), ErrorResponse> {
    info!(
        topic_preview = %request.topic.chars().take(50).collect::<String>(),
        "Creating session"
    );

    let mut session = state.newsroom.session();
    let report = session.submit_topic(&request.topic).await.map_err(|e| {
        error!(error = %e, "First step failed");
        ErrorResponse::from(e)
    })?;

    let session_id = if report.state.is_terminal() {
        uuid::Uuid::new_v4().to_string()
    } else {
        state.insert(Arc::new(Mutex::new(session))).await
    };

    Ok((StatusCode::CREATED, Json(StepResponse::new(session_id, report))))
}

/// Fold a human reply into a session and run the next step.
pub async fn post_reply(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<StepResponse>, ErrorResponse> {
    let session = state
        .get(&session_id)
        .await
        .ok_or_else(|| ErrorResponse::not_found(&session_id))?;

    let mut session = session.lock().await;
    let result = session.reply(&request.content).await;

    if session.state().is_terminal() {
        debug!(session_id = %session_id, "Session finished, dropping");
        state.remove(&session_id).await;
    }

    let report = result.map_err(|e| {
        error!(session_id = %session_id, error = %e, "Reply step failed");
        ErrorResponse::from(e)
    })?;

    Ok(Json(StepResponse::new(session_id, report)))
}

/// Current state and transcript of a live session.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ErrorResponse> {
    let session = state
        .get(&session_id)
        .await
        .ok_or_else(|| ErrorResponse::not_found(&session_id))?;
    let session = session.lock().await;

    Ok(Json(SessionResponse {
        session_id,
        state: session.state().name(),
        transcript: session.transcript().to_vec(),
    }))
}

/// Discard a session.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ErrorResponse> {
    state
        .remove(&session_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ErrorResponse::not_found(&session_id))
}
