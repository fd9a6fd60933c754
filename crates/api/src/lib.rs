//! HTTP gateway for newsdesk sessions.
//!
//! Every client conversation is its own [`Session`](newsdesk_coordinator::Session)
//! with its own conversation record; nothing is shared between sessions but
//! the model and lookup clients.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/v1/sessions` - Start a session from `{"topic": ...}`
//! - `POST /api/v1/sessions/{id}/replies` - Answer with `{"content": ...}`
//! - `GET /api/v1/sessions/{id}` - State and transcript
//! - `DELETE /api/v1/sessions/{id}` - Discard a session
//!
//! Sessions that reach a terminal state are dropped from the registry.

pub mod auth;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use auth::ApiKeyConfig;
pub use state::{AppState, SharedSession};

fn cors_layer(origins: Option<Vec<String>>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origins {
        Some(origins) if !origins.iter().any(|o| o == "*") => {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!(origin = %o, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(parsed))
        }
        _ => layer.allow_origin(Any),
    }
}

/// Create the API router with all routes configured.
pub fn create_router(state: Arc<AppState>, cors_origins: Option<Vec<String>>) -> Router {
    let api_key = state.api_key.clone();

    let router = Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/sessions", post(routes::create_session))
        .route(
            "/api/v1/sessions/{id}",
            get(routes::get_session).delete(routes::delete_session),
        )
        .route("/api/v1/sessions/{id}/replies", post(routes::post_reply))
        .with_state(state);

    let router = match api_key {
        Some(config) => {
            router.layer(middleware::from_fn_with_state(config, auth::api_key_auth))
        }
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

/// Start the API server on the given address.
pub async fn serve(
    state: Arc<AppState>,
    addr: SocketAddr,
    cors_origins: Option<Vec<String>>,
) -> anyhow::Result<()> {
    let router = create_router(state, cors_origins);

    info!(%addr, "Starting newsdesk API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
