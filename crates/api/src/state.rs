//! Application state for the API server.

use std::collections::HashMap;
use std::sync::Arc;

use newsdesk_coordinator::{Newsroom, Session};
use tokio::sync::{Mutex, RwLock};

use crate::auth::ApiKeyConfig;

/// A session shared between the registry and an in-flight request.
pub type SharedSession = Arc<Mutex<Session>>;

/// Shared application state for the API server.
pub struct AppState {
    /// Builds a fresh, isolated session per client
    pub newsroom: Newsroom,

    /// Live (non-terminal) sessions by id
    sessions: RwLock<HashMap<String, SharedSession>>,

    /// Bearer token required on everything but `/health`
    pub api_key: Option<ApiKeyConfig>,

    /// Server start time (for health checks)
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(newsroom: Newsroom) -> Self {
        Self {
            newsroom,
            sessions: RwLock::new(HashMap::new()),
            api_key: None,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn with_api_key(mut self, api_key: ApiKeyConfig) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Register a session and return its new id.
    pub async fn insert(&self, session: SharedSession) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions.write().await.insert(id.clone(), session);
        id
    }

    pub async fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &str) -> Option<SharedSession> {
        self.sessions.write().await.remove(id)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
