//! Scripted client for deterministic tests of code built on [`LlmClient`].

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use newsdesk_common::{NewsdeskError, Result};

use crate::client::{LlmClient, LlmRequest, LlmResponse};

/// Replays canned replies in order and records every request it receives.
///
/// Running out of replies is reported as an error so a test that makes more
/// calls than it scripted fails loudly.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure after the replies scripted so far.
    pub fn then_fail(self, error: NewsdeskError) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        let next = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match next {
            Some(Ok(content)) => Ok(LlmResponse::text("scripted", content)),
            Some(Err(e)) => Err(e),
            None => Err(NewsdeskError::Llm("scripted client has no replies left".into())),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
