//! Scripted stand-ins for the reasoning capability and the human.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use newsdesk_common::{ConversationTurn, NewsdeskError, Result};

use crate::io::HumanIo;
use crate::reasoner::Reasoner;

/// Replays canned turn batches in order and records each context it is
/// invoked with. Running out of batches is an error.
pub struct ScriptedReasoner {
    batches: Mutex<VecDeque<Result<Vec<ConversationTurn>>>>,
    contexts: Mutex<Vec<String>>,
}

impl ScriptedReasoner {
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<ConversationTurn>>,
    {
        Self {
            batches: Mutex::new(batches.into_iter().map(Ok).collect()),
            contexts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure after the batches scripted so far.
    pub fn then_fail(self, error: NewsdeskError) -> Self {
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
        self
    }

    pub fn contexts(&self) -> Vec<String> {
        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn invoke(&self, context: &str) -> Result<Vec<ConversationTurn>> {
        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(context.to_string());
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(NewsdeskError::Coordination(
                    "scripted reasoner has no batches left".into(),
                ))
            })
    }
}

/// A human who types a fixed topic and then the given replies; after the
/// last reply, input ends.
pub struct ScriptedHumanIo {
    topic: Option<String>,
    replies: VecDeque<String>,
    shown: Vec<String>,
}

impl ScriptedHumanIo {
    pub fn new<I, S>(topic: impl Into<String>, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topic: Some(topic.into()),
            replies: replies.into_iter().map(Into::into).collect(),
            shown: Vec::new(),
        }
    }

    /// Every turn presented so far, as `label: text`.
    pub fn shown(&self) -> Vec<String> {
        self.shown.clone()
    }
}

#[async_trait]
impl HumanIo for ScriptedHumanIo {
    async fn read_topic(&mut self) -> Result<Option<String>> {
        Ok(self.topic.take())
    }

    async fn read_reply(&mut self) -> Result<Option<String>> {
        Ok(self.replies.pop_front())
    }

    async fn show(&mut self, turn: &ConversationTurn) -> Result<()> {
        self.shown.push(turn.labeled());
        Ok(())
    }
}
