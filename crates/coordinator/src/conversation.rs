//! Append-only conversation record and context reconstruction.

use newsdesk_common::{ConversationTurn, NewsdeskError, Result, TurnRole};
use serde::Serialize;

/// Every turn of one session in chronological order.
///
/// The first turn is always the human's topic. Turns are never edited or
/// removed once pushed.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationState {
    turns: Vec<ConversationTurn>,
    latest_coordinator: Option<usize>,
}

impl ConversationState {
    /// Start a conversation from the initial topic. A blank topic is rejected.
    pub fn new(topic: &str) -> Result<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(NewsdeskError::InvalidInput("topic must not be empty".into()));
        }
        Ok(Self {
            turns: vec![ConversationTurn::human(topic)],
            latest_coordinator: None,
        })
    }

    pub fn topic(&self) -> &str {
        &self.turns[0].text
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        if turn.role == TurnRole::Coordinator {
            self.latest_coordinator = Some(self.turns.len());
        }
        self.turns.push(turn);
    }

    pub fn extend(&mut self, turns: impl IntoIterator<Item = ConversationTurn>) {
        for turn in turns {
            self.push(turn);
        }
    }

    pub fn latest_coordinator(&self) -> Option<&ConversationTurn> {
        self.latest_coordinator.map(|i| &self.turns[i])
    }

    /// Turns appended at or after `index`.
    pub fn since(&self, index: usize) -> &[ConversationTurn] {
        &self.turns[index.min(self.turns.len())..]
    }

    /// Text handed to the coordinator on the next invocation.
    ///
    /// Before anything has been said back, this is the bare topic. Afterwards
    /// it is every turn rendered `label: text`, blank-line separated.
    pub fn render_context(&self) -> String {
        if self.turns.len() == 1 {
            return self.topic().to_string();
        }
        self.turns
            .iter()
            .map(ConversationTurn::labeled)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
