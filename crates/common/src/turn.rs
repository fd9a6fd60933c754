//! Conversation turn types shared by the coordinator and the gateway.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The manager reasoning capability driving the workflow
    Coordinator,
    /// The news scout that looks up candidate headlines
    DiscoveryDelegate,
    /// The writer that drafts the article
    DraftingDelegate,
    /// The human operator
    Human,
}

impl TurnRole {
    /// Label used when the turn is rendered into accumulated context.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coordinator => "manager_agent",
            Self::DiscoveryDelegate => "news_scout_agent",
            Self::DraftingDelegate => "writer_agent",
            Self::Human => "User",
        }
    }

    pub fn is_agent(&self) -> bool {
        !matches!(self, Self::Human)
    }
}

/// One append-only entry in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn coordinator(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Coordinator, text)
    }

    pub fn discovery(text: impl Into<String>) -> Self {
        Self::new(TurnRole::DiscoveryDelegate, text)
    }

    pub fn drafting(text: impl Into<String>) -> Self {
        Self::new(TurnRole::DraftingDelegate, text)
    }

    pub fn human(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Human, text)
    }

    /// `"<label>: <text>"`, the form used for display and context rebuilding.
    pub fn labeled(&self) -> String {
        format!("{}: {}", self.role.label(), self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_agent_names() {
        assert_eq!(TurnRole::Coordinator.label(), "manager_agent");
        assert_eq!(TurnRole::DiscoveryDelegate.label(), "news_scout_agent");
        assert_eq!(TurnRole::DraftingDelegate.label(), "writer_agent");
        assert_eq!(TurnRole::Human.label(), "User");
    }

    #[test]
    fn labeled_rendering() {
        assert_eq!(ConversationTurn::human("2").labeled(), "User: 2");
        assert_eq!(
            ConversationTurn::coordinator("Which one?").labeled(),
            "manager_agent: Which one?"
        );
    }

    #[test]
    fn only_human_is_not_an_agent() {
        assert!(TurnRole::Coordinator.is_agent());
        assert!(TurnRole::DraftingDelegate.is_agent());
        assert!(!TurnRole::Human.is_agent());
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TurnRole::DiscoveryDelegate).unwrap(),
            "\"discovery_delegate\""
        );
    }
}
