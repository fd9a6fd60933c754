//! The delegate trait the coordinator calls its tools through.

use async_trait::async_trait;
use newsdesk_common::{ConversationTurn, Result, TurnRole};
use serde::{Deserialize, Serialize};

/// A role-bound capability the coordinator invokes for one narrow purpose.
#[async_trait]
pub trait Delegate: Send + Sync {
    /// Tool name the coordinator uses to call this delegate.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// One-line description shown to the coordinator.
    fn description(&self) -> &str;

    /// Role recorded on the turns this delegate produces.
    fn role(&self) -> TurnRole;

    /// Run the delegate on free-text input.
    async fn handle(&self, input: &str) -> Result<ConversationTurn>;
}

/// Configuration for a model-backed delegate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegateConfig {
    pub id: String,

    pub name: String,

    /// Custom system prompt (optional, uses the delegate's default if not set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for DelegateConfig {
    fn default() -> Self {
        Self {
            id: "delegate".into(),
            name: "Delegate".into(),
            system_prompt: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}
