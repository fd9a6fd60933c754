//! The coordinator's reasoning capability as seen by the loop.

use async_trait::async_trait;
use newsdesk_common::{ConversationTurn, Result};

/// Turns accumulated context into the next batch of turns.
///
/// The returned turns are in production order: delegate outputs first, then
/// the coordinator message that follows them. The loop classifies the last
/// one.
#[async_trait]
pub trait Reasoner: Send + Sync {
    async fn invoke(&self, context: &str) -> Result<Vec<ConversationTurn>>;
}

