//! Discovery delegate - finds candidate headlines for a topic.

use std::sync::Arc;

use async_trait::async_trait;
use newsdesk_common::{render_candidates, ConversationTurn, Result, TurnRole};
use newsdesk_lookup::{LookupAdapter, LookupOutcome};
use tracing::info;

use crate::traits::Delegate;

/// Most headlines the scout hands back, regardless of the lookup page size.
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// News scout: one lookup per call, results kept in the candidate block
/// format so the writer can later recover each URL.
pub struct NewsScoutAgent {
    adapter: Arc<LookupAdapter>,
    max_candidates: usize,
}

impl NewsScoutAgent {
    pub fn new(adapter: Arc<LookupAdapter>) -> Self {
        Self {
            adapter,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    /// Up to `max_candidates` numbered candidate blocks for `topic`, or the
    /// lookup's empty/error text verbatim.
    pub async fn discover(&self, topic: &str) -> String {
        let topic = topic.trim();
        info!(agent = %self.id(), topic = %topic, "Discovering headlines");

        match self.adapter.lookup(topic).await {
            LookupOutcome::Found(records) => {
                let shown = records.len().min(self.max_candidates);
                render_candidates(&records[..shown], true)
            }
            other => other.to_text(),
        }
    }
}

#[async_trait]
impl Delegate for NewsScoutAgent {
    fn id(&self) -> &str {
        "news_scout_tool"
    }

    fn name(&self) -> &str {
        TurnRole::DiscoveryDelegate.label()
    }

    fn description(&self) -> &str {
        "Fetch trending news headlines for a topic. Input: the topic."
    }

    fn role(&self) -> TurnRole {
        TurnRole::DiscoveryDelegate
    }

    async fn handle(&self, input: &str) -> Result<ConversationTurn> {
        Ok(ConversationTurn::discovery(self.discover(input).await))
    }
}
