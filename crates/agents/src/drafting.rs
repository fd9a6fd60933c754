//! Drafting delegate - turns one chosen headline into a short article.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use newsdesk_common::{
    parse_candidates, CandidateRecord, ConversationTurn, NewsdeskError, Result, TurnRole,
};
use newsdesk_llm::{ChatMessage, LlmClient, LlmRequest};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::traits::{Delegate, DelegateConfig};

/// Emitted instead of a source list when no URL was supplied.
pub const NO_SOURCES_FOUND: &str = "No sources found.";

/// Body length the writer is instructed to produce.
pub const BODY_WORDS: std::ops::RangeInclusive<usize> = 100..=150;

const WRITER_SYSTEM_PROMPT: &str = r#"You are a professional news writer. Based on the given headline, description and URL, write a headline and a complete article body of 100-150 words.

Rules:
1. Your writing should be clear, engaging, and factual.
2. Only restate facts present in the supplied headline and description. Avoid bias or unsupported claims.
3. Do not name or invent any source, outlet, person or quote that is not in the supplied material.
4. Put the headline alone on the first line, then a blank line, then the body.
5. Do not write a sources section; it is added for you.
"#;

/// The record the writer drafts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    pub headline: String,
    pub description: String,
    pub url: String,
}

impl DraftRequest {
    pub fn new(
        headline: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            headline: headline.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// Read a request from free text.
    ///
    /// A candidate block (`Title:/Description:/URL:`) is parsed field by
    /// field; anything else is taken as a bare headline with no source.
    pub fn from_text(input: &str) -> Self {
        match parse_candidates(input).into_iter().next() {
            Some(record) => record.into(),
            None => Self::new(input.trim(), "", ""),
        }
    }

    fn source(&self) -> Option<SourceLink> {
        let record = CandidateRecord::new(&self.headline, &self.description, &self.url);
        record.has_resolvable_url().then(|| SourceLink {
            title: record.title,
            url: record.url,
        })
    }

    fn prompt(&self) -> String {
        format!(
            "Title: {}\nDescription: {}\nURL: {}",
            self.headline, self.description, self.url
        )
    }
}

impl From<CandidateRecord> for DraftRequest {
    fn from(record: CandidateRecord) -> Self {
        Self::new(record.title, record.description, record.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

/// A finished headline, body and source list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub headline: String,
    pub body: String,
    pub sources: Vec<SourceLink>,
}

impl Artifact {
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Markdown source list, or the no-sources sentinel.
    pub fn sources_markdown(&self) -> String {
        if self.sources.is_empty() {
            return NO_SOURCES_FOUND.to_string();
        }
        let items: Vec<String> = self
            .sources
            .iter()
            .map(|s| format!("- [{}]({})", s.title, s.url))
            .collect();
        format!("**Sources**\n{}", items.join("\n"))
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# {}\n\n{}\n\n{}",
            self.headline,
            self.body,
            self.sources_markdown()
        )
    }
}

/// Writer: one model call per draft, sources attached from the request.
pub struct WriterAgent {
    config: DelegateConfig,
    llm: Arc<dyn LlmClient>,
}

impl WriterAgent {
    pub fn new(config: DelegateConfig, llm: Arc<dyn LlmClient>) -> Self {
        Self { config, llm }
    }

    pub fn with_default_config(llm: Arc<dyn LlmClient>) -> Self {
        Self::new(
            DelegateConfig {
                id: "writer_tool".into(),
                name: TurnRole::DraftingDelegate.label().into(),
                temperature: 0.4,
                ..Default::default()
            },
            llm,
        )
    }

    fn system_prompt(&self) -> &str {
        self.config
            .system_prompt
            .as_deref()
            .unwrap_or(WRITER_SYSTEM_PROMPT)
    }

    pub async fn draft(&self, request: &DraftRequest) -> Result<Artifact> {
        info!(
            agent = %self.id(),
            headline = %request.headline,
            has_url = request.source().is_some(),
            "Drafting article"
        );

        let llm_request = LlmRequest::new(self.system_prompt())
            .with_message(ChatMessage::user(request.prompt()))
            .with_temperature(Some(self.config.temperature))
            .with_max_tokens(Some(self.config.max_tokens));

        let response = self.llm.complete(llm_request).await?;
        let (headline, body) = split_draft(&response.content)
            .ok_or_else(|| NewsdeskError::Delegate("writer returned an empty draft".into()))?;

        let artifact = Artifact {
            headline: headline.unwrap_or_else(|| request.headline.clone()),
            body,
            sources: request.source().into_iter().collect(),
        };

        let words = artifact.word_count();
        if !BODY_WORDS.contains(&words) {
            warn!(agent = %self.id(), words, "Draft body outside the 100-150 word target");
        }

        Ok(artifact)
    }
}

/// Split model output into an optional headline and the body, dropping any
/// sources section the model wrote anyway.
fn split_draft(content: &str) -> Option<(Option<String>, String)> {
    let mut lines = content
        .lines()
        .take_while(|line| !is_sources_heading(line))
        .skip_while(|line| line.trim().is_empty());

    let first = lines.next()?;
    let rest: Vec<&str> = lines.collect();
    let body = rest.join("\n").trim().to_string();

    if body.is_empty() {
        return Some((None, first.trim().to_string()));
    }
    Some((Some(clean_headline(first)), body))
}

fn clean_headline(line: &str) -> String {
    let line = line.trim().trim_start_matches('#').trim().trim_matches('*').trim();
    let line = match line.get(..9) {
        Some(prefix) if prefix.eq_ignore_ascii_case("headline:") => line[9..].trim(),
        _ => line,
    };
    line.trim_matches('*').trim().to_string()
}

fn is_sources_heading(line: &str) -> bool {
    let cleaned = line
        .trim()
        .trim_start_matches('#')
        .trim()
        .trim_matches('*')
        .trim()
        .to_ascii_lowercase();
    cleaned == "sources" || cleaned == "sources:" || cleaned.starts_with("sources:")
}

#[async_trait]
impl Delegate for WriterAgent {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn description(&self) -> &str {
        "Write a 100-150 word news article with headline and sources from one chosen headline, description and URL."
    }

    fn role(&self) -> TurnRole {
        TurnRole::DraftingDelegate
    }

    async fn handle(&self, input: &str) -> Result<ConversationTurn> {
        let artifact = self.draft(&DraftRequest::from_text(input)).await?;
        Ok(ConversationTurn::drafting(artifact.to_string()))
    }
}
