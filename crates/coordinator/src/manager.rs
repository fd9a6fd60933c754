//! LLM-backed manager that drives the scout and writer through JSON directives.
//!
//! Each model reply is scanned for one JSON object:
//!
//! ```text
//! {"action":"news_scout_tool","topic":"..."}
//! {"action":"writer_tool","headline":"...","description":"...","url":"..."}
//! {"action":"respond","message":"..."}
//! ```
//!
//! Tool results are fed back to the model and recorded as delegate turns; a
//! `respond` directive (or a reply with no JSON at all) ends the invocation
//! with a coordinator turn.

use std::sync::Arc;

use async_trait::async_trait;
use newsdesk_agents::Delegate;
use newsdesk_common::{CandidateRecord, ConversationTurn, NewsdeskError, Result};
use newsdesk_llm::{ChatMessage, LlmClient, LlmRequest};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::reasoner::Reasoner;

const SCOUT_TOOL: &str = "news_scout_tool";
const WRITER_TOOL: &str = "writer_tool";
const RESPOND: &str = "respond";

/// Actions the manager accepts from the model.
const VALID_ACTIONS: &[&str] = &[SCOUT_TOOL, WRITER_TOOL, RESPOND];

const MAX_MESSAGE_LENGTH: usize = 8_000;

fn system_prompt(publication: &str, tools: &[Arc<dyn Delegate>]) -> String {
    let tool_lines: Vec<String> = tools
        .iter()
        .map(|t| format!("- {}: {}", t.id(), t.description()))
        .collect();

    format!(
        r#"You are the manager agent of a multi-agent content creation system called '{publication}'. Your goal is to publish one original news-style article for a specific user.

You can call these tools:
{tools}

Your job is:
1. Take the user's topic and find headlines from recent news: call news_scout_tool with the topic.
2. Present at most 5 headlines to the user. If 5 headlines are available, present 5, then ask "Which one?"
3. On choice, call writer_tool with the chosen headline, description and URL exactly as the news scout returned them.
4. Present the article to the user.
5. Ask the user if they're satisfied or want edits.

Reply with exactly one JSON object and no other text:
{{"action":"news_scout_tool","topic":"<topic>"}}
{{"action":"writer_tool","headline":"<title>","description":"<description>","url":"<url>"}}
{{"action":"respond","message":"<what to tell the user>"}}"#,
        publication = publication,
        tools = tool_lines.join("\n"),
    )
}

/// One parsed model directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Scout { topic: String },
    Write(CandidateRecord),
    Respond(String),
}

impl Directive {
    /// Parse a model reply. Never fails: anything unusable becomes a
    /// `Respond` carrying the reply text.
    pub fn parse(reply: &str) -> Self {
        let Some(json) = extract_json_object(reply) else {
            return Self::Respond(reply.trim().to_string());
        };
        let parsed: Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Invalid JSON directive, treating reply as a message");
                return Self::Respond(reply.trim().to_string());
            }
        };

        let field = |name: &str| {
            parsed
                .get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };

        let action = parsed.get("action").and_then(Value::as_str).unwrap_or(RESPOND);
        let action = if VALID_ACTIONS.contains(&action) {
            action
        } else {
            warn!(invalid_action = action, "Unknown action in directive, falling back to respond");
            RESPOND
        };

        match action {
            SCOUT_TOOL => Self::Scout { topic: field("topic") },
            WRITER_TOOL => Self::Write(CandidateRecord::new(
                field("headline"),
                field("description"),
                field("url"),
            )),
            _ => {
                let message = field("message");
                let message = if message.is_empty() {
                    reply.trim().to_string()
                } else {
                    message
                };
                Self::Respond(message.chars().take(MAX_MESSAGE_LENGTH).collect())
            }
        }
    }
}

/// Extract the first balanced JSON object from a string that may contain
/// other text.
fn extract_json_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// The manager reasoner.
pub struct ManagerAgent {
    llm: Arc<dyn LlmClient>,
    scout: Arc<dyn Delegate>,
    writer: Arc<dyn Delegate>,
    publication: String,
    max_tool_calls: usize,
    temperature: Option<f32>,
}

impl ManagerAgent {
    pub fn new(llm: Arc<dyn LlmClient>, scout: Arc<dyn Delegate>, writer: Arc<dyn Delegate>) -> Self {
        Self {
            llm,
            scout,
            writer,
            publication: "Daily Danny".into(),
            max_tool_calls: 4,
            temperature: None,
        }
    }

    pub fn with_publication(mut self, publication: impl Into<String>) -> Self {
        self.publication = publication.into();
        self
    }

    pub fn with_max_tool_calls(mut self, max_tool_calls: usize) -> Self {
        self.max_tool_calls = max_tool_calls;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    async fn call_tool(&self, directive: &Directive) -> Result<ConversationTurn> {
        match directive {
            Directive::Scout { topic } => {
                if topic.is_empty() {
                    return Err(NewsdeskError::Coordination(
                        "news_scout_tool called without a topic".into(),
                    ));
                }
                self.scout.handle(topic).await
            }
            Directive::Write(record) => {
                if record.title.is_empty() {
                    return Err(NewsdeskError::Coordination(
                        "writer_tool called without a headline".into(),
                    ));
                }
                self.writer.handle(&record.render(None)).await
            }
            Directive::Respond(_) => Err(NewsdeskError::Coordination(
                "respond is not a tool".into(),
            )),
        }
    }
}

#[async_trait]
impl Reasoner for ManagerAgent {
    async fn invoke(&self, context: &str) -> Result<Vec<ConversationTurn>> {
        let system = system_prompt(&self.publication, &[self.scout.clone(), self.writer.clone()]);
        let mut messages = vec![ChatMessage::user(context)];
        let mut produced = Vec::new();
        let mut tool_calls = 0usize;

        info!(context_len = context.len(), "Manager invocation");

        loop {
            let request = messages
                .iter()
                .cloned()
                .fold(LlmRequest::new(&system), LlmRequest::with_message)
                .with_temperature(self.temperature);

            let reply = self.llm.complete(request).await?.content;
            let directive = Directive::parse(&reply);
            debug!(directive = ?directive, "Manager directive");

            if let Directive::Respond(message) = directive {
                if message.is_empty() {
                    return Err(NewsdeskError::Coordination(
                        "manager produced an empty message".into(),
                    ));
                }
                produced.push(ConversationTurn::coordinator(message));
                return Ok(produced);
            }

            if tool_calls >= self.max_tool_calls {
                return Err(NewsdeskError::Coordination(format!(
                    "manager exceeded {} tool calls in one invocation",
                    self.max_tool_calls
                )));
            }
            tool_calls += 1;

            let turn = self.call_tool(&directive).await?;
            info!(tool_calls, role = turn.role.label(), "Delegate returned");

            messages.push(ChatMessage::assistant(reply));
            messages.push(ChatMessage::user(turn.labeled()));
            produced.push(turn);
        }
    }
}
