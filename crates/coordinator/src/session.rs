//! The coordination loop.
//!
//! ```text
//! AwaitingTopic ──topic──► Running ──question──► AwaitingHumanInput
//!      │                    │  ▲                        │
//!      │ blank              │  └────────reply───────────┤
//!      ▼                    ▼ statement / failure        │ blank or EOF
//!   Terminal ◄──────────────┴────────────────────────────┘
//! ```
//!
//! [`transition`] is pure; [`Session`] performs the invocations and owns the
//! conversation.

use std::fmt;
use std::sync::Arc;

use newsdesk_common::{ConversationTurn, NewsdeskError, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::{SolicitationMarkers, TurnClass};
use crate::conversation::ConversationState;
use crate::io::HumanIo;
use crate::reasoner::Reasoner;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    AwaitingTopic,
    Running,
    AwaitingHumanInput,
    Terminal { outcome: SessionOutcome },
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingTopic => "awaiting_topic",
            Self::Running => "running",
            Self::AwaitingHumanInput => "awaiting_human_input",
            Self::Terminal { .. } => "terminal",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The coordinator stopped asking; its last text is the article.
    Completed { artifact: String },
    /// The human gave no input.
    Abandoned,
    /// The reasoning capability failed.
    Failed { error: String },
}

impl SessionOutcome {
    pub fn artifact(&self) -> Option<&str> {
        match self {
            Self::Completed { artifact } => Some(artifact),
            _ => None,
        }
    }
}

/// Inputs to [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TopicSubmitted { blank: bool },
    Invoked { class: TurnClass, last_text: String },
    InvocationFailed { error: String },
    HumanReplied { blank: bool },
}

/// Next state for `event` in `state`.
pub fn transition(state: &SessionState, event: Event) -> Result<SessionState> {
    use SessionState::*;

    match (state, event) {
        (AwaitingTopic, Event::TopicSubmitted { blank: true }) => Ok(Terminal {
            outcome: SessionOutcome::Abandoned,
        }),
        (AwaitingTopic, Event::TopicSubmitted { blank: false }) => Ok(Running),

        (Running, Event::Invoked { class: TurnClass::NeedsHumanInput, .. }) => {
            Ok(AwaitingHumanInput)
        }
        (Running, Event::Invoked { class: TurnClass::Terminal, last_text }) => Ok(Terminal {
            outcome: SessionOutcome::Completed { artifact: last_text },
        }),
        (Running, Event::InvocationFailed { error }) => Ok(Terminal {
            outcome: SessionOutcome::Failed { error },
        }),

        (AwaitingHumanInput, Event::HumanReplied { blank: true }) => Ok(Terminal {
            outcome: SessionOutcome::Abandoned,
        }),
        (AwaitingHumanInput, Event::HumanReplied { blank: false }) => Ok(Running),

        (state, event) => Err(NewsdeskError::Coordination(format!(
            "invalid transition: {event:?} in state {state}"
        ))),
    }
}

/// What one call into the session produced.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub state: SessionState,
    pub new_turns: Vec<ConversationTurn>,
}

impl StepReport {
    pub fn artifact(&self) -> Option<&str> {
        match &self.state {
            SessionState::Terminal { outcome } => outcome.artifact(),
            _ => None,
        }
    }
}

/// One human's conversation with the coordinator.
pub struct Session {
    reasoner: Arc<dyn Reasoner>,
    markers: SolicitationMarkers,
    state: SessionState,
    conversation: Option<ConversationState>,
}

impl Session {
    pub fn new(reasoner: Arc<dyn Reasoner>, markers: SolicitationMarkers) -> Self {
        Self {
            reasoner,
            markers,
            state: SessionState::AwaitingTopic,
            conversation: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Turns so far. Empty before a topic and after the session ends.
    pub fn transcript(&self) -> &[ConversationTurn] {
        self.conversation
            .as_ref()
            .map(ConversationState::turns)
            .unwrap_or_default()
    }

    fn advance(&mut self, event: Event) -> Result<()> {
        let next = transition(&self.state, event)?;
        debug!(from = %self.state, to = %next, "Session transition");
        if next.is_terminal() {
            self.conversation = None;
        }
        self.state = next;
        Ok(())
    }

    /// Start the session. A blank topic ends it before any invocation.
    pub async fn submit_topic(&mut self, topic: &str) -> Result<StepReport> {
        let blank = topic.trim().is_empty();
        self.advance(Event::TopicSubmitted { blank })?;
        if blank {
            info!("No topic given, abandoning session");
            return Ok(self.report(Vec::new()));
        }

        self.conversation = Some(ConversationState::new(topic)?);
        self.step().await
    }

    /// Fold in a human reply and continue. A blank reply ends the session.
    pub async fn reply(&mut self, text: &str) -> Result<StepReport> {
        let text = text.trim();
        let blank = text.is_empty();
        self.advance(Event::HumanReplied { blank })?;
        if blank {
            info!("No reply given, abandoning session");
            return Ok(self.report(Vec::new()));
        }

        if let Some(conversation) = self.conversation.as_mut() {
            conversation.push(ConversationTurn::human(text));
        }
        self.step().await
    }

    /// One coordinator invocation over the full accumulated context.
    async fn step(&mut self) -> Result<StepReport> {
        let conversation = self.conversation.as_mut().ok_or_else(|| {
            NewsdeskError::Coordination("running session has no conversation".into())
        })?;

        let context = conversation.render_context();
        info!(turns = conversation.len(), "Invoking coordinator");

        let produced = match self.reasoner.invoke(&context).await {
            Ok(turns) if turns.is_empty() => Err(NewsdeskError::Coordination(
                "coordinator produced no turns".into(),
            )),
            other => other,
        };

        let turns = match produced {
            Ok(turns) => turns,
            Err(e) => {
                warn!(error = %e, "Coordinator invocation failed");
                self.advance(Event::InvocationFailed { error: e.to_string() })?;
                return Err(e);
            }
        };

        conversation.extend(turns.iter().cloned());

        let last_text = turns
            .last()
            .map(|t| t.text.clone())
            .unwrap_or_default();
        let class = self.markers.classify(&last_text);
        info!(new_turns = turns.len(), class = ?class, "Coordinator step finished");

        self.advance(Event::Invoked { class, last_text })?;
        Ok(self.report(turns))
    }

    fn report(&self, new_turns: Vec<ConversationTurn>) -> StepReport {
        StepReport {
            state: self.state.clone(),
            new_turns,
        }
    }

    /// Drive the whole session against a human at `io`.
    pub async fn run(&mut self, io: &mut dyn HumanIo) -> Result<SessionOutcome> {
        let topic = io.read_topic().await?.unwrap_or_default();
        let mut report = self.submit_topic(&topic).await?;

        loop {
            for turn in report.new_turns.iter().filter(|t| t.role.is_agent()) {
                io.show(turn).await?;
            }

            match &report.state {
                SessionState::Terminal { outcome } => return Ok(outcome.clone()),
                SessionState::AwaitingHumanInput => {
                    let reply = io.read_reply().await?.unwrap_or_default();
                    report = self.reply(&reply).await?;
                }
                other => {
                    return Err(NewsdeskError::Coordination(format!(
                        "session stopped in state {other}"
                    )))
                }
            }
        }
    }
}
