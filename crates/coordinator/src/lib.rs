//! Coordination loop for the newsdesk workflow.
//!
//! A [`Session`] hands the accumulated conversation to a [`Reasoner`] (in
//! production the [`ManagerAgent`], which calls the news scout and writer),
//! classifies the last produced turn, and either waits for the human or
//! finishes with the article.
//!
//! ```text
//! Human ──topic/reply──► Session ──context──► ManagerAgent ──► news_scout_tool
//!   ▲                       │                      │        └─► writer_tool
//!   └────agent turns────────┘◄──────turns──────────┘
//! ```

pub mod classify;
pub mod config;
pub mod conversation;
pub mod io;
pub mod manager;
pub mod newsroom;
pub mod reasoner;
pub mod session;
pub mod testing;

pub use classify::{SolicitationMarkers, TurnClass, DEFAULT_MARKERS};
pub use config::{NewsdeskConfig, WorkflowConfig};
pub use conversation::ConversationState;
pub use io::{HumanIo, StdioHumanIo};
pub use manager::{Directive, ManagerAgent};
pub use newsroom::Newsroom;
pub use reasoner::Reasoner;
pub use session::{transition, Event, Session, SessionOutcome, SessionState, StepReport};
