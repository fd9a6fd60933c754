//! Common types shared across newsdesk crates.
//!
//! This crate provides the error type, the conversation turn model and the
//! candidate-record text format that the delegates and the coordination loop
//! exchange.

pub mod candidate;
pub mod error;
pub mod turn;

pub use candidate::{parse_candidates, render_candidates, CandidateRecord};
pub use error::{NewsdeskError, Result};
pub use turn::{ConversationTurn, TurnRole};
