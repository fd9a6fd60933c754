//! Chat-completion client stack.
//!
//! [`LlmClient`] is the opaque text-generation capability behind both the
//! coordinator and the writer. [`build_llm_client`] wraps the configured
//! provider in retry and concurrency limits; [`ScriptedClient`] stands in for
//! it in tests.

pub mod client;
pub mod config;
pub mod openai;
pub mod retry;
pub mod scripted;

pub use client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, Role, TokenUsage};
pub use config::{build_llm_client, LlmConfig, SemaphoredClient};
pub use openai::OpenAiClient;
pub use retry::{RetryConfig, RetryingClient};
pub use scripted::ScriptedClient;
