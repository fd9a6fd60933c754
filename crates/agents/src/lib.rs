//! Delegates the newsdesk coordinator calls as tools.
//!
//! - **News scout** (`news_scout_tool`): looks up candidate headlines for a
//!   topic and returns them in the numbered `Title:/Description:/URL:` block
//!   format.
//! - **Writer** (`writer_tool`): drafts a short article from one chosen
//!   candidate and attaches the source list itself.
//!
//! ```text
//!            topic                      chosen candidate
//!   manager ───────► news scout    manager ─────────────► writer
//!      ▲                 │            ▲                     │
//!      │   candidates    ▼            │      artifact       ▼
//!      └──────────── LookupAdapter    └────────────────── LlmClient
//! ```

pub mod discovery;
pub mod drafting;
pub mod traits;

pub use discovery::{NewsScoutAgent, DEFAULT_MAX_CANDIDATES};
pub use drafting::{Artifact, DraftRequest, SourceLink, WriterAgent, BODY_WORDS, NO_SOURCES_FOUND};
pub use traits::{Delegate, DelegateConfig};
