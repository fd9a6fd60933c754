//! Decides whether the coordinator's latest message is waiting on the human.

use serde::{Deserialize, Serialize};

/// Markers used when none are configured.
pub const DEFAULT_MARKERS: &[&str] = &["which one", "would you like", "yes", "no"];

/// What the loop does after an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnClass {
    NeedsHumanInput,
    Terminal,
}

/// Case-insensitive substring markers.
///
/// The match is a plain substring test, so `no` also fires inside words such
/// as `know` or `now`. That keeps question-shaped coordinator messages on the
/// human side of the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolicitationMarkers {
    markers: Vec<String>,
}

impl SolicitationMarkers {
    /// Empty and whitespace-only markers are dropped.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// The first marker contained in `text`, if any.
    pub fn find(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.markers
            .iter()
            .find(|m| lower.contains(m.as_str()))
            .map(String::as_str)
    }

    pub fn classify(&self, text: &str) -> TurnClass {
        if self.find(text).is_some() {
            TurnClass::NeedsHumanInput
        } else {
            TurnClass::Terminal
        }
    }
}

impl Default for SolicitationMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS)
    }
}
