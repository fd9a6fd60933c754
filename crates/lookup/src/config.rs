use std::sync::Arc;
use std::time::Duration;

use newsdesk_common::{NewsdeskError, Result};
use serde::{Deserialize, Serialize};

use crate::adapter::LookupAdapter;
use crate::newsapi::{NewsApiSource, DEFAULT_BASE_URL};

/// Environment variable consulted when no key is configured.
pub const NEWSAPI_KEY_ENV: &str = "NEWSAPI_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// NewsAPI key; falls back to `NEWSAPI_KEY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub api_url: String,

    /// Language tag passed to every query
    pub language: String,

    /// Records requested per query and the cap on merged results
    pub page_size: usize,

    pub timeout_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_BASE_URL.into(),
            language: "en".into(),
            page_size: 6,
            timeout_ms: 10_000,
        }
    }
}

impl LookupConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var(NEWSAPI_KEY_ENV).ok().filter(|k| !k.is_empty())
    }

    /// Build a NewsAPI-backed adapter.
    pub fn build_adapter(&self) -> Result<LookupAdapter> {
        let api_key = self.resolve_api_key().ok_or_else(|| {
            NewsdeskError::Config(format!(
                "No NewsAPI key configured; set lookup.api_key or {NEWSAPI_KEY_ENV}"
            ))
        })?;
        if self.page_size == 0 {
            return Err(NewsdeskError::Config("lookup.page_size must be at least 1".into()));
        }

        let source = NewsApiSource::new(
            Some(self.api_url.clone()),
            api_key,
            Duration::from_millis(self.timeout_ms),
        )?;
        Ok(LookupAdapter::new(
            Arc::new(source),
            self.language.clone(),
            self.page_size,
        ))
    }
}
