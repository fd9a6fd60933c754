//! The opaque article-search capability behind the lookup adapter.

use async_trait::async_trait;
use newsdesk_common::Result;
use serde::{Deserialize, Serialize};

/// Ordering requested from the search capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Relevancy,
    Popularity,
    PublishedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevancy => "relevancy",
            Self::Popularity => "popularity",
            Self::PublishedAt => "publishedAt",
        }
    }
}

/// One search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub query: String,
    pub language: String,
    pub page_size: usize,
    pub sort_by: Option<SortBy>,
}

impl ArticleQuery {
    pub fn new(query: impl Into<String>, language: impl Into<String>, page_size: usize) -> Self {
        Self {
            query: query.into(),
            language: language.into(),
            page_size,
            sort_by: None,
        }
    }

    pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

/// An article as the search capability returns it; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawArticle {
    pub fn new(title: &str, description: &str, url: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            url: Some(url.to_string()),
        }
    }
}

/// Ranked article search with a narrow and a broad query mode.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Current top headlines matching the query.
    async fn top_headlines(&self, query: &ArticleQuery) -> Result<Vec<RawArticle>>;

    /// Search across all indexed articles, used to broaden thin results.
    async fn everything(&self, query: &ArticleQuery) -> Result<Vec<RawArticle>>;
}
