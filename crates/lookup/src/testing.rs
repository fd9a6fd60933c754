//! In-memory [`ArticleSource`] for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use newsdesk_common::{NewsdeskError, Result};

use crate::source::{ArticleQuery, ArticleSource, RawArticle};

/// Serves fixed primary and fallback result lists and counts calls.
#[derive(Default)]
pub struct StaticSource {
    primary: Vec<RawArticle>,
    fallback: Vec<RawArticle>,
    failure: Option<String>,
    primary_calls: AtomicUsize,
    fallback_calls: AtomicUsize,
    queries: Mutex<Vec<ArticleQuery>>,
}

impl StaticSource {
    pub fn new(primary: Vec<RawArticle>, fallback: Vec<RawArticle>) -> Self {
        Self {
            primary,
            fallback,
            ..Default::default()
        }
    }

    /// A source whose every query fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn primary_calls(&self) -> usize {
        self.primary_calls.load(Ordering::SeqCst)
    }

    pub fn fallback_calls(&self) -> usize {
        self.fallback_calls.load(Ordering::SeqCst)
    }

    /// Every query received, in order.
    pub fn queries(&self) -> Vec<ArticleQuery> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn serve(&self, query: &ArticleQuery, articles: &[RawArticle]) -> Result<Vec<RawArticle>> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());
        if let Some(ref message) = self.failure {
            return Err(NewsdeskError::Lookup(message.clone()));
        }
        Ok(articles.iter().take(query.page_size).cloned().collect())
    }
}

#[async_trait]
impl ArticleSource for StaticSource {
    async fn top_headlines(&self, query: &ArticleQuery) -> Result<Vec<RawArticle>> {
        self.primary_calls.fetch_add(1, Ordering::SeqCst);
        self.serve(query, &self.primary)
    }

    async fn everything(&self, query: &ArticleQuery) -> Result<Vec<RawArticle>> {
        self.fallback_calls.fetch_add(1, Ordering::SeqCst);
        self.serve(query, &self.fallback)
    }
}
