//! Lookup adapter: primary query, fallback broadening and text rendering.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use newsdesk_common::{render_candidates, CandidateRecord, Result};
use tracing::{debug, info, warn};

use crate::source::{ArticleQuery, ArticleSource, RawArticle, SortBy};

/// Returned in place of a candidate list when both queries come back empty.
pub const NO_ARTICLES_FOUND: &str =
    "No articles found for this topic. Try a broader or different topic.";

const NO_TITLE: &str = "[No Title]";
const NO_DESCRIPTION: &str = "[No Description]";

/// What a lookup produced, with failures already turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Vec<CandidateRecord>),
    Empty,
    Failed(String),
}

impl LookupOutcome {
    /// Render for a delegate: numbered blocks, the empty sentinel, or the
    /// error text.
    pub fn to_text(&self) -> String {
        match self {
            Self::Found(records) => render_candidates(records, true),
            Self::Empty => NO_ARTICLES_FOUND.to_string(),
            Self::Failed(reason) => format!("Error fetching news: {reason}"),
        }
    }

    pub fn records(&self) -> &[CandidateRecord] {
        match self {
            Self::Found(records) => records,
            _ => &[],
        }
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Wraps an [`ArticleSource`] and normalizes its results into
/// [`CandidateRecord`]s.
pub struct LookupAdapter {
    source: Arc<dyn ArticleSource>,
    language: String,
    page_size: usize,
}

impl LookupAdapter {
    pub fn new(source: Arc<dyn ArticleSource>, language: impl Into<String>, page_size: usize) -> Self {
        Self {
            source,
            language: language.into(),
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch up to `page_size` unique records for `topic`.
    ///
    /// When the top-headlines query yields fewer than `page_size` unique
    /// records, one relevancy-sorted search is issued and its new URLs are
    /// appended after the primary results.
    pub async fn fetch(&self, topic: &str) -> Result<Vec<CandidateRecord>> {
        let query = ArticleQuery::new(topic, self.language.clone(), self.page_size);

        info!(topic = %topic, page_size = self.page_size, "Fetching headlines");
        let primary = self.source.top_headlines(&query).await?;

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(self.page_size);
        merge_unique(&mut records, &mut seen, primary, self.page_size);

        if records.len() < self.page_size {
            debug!(
                topic = %topic,
                primary = records.len(),
                "Not enough headlines, broadening search"
            );
            let fallback = self
                .source
                .everything(&query.sorted_by(SortBy::Relevancy))
                .await?;
            merge_unique(&mut records, &mut seen, fallback, self.page_size);
        }

        info!(topic = %topic, found = records.len(), "Lookup finished");
        Ok(records)
    }

    /// Like [`fetch`](Self::fetch), but never fails: errors and empty result
    /// sets come back as their own outcomes.
    pub async fn lookup(&self, topic: &str) -> LookupOutcome {
        match self.fetch(topic).await {
            Ok(records) if records.is_empty() => LookupOutcome::Empty,
            Ok(records) => LookupOutcome::Found(records),
            Err(e) => {
                warn!(topic = %topic, error = %e, "Lookup failed");
                LookupOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Append normalized articles whose URL has not been seen, up to `limit`.
///
/// Articles without a URL are dropped: the URL is what the writer cites.
fn merge_unique(
    records: &mut Vec<CandidateRecord>,
    seen: &mut HashSet<String>,
    articles: Vec<RawArticle>,
    limit: usize,
) {
    for article in articles {
        if records.len() >= limit {
            break;
        }
        let Some(record) = normalize(article) else {
            continue;
        };
        if seen.insert(record.url.clone()) {
            records.push(record);
        }
    }
}

fn normalize(article: RawArticle) -> Option<CandidateRecord> {
    let url = article.url.filter(|u| !u.trim().is_empty())?;
    let title = article
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());
    let description = article
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    Some(CandidateRecord::new(title, description, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticSource;
    use newsdesk_common::parse_candidates;
    use proptest::prelude::*;

    fn article(n: usize) -> RawArticle {
        RawArticle::new(
            &format!("Headline {n}"),
            &format!("Description {n}"),
            &format!("https://news.test/{n}"),
        )
    }

    fn articles(range: std::ops::Range<usize>) -> Vec<RawArticle> {
        range.map(article).collect()
    }

    #[tokio::test]
    async fn full_primary_page_skips_fallback() {
        let source = Arc::new(StaticSource::new(articles(0..6), articles(10..16)));
        let adapter = LookupAdapter::new(source.clone(), "en", 6);

        let records = adapter.fetch("AI").await.unwrap();

        assert_eq!(records.len(), 6);
        assert_eq!(source.fallback_calls(), 0);
        assert_eq!(source.primary_calls(), 1);
    }

    #[tokio::test]
    async fn thin_primary_is_broadened_once_without_duplicates() {
        let mut fallback = articles(0..2);
        fallback.extend(articles(10..20));
        let source = Arc::new(StaticSource::new(articles(0..3), fallback));
        let adapter = LookupAdapter::new(source.clone(), "en", 6);

        let records = adapter.fetch("AI").await.unwrap();

        assert_eq!(source.fallback_calls(), 1);
        assert_eq!(records.len(), 6);
        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://news.test/0",
                "https://news.test/1",
                "https://news.test/2",
                "https://news.test/10",
                "https://news.test/11",
                "https://news.test/12",
            ]
        );
    }

    #[tokio::test]
    async fn fallback_uses_relevancy_and_same_language() {
        let source = Arc::new(StaticSource::new(vec![], vec![]));
        let adapter = LookupAdapter::new(source.clone(), "en", 5);

        adapter.fetch("rust").await.unwrap();

        let queries = source.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].sort_by, None);
        assert_eq!(queries[1].sort_by, Some(SortBy::Relevancy));
        assert_eq!(queries[1].language, "en");
        assert_eq!(queries[1].page_size, 5);
    }

    #[tokio::test]
    async fn missing_fields_get_placeholders_and_urlless_articles_are_dropped() {
        let primary = vec![
            RawArticle {
                title: None,
                description: Some("  ".into()),
                url: Some("https://news.test/a".into()),
            },
            RawArticle {
                title: Some("No link".into()),
                description: Some("d".into()),
                url: None,
            },
        ];
        let source = Arc::new(StaticSource::new(primary, vec![]));
        let adapter = LookupAdapter::new(source, "en", 6);

        let records = adapter.fetch("AI").await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "[No Title]");
        assert_eq!(records[0].description, "[No Description]");
    }

    #[tokio::test]
    async fn empty_results_yield_sentinel() {
        let source = Arc::new(StaticSource::new(vec![], vec![]));
        let adapter = LookupAdapter::new(source.clone(), "en", 6);

        let outcome = adapter.lookup("zzzz").await;

        assert_eq!(outcome, LookupOutcome::Empty);
        assert_eq!(outcome.to_text(), NO_ARTICLES_FOUND);
        assert_eq!(source.fallback_calls(), 1);
    }

    #[tokio::test]
    async fn source_failure_becomes_text() {
        let source = Arc::new(StaticSource::failing("rateLimited: too many requests"));
        let adapter = LookupAdapter::new(source, "en", 6);

        let outcome = adapter.lookup("AI").await;

        let text = outcome.to_text();
        assert!(matches!(outcome, LookupOutcome::Failed(_)));
        assert!(text.starts_with("Error fetching news: "));
        assert!(text.contains("rateLimited"));
    }

    #[tokio::test]
    async fn found_text_is_numbered_and_parseable() {
        let source = Arc::new(StaticSource::new(articles(1..3), vec![]));
        let adapter = LookupAdapter::new(source, "en", 2);

        let outcome = adapter.lookup("AI").await;
        let text = outcome.to_text();

        assert!(text.starts_with("1) Title: Headline 1\n"));
        assert_eq!(parse_candidates(&text), outcome.records());
    }

    proptest! {
        #[test]
        fn merged_results_never_repeat_urls(
            primary in prop::collection::vec(0usize..12, 0..10),
            fallback in prop::collection::vec(0usize..12, 0..10),
            page_size in 1usize..8,
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let source = Arc::new(StaticSource::new(
                primary.iter().copied().map(article).collect(),
                fallback.iter().copied().map(article).collect(),
            ));
            let adapter = LookupAdapter::new(source.clone(), "en", page_size);

            let records = runtime.block_on(adapter.fetch("AI")).unwrap();

            let unique: HashSet<&str> = records.iter().map(|r| r.url.as_str()).collect();
            prop_assert_eq!(unique.len(), records.len());
            prop_assert!(records.len() <= page_size);

            let distinct_primary: HashSet<usize> = primary.iter().copied().collect();
            let expected_fallback_calls = usize::from(distinct_primary.len() < page_size);
            prop_assert_eq!(source.fallback_calls(), expected_fallback_calls);
        }
    }
}
