//! News lookup for the discovery delegate.
//!
//! [`LookupAdapter`] runs a top-headlines query against an [`ArticleSource`],
//! broadens with one relevancy search when the page is not filled, and
//! normalizes the merged, URL-deduplicated results into
//! [`CandidateRecord`](newsdesk_common::CandidateRecord)s. Failures never
//! escape [`LookupAdapter::lookup`]; they come back as text.

pub mod adapter;
pub mod config;
pub mod newsapi;
pub mod source;
pub mod testing;

pub use adapter::{LookupAdapter, LookupOutcome, NO_ARTICLES_FOUND};
pub use config::LookupConfig;
pub use newsapi::NewsApiSource;
pub use source::{ArticleQuery, ArticleSource, RawArticle, SortBy};
