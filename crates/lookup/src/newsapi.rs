//! NewsAPI (`newsapi.org`) implementation of [`ArticleSource`].

use std::time::Duration;

use async_trait::async_trait;
use newsdesk_common::{NewsdeskError, Result};
use serde::Deserialize;
use tracing::debug;

use crate::source::{ArticleQuery, ArticleSource, RawArticle};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Option<Vec<RawArticle>>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct NewsApiSource {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl NewsApiSource {
    pub fn new(base_url: Option<String>, api_key: String, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NewsdeskError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            http_client,
        })
    }

    fn query_params(query: &ArticleQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.query.clone()),
            ("language", query.language.clone()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(sort_by) = query.sort_by {
            params.push(("sortBy", sort_by.as_str().to_string()));
        }
        params
    }

    async fn get(&self, endpoint: &str, query: &ArticleQuery) -> Result<Vec<RawArticle>> {
        let url = format!("{}/v2/{}", self.base_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&Self::query_params(query))
            .send()
            .await
            .map_err(|e| NewsdeskError::Transport(format!("NewsAPI request failed: {e}")))?;

        let status = response.status();
        let body: NewsApiResponse = response.json().await.map_err(|e| {
            NewsdeskError::Lookup(format!("Failed to parse NewsAPI response ({status}): {e}"))
        })?;

        debug!(
            endpoint,
            api_status = %body.status,
            total_results = ?body.total_results,
            "NewsAPI response"
        );

        if !status.is_success() || body.status != "ok" {
            let code = body.code.unwrap_or_else(|| status.as_u16().to_string());
            let message = body.message.unwrap_or_else(|| "unknown error".into());
            return Err(NewsdeskError::Lookup(format!("NewsAPI {code}: {message}")));
        }

        Ok(body.articles.unwrap_or_default())
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    async fn top_headlines(&self, query: &ArticleQuery) -> Result<Vec<RawArticle>> {
        self.get("top-headlines", query).await
    }

    async fn everything(&self, query: &ArticleQuery) -> Result<Vec<RawArticle>> {
        self.get("everything", query).await
    }
}
