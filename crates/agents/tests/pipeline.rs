//! Scout-then-writer pipeline with scripted lookup and model.

use std::sync::Arc;

use newsdesk_agents::{Delegate, DraftRequest, NewsScoutAgent, WriterAgent};
use newsdesk_common::{parse_candidates, TurnRole};
use newsdesk_llm::ScriptedClient;
use newsdesk_lookup::testing::StaticSource;
use newsdesk_lookup::{LookupAdapter, RawArticle};

fn articles(n: usize) -> Vec<RawArticle> {
    (1..=n)
        .map(|i| {
            RawArticle::new(
                &format!("AI story {i}"),
                &format!("Summary of AI story {i}"),
                &format!("https://news.test/ai/{i}"),
            )
        })
        .collect()
}

fn words(n: usize) -> String {
    vec!["fact"; n].join(" ")
}

#[tokio::test]
async fn second_headline_reaches_the_writer() {
    let source = Arc::new(StaticSource::new(articles(6), vec![]));
    let adapter = Arc::new(LookupAdapter::new(source, "en", 6));
    let scout = NewsScoutAgent::new(adapter);

    let listing = scout.handle("AI").await.unwrap();
    assert_eq!(listing.role, TurnRole::DiscoveryDelegate);

    let candidates = parse_candidates(&listing.text);
    assert_eq!(candidates.len(), 5);

    let llm = Arc::new(ScriptedClient::new([format!(
        "AI story 2 moves forward\n\n{}",
        words(130)
    )]));
    let writer = WriterAgent::with_default_config(llm.clone());

    let chosen = DraftRequest::from(candidates[1].clone());
    let artifact = writer.draft(&chosen).await.unwrap();

    assert!((100..=150).contains(&artifact.word_count()));
    assert_eq!(artifact.sources.len(), 1);
    assert_eq!(artifact.sources[0].url, "https://news.test/ai/2");

    let prompt = llm.requests()[0].last_user_content().unwrap().to_string();
    assert!(prompt.contains("Title: AI story 2"));
    assert!(prompt.contains("Description: Summary of AI story 2"));
    assert!(prompt.contains("URL: https://news.test/ai/2"));
}

#[tokio::test]
async fn writer_accepts_raw_candidate_block() {
    let llm = Arc::new(ScriptedClient::new([format!("Headline\n\n{}", words(100))]));
    let writer = WriterAgent::with_default_config(llm);

    let turn = writer
        .handle("3) Title: Quantum chips\nDescription: A lab result\nURL: https://news.test/q")
        .await
        .unwrap();

    assert!(turn.text.starts_with("# Headline"));
    assert!(turn.text.ends_with("**Sources**\n- [Quantum chips](https://news.test/q)"));
}
