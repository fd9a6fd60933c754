//! Interactive newsdesk session on the terminal.
//!
//! Usage:
//!   newsdesk
//!   newsdesk --config newsdesk.toml
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY` - model API key (unless set in `[llm]`)
//! - `NEWSAPI_KEY` - NewsAPI key (unless set in `[lookup]`)
//! - `RUST_LOG` - log filter; logs go to stderr

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use newsdesk_coordinator::{NewsdeskConfig, Newsroom, SessionOutcome, StdioHumanIo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DONE: &str = "✅ Done.";

#[derive(Debug, Parser)]
#[command(name = "newsdesk", version, about = "Draft one short news article with a human in the loop")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the config file permission checks
    #[arg(long)]
    no_permission_check: bool,

    /// Override the solicitation markers (repeatable)
    #[arg(long = "marker")]
    markers: Vec<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<NewsdeskConfig> {
    let mut config = match &cli.config {
        Some(path) if cli.no_permission_check => NewsdeskConfig::from_file_unchecked(path)?,
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            NewsdeskConfig::from_file(path)?
        }
        None => NewsdeskConfig::default(),
    };
    if !cli.markers.is_empty() {
        config.workflow.solicitation_markers = cli.markers.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let newsroom = Newsroom::from_config(&config)?;

    let mut io = StdioHumanIo::new();
    let mut session = newsroom.session();
    let outcome = session.run(&mut io).await?;

    match outcome {
        SessionOutcome::Completed { .. } => tracing::info!("Article finished"),
        SessionOutcome::Abandoned => io.say("No input, exiting.").await?,
        SessionOutcome::Failed { error } => anyhow::bail!(error),
    }
    io.say(DONE).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,newsdesk_coordinator=info,newsdesk_agents=info,newsdesk_lookup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "newsdesk session failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
