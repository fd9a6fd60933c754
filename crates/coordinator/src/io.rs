//! Where the session meets the human.

use async_trait::async_trait;
use newsdesk_common::{ConversationTurn, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

pub const TOPIC_PROMPT: &str = "Enter a topic you would like to write an article about:\n> ";
pub const REPLY_PROMPT: &str = "Your response:\n> ";

/// Human side of a session. `None` from a read means end of input.
#[async_trait]
pub trait HumanIo: Send {
    async fn read_topic(&mut self) -> Result<Option<String>>;

    async fn read_reply(&mut self) -> Result<Option<String>>;

    /// Present one agent turn.
    async fn show(&mut self, turn: &ConversationTurn) -> Result<()>;
}

/// Terminal I/O: prompts and turns on stdout, lines from stdin.
pub struct StdioHumanIo {
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl StdioHumanIo {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            stdout: tokio::io::stdout(),
        }
    }

    async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        self.stdout.write_all(prompt.as_bytes()).await?;
        self.stdout.flush().await?;
        Ok(self.lines.next_line().await?)
    }

    /// Print a plain status line such as the completion marker.
    pub async fn say(&mut self, line: &str) -> Result<()> {
        self.stdout.write_all(format!("{line}\n").as_bytes()).await?;
        self.stdout.flush().await?;
        Ok(())
    }
}

impl Default for StdioHumanIo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HumanIo for StdioHumanIo {
    async fn read_topic(&mut self) -> Result<Option<String>> {
        self.prompt(TOPIC_PROMPT).await
    }

    async fn read_reply(&mut self) -> Result<Option<String>> {
        self.prompt(REPLY_PROMPT).await
    }

    async fn show(&mut self, turn: &ConversationTurn) -> Result<()> {
        self.say(&turn.labeled()).await
    }
}
