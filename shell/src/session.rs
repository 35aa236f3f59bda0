//! JSON-lines session.
//!
//! Each input line is one command:
//!
//! ```json
//! {"model": "transactions", "action": "count", "args": {"where": {"type": "expense"}}}
//! ```
//!
//! and each command is answered by one reply line, either `{"ok": <result>}`
//! or `{"error": {"kind": "...", "message": "..."}}`.

use crate::error::Result;
use ledgerdb_engine::{Command, DataProvider, Error};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Reply to one command line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    /// The command's result.
    Ok(Value),
    /// The command failed; the session continues.
    Error(ErrorBody),
}

/// Error details sent back to the caller.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl From<Error> for Reply {
    fn from(error: Error) -> Self {
        Reply::Error(ErrorBody {
            kind: error.kind(),
            message: error.to_string(),
        })
    }
}

/// Serves commands against a data provider.
#[derive(Debug)]
pub struct Session {
    provider: DataProvider,
    pretty: bool,
}

impl Session {
    pub fn new(provider: DataProvider, pretty: bool) -> Self {
        Self { provider, pretty }
    }

    /// Execute one command line.
    pub async fn handle_line(&self, line: &str) -> Reply {
        let command = match Command::from_json(line) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected command line");
                return e.into();
            }
        };

        let model = command.model.clone();
        let action = command.action;
        tracing::debug!(%model, %action, "Executing command");

        match self.provider.execute(command).await {
            Ok(result) => Reply::Ok(result),
            Err(e) => {
                tracing::info!(%model, %action, error = %e, "Command failed");
                e.into()
            }
        }
    }

    /// Serve commands until `reader` is exhausted. Blank lines are skipped.
    ///
    /// Returns the number of commands answered.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut answered = 0;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let reply = self.handle_line(line).await;
            let mut text = self.render(&reply)?;
            text.push('\n');
            writer.write_all(text.as_bytes()).await?;
            writer.flush().await?;
            answered += 1;
        }

        Ok(answered)
    }

    fn render(&self, reply: &Reply) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(reply)?
        } else {
            serde_json::to_string(reply)?
        };
        Ok(text)
    }
}
