use crate::adapter::RecordBatch;
use crate::feed::RecordFeed;
use serde::Deserialize;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

/// One line of a line-delimited feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FeedLine {
    Batch(RecordBatch),
    Command { command: String },
}

/// A feed reading one JSON value per line from an async reader.
///
/// Record batches are yielded to the session. Lines of the form
/// `{"command": "..."}` are parsed into `T` and forwarded to the command
/// sender when one is attached, dropped otherwise. Malformed lines are
/// logged and skipped. The sender is released once the reader is exhausted.
pub struct NdjsonFeed<R, T = String> {
    lines: Lines<R>,
    commands: Option<mpsc::Sender<T>>,
    line_no: usize,
}

impl<R: AsyncBufRead + Unpin + Send> NdjsonFeed<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), commands: None, line_no: 0 }
    }
}

impl<R: AsyncBufRead + Unpin + Send, T: FromStr + Send> NdjsonFeed<R, T> {
    pub fn with_commands(reader: R, commands: mpsc::Sender<T>) -> Self {
        Self { lines: reader.lines(), commands: Some(commands), line_no: 0 }
    }

    async fn forward(&mut self, name: String) {
        let Some(sender) = &self.commands else {
            log::debug!("No command sink attached, dropping '{}'", name);
            return;
        };
        let Ok(command) = name.parse::<T>() else {
            log::warn!("Unknown command '{}' on line {}", name, self.line_no);
            return;
        };
        if sender.send(command).await.is_err() {
            log::warn!("Command receiver closed; ignoring further commands");
            self.commands = None;
            return;
        }
        // Let the receiver act on the command before the next line is read.
        tokio::task::yield_now().await;
    }
}

impl<R: AsyncBufRead + Unpin + Send, T: FromStr + Send> RecordFeed for NdjsonFeed<R, T> {
    async fn next_batch(&mut self) -> Option<RecordBatch> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.commands = None;
                    return None;
                }
                Err(e) => {
                    log::warn!("Stopped reading feed after line {}: {}", self.line_no, e);
                    self.commands = None;
                    return None;
                }
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<FeedLine>(&line) {
                Ok(FeedLine::Batch(batch)) => return Some(batch),
                Ok(FeedLine::Command { command }) => self.forward(command).await,
                Err(e) => log::warn!("Skipping malformed line {}: {}", self.line_no, e),
            }
        }
    }

    fn name(&self) -> &'static str {
        "ndjson"
    }
}
