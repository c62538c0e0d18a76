use crate::adapter::RecordBatch;
use crate::error::SourceError;
use serde_json::Value;
use std::collections::VecDeque;
use std::future::Future;
use std::path::Path;
use tokio::sync::mpsc;

/// A trait for sources that deliver table records to the session.
///
/// This abstraction allows the session to work with:
/// - A one-shot JSON snapshot of the host tables
/// - Live updates pushed through an async channel
/// - In-memory batches for tests and manual mode
pub trait RecordFeed: Send {
    /// Waits for the next batch.
    ///
    /// Returns `None` once the feed is exhausted. The session keeps serving
    /// commands after that, on the data it already holds.
    fn next_batch(&mut self) -> impl Future<Output = Option<RecordBatch>> + Send;

    /// Returns a human-readable name for this feed (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A feed backed by batches already in memory.
#[derive(Debug, Default)]
pub struct VecFeed {
    batches: VecDeque<RecordBatch>,
}

impl VecFeed {
    pub fn new(batches: Vec<RecordBatch>) -> Self {
        Self { batches: batches.into() }
    }

    /// A feed that never delivers anything: the host is unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of batches remaining.
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl RecordFeed for VecFeed {
    async fn next_batch(&mut self) -> Option<RecordBatch> {
        self.batches.pop_front()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// A snapshot of the host tables loaded from a JSON document of the form
/// `{ "<table name>": [ {record}, ... ], ... }`.
#[derive(Debug)]
pub struct JsonFileFeed {
    inner: VecFeed,
}

impl JsonFileFeed {
    /// Reads and parses the document at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Read { path: path.to_path_buf(), source })?;
        let document: Value = serde_json::from_str(&text)?;
        let batches = batches_from_document(&document)?;
        log::info!("Loaded {} table(s) from {}", batches.len(), path.display());
        Ok(Self { inner: VecFeed::new(batches) })
    }

    pub fn from_document(document: &Value) -> Result<Self, SourceError> {
        Ok(Self { inner: VecFeed::new(batches_from_document(document)?) })
    }
}

impl RecordFeed for JsonFileFeed {
    async fn next_batch(&mut self) -> Option<RecordBatch> {
        self.inner.next_batch().await
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

/// Splits a tables document into one batch per table.
///
/// A table given as a single object instead of an array is treated as a
/// one-record table.
pub fn batches_from_document(document: &Value) -> Result<Vec<RecordBatch>, SourceError> {
    let tables = document
        .as_object()
        .ok_or_else(|| SourceError::Shape("expected an object keyed by table name".to_string()))?;

    let mut batches = Vec::with_capacity(tables.len());
    for (table, records) in tables {
        let records = match records {
            Value::Array(items) => items.clone(),
            Value::Object(_) => vec![records.clone()],
            Value::Null => Vec::new(),
            other => {
                return Err(SourceError::Shape(format!(
                    "table '{}' must be an array of records, got {}",
                    table, other
                )));
            }
        };
        batches.push(RecordBatch::new(table.clone(), records));
    }
    Ok(batches)
}

/// A live feed fed through a tokio channel.
pub struct ChannelFeed {
    receiver: mpsc::Receiver<RecordBatch>,
}

impl ChannelFeed {
    /// Creates a feed and the sender the host side pushes batches into.
    pub fn new(capacity: usize) -> (mpsc::Sender<RecordBatch>, Self) {
        let (sender, receiver) = mpsc::channel(capacity);
        (sender, Self { receiver })
    }
}

impl RecordFeed for ChannelFeed {
    async fn next_batch(&mut self) -> Option<RecordBatch> {
        self.receiver.recv().await
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}
