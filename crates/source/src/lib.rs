//! Data source plumbing for the echeancier tables.
//!
//! This crate turns what the spreadsheet host delivers into typed updates:
//!
//! - [`RecordFeed`]: async source of [`RecordBatch`]es (one per table update)
//! - [`RecordAdapter`]: maps raw records to `HeaderParams` / `AmortizationRow`,
//!   resolving column aliases and lenient number parsing once
//!
//! ## Available Feeds
//!
//! - `JsonFileFeed`: a snapshot document keyed by table name
//! - `ChannelFeed`: live batches pushed through a tokio channel
//! - `VecFeed`: in-memory batches, also used for manual mode
//! - `NdjsonFeed`: one batch (or command) per line from any async reader
//!
//! ## Example
//!
//! ```ignore
//! use echeancier_source::{RecordAdapter, RecordFeed, VecFeed, RecordBatch};
//! use serde_json::json;
//!
//! let adapter = RecordAdapter::default();
//! let mut feed = VecFeed::new(vec![RecordBatch::new("PARAMÈTRES", vec![json!({"Montant": 1000})])]);
//!
//! while let Some(batch) = feed.next_batch().await {
//!     if let Some(update) = adapter.adapt(&batch) {
//!         println!("{:?}", update);
//!     }
//! }
//! ```

pub mod adapter;
mod error;
pub mod feed;
mod ndjson;

pub use adapter::{RecordAdapter, RecordBatch, TableNames, TableUpdate};
pub use error::SourceError;
pub use feed::{ChannelFeed, JsonFileFeed, RecordFeed, VecFeed, batches_from_document};
pub use ndjson::{FeedLine, NdjsonFeed};
