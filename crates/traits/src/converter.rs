//! DocumentConverter trait for turning a rendered schedule into pages.
//!
//! The converter is the "render this region to a paginated document"
//! capability. The export pipeline depends on it only through this trait, so
//! tests substitute fakes and the real backend lives in its own crate.

use crate::document::{DocumentError, PaginatedDocument};
use echeancier_types::{ExportOptions, ScheduleView};
use std::future::Future;
use thiserror::Error;

/// Error type for document conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Conversion rejected: {0}")]
    Rejected(String),

    #[error("Conversion task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// A service that converts a schedule view into a paginated document.
///
/// The returned document is in memory and not yet saved, so callers can
/// post-process its pages before persisting it.
pub trait DocumentConverter: Send + Sync {
    type Document: PaginatedDocument;

    /// Converts `view` using the page settings in `options`.
    fn convert(
        &self,
        view: &ScheduleView,
        options: &ExportOptions,
    ) -> impl Future<Output = Result<Self::Document, ConversionError>> + Send;

    /// Returns a human-readable name for this converter (for logging/debugging).
    fn name(&self) -> &'static str;
}
