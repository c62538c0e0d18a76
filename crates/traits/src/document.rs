//! PaginatedDocument trait for post-processing a converted document.
//!
//! A converter hands back a document that is complete in memory but not yet
//! written anywhere. Callers may address its pages one by one, overlay text
//! and finally save it.

use echeancier_types::Size;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for operations on a paginated document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Page {page} is out of range (document has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Failed to save '{path}': {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An in-memory document made of independently addressable pages.
///
/// Coordinates are millimetres with the origin at the top-left corner of the
/// current page; `y` designates a text baseline.
///
/// # Example
///
/// ```ignore
/// doc.set_page(2)?;
/// let width = doc.text_width("Page 2 / 3", 9.0);
/// doc.place_text("Page 2 / 3", 195.0 - width, 287.0, 9.0)?;
/// doc.save(Path::new("out/schedule.pdf")).await?;
/// ```
pub trait PaginatedDocument: Send {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Selects the page (1-based) that subsequent calls operate on.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::PageOutOfRange` when `page` is 0 or greater
    /// than [`page_count`](Self::page_count).
    fn set_page(&mut self, page: usize) -> Result<(), DocumentError>;

    /// The 1-based index of the current page.
    fn current_page(&self) -> usize;

    /// Size of the current page.
    fn page_size(&self) -> Size;

    /// Rendered width of `text` at `font_size` points, in millimetres.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Writes `text` on the current page with its left edge at `x` and its
    /// baseline at `y`.
    fn place_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) -> Result<(), DocumentError>;

    /// Persists the document at `path` and returns the path written.
    fn save(self, path: &Path) -> impl Future<Output = Result<PathBuf, DocumentError>> + Send
    where
        Self: Sized;
}
