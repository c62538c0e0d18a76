use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Page {page} not found (document has {count} pages)")]
    PageNotFound { page: u32, count: usize },

    #[error("{0}")]
    Other(String),
}
