pub mod converter;
pub mod document;

pub use converter::{ConversionError, DocumentConverter};
pub use document::{DocumentError, PaginatedDocument};
