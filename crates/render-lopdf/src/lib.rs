//! Schedule-to-PDF converter using lopdf.
//!
//! This crate lays a rendered schedule out on A4 (or any configured) pages
//! and keeps the result in memory as a [`LopdfDocument`], ready for page
//! stamping before it is saved.

mod builder;
mod converter;
mod document;
mod error;
mod layout;

pub use builder::{PdfBuilder, FONT_BOLD, FONT_REGULAR};
pub use converter::LopdfConverter;
pub use document::LopdfDocument;
pub use error::RenderError;
pub use layout::layout_schedule;
