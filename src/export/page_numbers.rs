use echeancier_traits::{DocumentError, PaginatedDocument};
use serde::{Deserialize, Serialize};

/// Where and how large the `Page i / N` label is drawn. Insets are
/// millimetres measured from the page's right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageNumberStyle {
    pub font_size: f32,
    pub right_inset: f32,
    pub bottom_inset: f32,
}

impl Default for PageNumberStyle {
    fn default() -> Self {
        Self { font_size: 9.0, right_inset: 15.0, bottom_inset: 10.0 }
    }
}

pub fn page_label(page: usize, total: usize) -> String {
    format!("Page {} / {}", page, total)
}

/// Stamps `Page i / N` on every page of `doc`, right-aligned on
/// `page width - right_inset` with its baseline at `page height - bottom_inset`.
///
/// Returns the number of pages stamped. Stops at the first page that fails.
pub fn stamp_page_numbers<D: PaginatedDocument>(doc: &mut D, style: &PageNumberStyle) -> Result<usize, DocumentError> {
    let total = doc.page_count();
    for page in 1..=total {
        doc.set_page(page)?;
        let label = page_label(page, total);
        let size = doc.page_size();
        let width = doc.text_width(&label, style.font_size);
        let x = size.width - style.right_inset - width;
        let y = size.height - style.bottom_inset;
        doc.place_text(&label, x, y, style.font_size)?;
    }
    log::debug!("Stamped page numbers on {} page(s)", total);
    Ok(total)
}
