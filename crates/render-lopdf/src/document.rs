use crate::builder::FONT_REGULAR;
use echeancier_pdf_composer::{stamp_text, StandardFont};
use echeancier_traits::{DocumentError, PaginatedDocument};
use echeancier_types::{Orientation, PageFormat, Size, MM_TO_PT};
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};

/// A converted schedule held in memory as a lopdf `Document`.
pub struct LopdfDocument {
    doc: Document,
    page_ids: Vec<ObjectId>,
    /// Page sizes in millimetres, parallel to `page_ids`.
    page_sizes: Vec<Size>,
    current: usize,
}

impl LopdfDocument {
    pub(crate) fn new(doc: Document, page_ids: Vec<ObjectId>, page_size: Size) -> Self {
        let page_sizes = vec![page_size; page_ids.len()];
        Self { doc, page_ids, page_sizes, current: 1 }
    }

    /// Wraps an existing document, reading each page's `/MediaBox`.
    ///
    /// Pages without a readable media box are assumed to be A4 portrait.
    pub fn from_document(doc: Document) -> Self {
        // BTreeMap values are sorted by page number.
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let page_sizes = page_ids
            .iter()
            .map(|id| media_box_mm(&doc, *id).unwrap_or_else(|| PageFormat::A4.size(Orientation::Portrait)))
            .collect();
        Self { doc, page_ids, page_sizes, current: 1 }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    fn current_page_id(&self) -> Result<ObjectId, DocumentError> {
        self.page_ids
            .get(self.current.wrapping_sub(1))
            .copied()
            .ok_or(DocumentError::PageOutOfRange { page: self.current, count: self.page_ids.len() })
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn media_box_mm(doc: &Document, page_id: ObjectId) -> Option<Size> {
    let page = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    let values: Vec<f32> = media_box.iter().filter_map(number).collect();
    match values.as_slice() {
        [x0, y0, x1, y1] => Some(Size::new((x1 - x0).abs() / MM_TO_PT, (y1 - y0).abs() / MM_TO_PT)),
        _ => None,
    }
}

impl PaginatedDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn set_page(&mut self, page: usize) -> Result<(), DocumentError> {
        if page == 0 || page > self.page_ids.len() {
            return Err(DocumentError::PageOutOfRange { page, count: self.page_ids.len() });
        }
        self.current = page;
        Ok(())
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn page_size(&self) -> Size {
        self.page_sizes
            .get(self.current.wrapping_sub(1))
            .copied()
            .unwrap_or_else(|| PageFormat::A4.size(Orientation::Portrait))
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        StandardFont::Helvetica.text_width(text, font_size) / MM_TO_PT
    }

    fn place_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) -> Result<(), DocumentError> {
        let page_id = self.current_page_id()?;
        let page_height = self.page_size().height;
        stamp_text(
            &mut self.doc,
            page_id,
            FONT_REGULAR,
            StandardFont::Helvetica,
            font_size,
            x * MM_TO_PT,
            (page_height - y) * MM_TO_PT,
            text,
        )
        .map_err(|e| DocumentError::Pdf(e.to_string()))
    }

    async fn save(self, path: &Path) -> Result<PathBuf, DocumentError> {
        let path = path.to_path_buf();
        let mut doc = self.doc;
        let save_failed = |message: String| DocumentError::SaveFailed { path: path.clone(), message };

        let bytes = tokio::task::spawn_blocking(move || {
            let mut buffer = Vec::new();
            doc.save_to(&mut buffer).map(|_| buffer)
        })
        .await
        .map_err(|e| save_failed(e.to_string()))?
        .map_err(|e| save_failed(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;
        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}
