//! In-memory stand-ins for the converter and its document.

use echeancier_traits::{ConversionError, DocumentConverter, DocumentError, PaginatedDocument};
use echeancier_types::{ExportOptions, ScheduleView, Size};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub page: usize,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub width: f32,
}

#[derive(Debug, Default)]
struct Saved {
    paths: Vec<PathBuf>,
    stamps: Vec<String>,
    principals: Vec<String>,
}

/// Records what reached `save`, shared between a converter and the test.
#[derive(Debug, Clone, Default)]
pub struct SaveLog {
    inner: Arc<Mutex<Saved>>,
}

impl SaveLog {
    pub fn paths(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().paths.clone()
    }

    /// Texts placed on the documents that were saved.
    pub fn stamps(&self) -> Vec<String> {
        self.inner.lock().unwrap().stamps.clone()
    }

    /// Header principal of the view each saved document was converted from.
    pub fn principals(&self) -> Vec<String> {
        self.inner.lock().unwrap().principals.clone()
    }
}

pub struct FakeDocument {
    pages: usize,
    current: usize,
    pub placed: Vec<Placed>,
    pub fail_on_page: Option<usize>,
    pub fail_save: bool,
    principal: String,
    saves: SaveLog,
}

impl FakeDocument {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            current: 1,
            placed: Vec::new(),
            fail_on_page: None,
            fail_save: false,
            principal: String::new(),
            saves: SaveLog::default(),
        }
    }
}

impl PaginatedDocument for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn set_page(&mut self, page: usize) -> Result<(), DocumentError> {
        if page == 0 || page > self.pages {
            return Err(DocumentError::PageOutOfRange { page, count: self.pages });
        }
        self.current = page;
        Ok(())
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn page_size(&self) -> Size {
        Size::new(210.0, 297.0)
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * 0.2
    }

    fn place_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) -> Result<(), DocumentError> {
        if self.fail_on_page == Some(self.current) {
            return Err(DocumentError::Pdf(format!("cannot draw on page {}", self.current)));
        }
        let width = self.text_width(text, font_size);
        self.placed.push(Placed { page: self.current, text: text.to_string(), x, y, font_size, width });
        Ok(())
    }

    async fn save(self, path: &Path) -> Result<PathBuf, DocumentError> {
        if self.fail_save {
            return Err(DocumentError::SaveFailed {
                path: path.to_path_buf(),
                message: "disk full".to_string(),
            });
        }
        let mut log = self.saves.inner.lock().unwrap();
        log.paths.push(path.to_path_buf());
        log.stamps.extend(self.placed.iter().map(|p| p.text.clone()));
        log.principals.push(self.principal);
        Ok(path.to_path_buf())
    }
}

#[derive(Default)]
pub struct FakeConverter {
    pages: usize,
    fail: bool,
    fail_stamp_on: Option<usize>,
    fail_save: bool,
    delay: Option<Duration>,
    saves: SaveLog,
}

impl FakeConverter {
    pub fn pages(pages: usize) -> Self {
        Self { pages, ..Default::default() }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn failing_stamp_on(mut self, page: usize) -> Self {
        self.fail_stamp_on = Some(page);
        self
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_saves(mut self, saves: SaveLog) -> Self {
        self.saves = saves;
        self
    }
}

impl DocumentConverter for FakeConverter {
    type Document = FakeDocument;

    async fn convert(&self, view: &ScheduleView, _options: &ExportOptions) -> Result<FakeDocument, ConversionError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ConversionError::Rejected("fake converter refused".to_string()));
        }
        let mut doc = FakeDocument::new(self.pages);
        doc.fail_on_page = self.fail_stamp_on;
        doc.fail_save = self.fail_save;
        doc.principal = view.header.principal.clone();
        doc.saves = self.saves.clone();
        Ok(doc)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
