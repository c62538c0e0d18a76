use crate::builder::PdfBuilder;
use crate::document::LopdfDocument;
use crate::error::RenderError;
use crate::layout::layout_schedule;
use echeancier_traits::{ConversionError, DocumentConverter};
use echeancier_types::{ExportOptions, ScheduleView};

/// Converts a schedule view into an in-memory PDF with lopdf.
///
/// Text is drawn with the standard Helvetica faces, so nothing is embedded
/// and the image settings only matter to raster backends.
#[derive(Debug, Clone)]
pub struct LopdfConverter {
    version: String,
}

impl Default for LopdfConverter {
    fn default() -> Self {
        Self { version: "1.7".to_string() }
    }
}

impl LopdfConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the document synchronously. `convert` runs this on the
    /// blocking pool.
    pub fn build(&self, view: &ScheduleView, options: &ExportOptions) -> Result<LopdfDocument, RenderError> {
        let page_size = options.page_size();
        let page_pt = page_size.to_pt();
        let pages = layout_schedule(view, options)?;

        let mut builder = PdfBuilder::new(&self.version);
        for content in pages {
            builder.add_page(content, page_pt.width, page_pt.height)?;
        }
        let (doc, page_ids) = builder.finish(&view.title);
        Ok(LopdfDocument::new(doc, page_ids, page_size))
    }
}

fn validate(options: &ExportOptions) -> Result<(), ConversionError> {
    if !(options.scale.is_finite() && options.scale > 0.0) {
        return Err(ConversionError::Rejected(format!("scale must be positive, got {}", options.scale)));
    }
    if !(0.0..=1.0).contains(&options.image.quality) {
        return Err(ConversionError::Rejected(format!(
            "image quality must be within 0..=1, got {}",
            options.image.quality
        )));
    }
    Ok(())
}

impl DocumentConverter for LopdfConverter {
    type Document = LopdfDocument;

    async fn convert(&self, view: &ScheduleView, options: &ExportOptions) -> Result<LopdfDocument, ConversionError> {
        validate(options)?;
        log::debug!(
            "Converting '{}' ({} entries), image {} at quality {}, scale {}",
            view.title,
            view.table.len(),
            options.image.format,
            options.image.quality,
            options.scale
        );

        let converter = self.clone();
        let view = view.clone();
        let options = options.clone();
        let doc = tokio::task::spawn_blocking(move || converter.build(&view, &options))
            .await
            .map_err(|e| ConversionError::Task(e.to_string()))?
            .map_err(|e| ConversionError::Rejected(e.to_string()))?;

        log::debug!("Converted schedule into {} page(s)", echeancier_traits::PaginatedDocument::page_count(&doc));
        Ok(doc)
    }

    fn name(&self) -> &'static str {
        "lopdf"
    }
}
