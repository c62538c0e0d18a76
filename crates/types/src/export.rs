use crate::geometry::{Margins, Orientation, PageFormat, Size};
use serde::{Deserialize, Serialize};

/// Image encoding settings passed through to the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    pub format: String,
    pub quality: f32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self { format: "jpeg".to_string(), quality: 0.98 }
    }
}

/// Settings for one conversion of the schedule into a paginated document.
///
/// Lengths are millimetres. The defaults reproduce the reference layout:
/// A4 portrait, margins top 10, left 10, bottom 15, right 10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub margins: Margins,
    pub file_name: String,
    pub image: ImageOptions,
    /// Rasterization scale factor.
    pub scale: f32,
    pub format: PageFormat,
    pub orientation: Orientation,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            margins: Margins::from_array([10.0, 10.0, 15.0, 10.0]),
            file_name: "echeancier.pdf".to_string(),
            image: ImageOptions::default(),
            scale: 2.0,
            format: PageFormat::A4,
            orientation: Orientation::Portrait,
        }
    }
}

impl ExportOptions {
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn page_size(&self) -> Size {
        self.format.size(self.orientation)
    }

    /// Width and height of the area inside the margins.
    pub fn content_size(&self) -> Size {
        let page = self.page_size();
        Size::new(
            page.width - self.margins.left - self.margins.right,
            page.height - self.margins.top - self.margins.bottom,
        )
    }
}
