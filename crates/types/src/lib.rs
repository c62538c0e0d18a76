//! Foundation types shared by every echeancier crate.
//!
//! - [`HeaderParams`] and [`AmortizationRow`]: typed records built once at the
//!   data-source boundary
//! - [`ScheduleView`]: the display-ready projection handed to converters
//! - [`ExportOptions`] and page geometry, expressed in millimetres

pub mod export;
pub mod geometry;
pub mod records;
pub mod view;

pub use export::{ExportOptions, ImageOptions};
pub use geometry::{Margins, Orientation, PageFormat, Size, MM_TO_PT};
pub use records::{AmortizationRow, DateValue, HeaderParams};
pub use view::{HeaderView, RowView, ScheduleView, TableEntry, TABLE_COLUMNS};
