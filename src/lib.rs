//! Loan amortization schedule rendering and paginated PDF export.
//!
//! Records from the `PARAMÈTRES` and `ECHÉANCIER` host tables are adapted
//! into typed values, held in a [`ScheduleState`], rendered into a
//! display-ready [`ScheduleView`] and exported through a
//! [`DocumentConverter`] with a `Page i / N` stamp on every page.

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod render;
pub mod session;
pub mod state;

pub use config::{AppConfig, Messages};
pub use error::{AppError, ConfigError, ExportError};
pub use export::{
    export_file_name, page_label, stamp_page_numbers, ExportPhase, ExportStatus, Exporter, PageNumberStyle,
};
pub use format::{format_amount, format_date, format_rate, PLACEHOLDER};
pub use render::{render_header, render_row, render_schedule, render_table};
pub use session::{Session, SessionCommand, SessionOutcome, UnknownCommand};
pub use state::ScheduleState;

pub use echeancier_render_lopdf::{LopdfConverter, LopdfDocument};
pub use echeancier_source::{
    ChannelFeed, FeedLine, JsonFileFeed, NdjsonFeed, RecordAdapter, RecordBatch, RecordFeed, TableNames, TableUpdate,
    VecFeed,
};
pub use echeancier_traits::{ConversionError, DocumentConverter, DocumentError, PaginatedDocument};
pub use echeancier_types::{
    AmortizationRow, DateValue, ExportOptions, HeaderParams, HeaderView, Margins, Orientation, PageFormat, RowView,
    ScheduleView, Size, TableEntry,
};
