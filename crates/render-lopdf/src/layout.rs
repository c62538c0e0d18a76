//! Lays a `ScheduleView` out on fixed-size pages.
//!
//! Everything here works in points with the origin at the top-left corner of
//! the page; the canvas flips `y` when it emits operations.

use crate::builder::{FONT_BOLD, FONT_REGULAR};
use crate::error::RenderError;
use echeancier_pdf_composer::{to_win_ansi, StandardFont};
use echeancier_types::{ExportOptions, Margins, RowView, ScheduleView, TableEntry, MM_TO_PT, TABLE_COLUMNS};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

const TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 9.0;
const HEADER_LINE: f32 = 12.0;
const HEADER_COLUMNS: usize = 3;
const SECTION_GAP: f32 = 10.0;
const TABLE_HEAD_SIZE: f32 = 7.5;
const TABLE_HEAD_HEIGHT: f32 = 14.0;
const CELL_SIZE: f32 = 7.5;
const ROW_HEIGHT: f32 = 12.0;
const PLACEHOLDER_HEIGHT: f32 = 24.0;
const CELL_PADDING: f32 = 3.0;
const HEAD_BACKGROUND: f32 = 0.93;
const RULE_GRAY: f32 = 0.8;

/// Relative widths of the eight table columns.
const COLUMN_FRACTIONS: [f32; 8] = [0.06, 0.11, 0.15, 0.12, 0.10, 0.16, 0.15, 0.15];

/// Columns from `Capital initial` onwards hold amounts and are right-aligned.
const FIRST_AMOUNT_COLUMN: usize = 2;

/// A single page's content stream under construction.
struct PageCanvas {
    page_height: f32,
    content: Content,
    state: CanvasState,
}

#[derive(Default, Clone, PartialEq)]
struct CanvasState {
    font: Option<(StandardFont, f32)>,
    fill_gray: Option<f32>,
}

impl PageCanvas {
    fn new(page_height: f32) -> Self {
        let mut canvas = Self { page_height, content: Content { operations: vec![] }, state: Default::default() };
        canvas.push("w", vec![0.5.into()]);
        canvas.push("G", vec![RULE_GRAY.into()]);
        canvas
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn finish(self) -> Content {
        self.content
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        if self.state.font != Some((font, size)) {
            let resource = match font {
                StandardFont::Helvetica => FONT_REGULAR,
                StandardFont::HelveticaBold => FONT_BOLD,
            };
            self.push("Tf", vec![Object::Name(resource.as_bytes().to_vec()), size.into()]);
            self.state.font = Some((font, size));
        }
    }

    fn set_fill_gray(&mut self, gray: f32) {
        if self.state.fill_gray != Some(gray) {
            self.push("g", vec![gray.into()]);
            self.state.fill_gray = Some(gray);
        }
    }

    /// Draws `text` with its left edge at `x` and its baseline at `baseline`.
    fn text(&mut self, font: StandardFont, size: f32, x: f32, baseline: f32, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.set_fill_gray(0.0);
        self.push("BT", vec![]);
        self.set_font(font, size);
        self.push("Td", vec![x.into(), (self.page_height - baseline).into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(text), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, gray: f32) {
        self.set_fill_gray(gray);
        let y = self.page_height - (top + height);
        self.push("re", vec![x.into(), y.into(), width.into(), height.into()]);
        self.push("f", vec![]);
    }

    fn hline(&mut self, x1: f32, x2: f32, y: f32) {
        let line_y = self.page_height - y;
        self.push("m", vec![x1.into(), line_y.into()]);
        self.push("l", vec![x2.into(), line_y.into()]);
        self.push("S", vec![]);
    }
}

/// Horizontal placement of the table columns on every page.
struct Columns {
    left: f32,
    width: f32,
    offsets: [f32; 8],
    widths: [f32; 8],
}

impl Columns {
    fn new(left: f32, width: f32) -> Self {
        let mut offsets = [0.0; 8];
        let mut widths = [0.0; 8];
        let mut x = left;
        for (i, fraction) in COLUMN_FRACTIONS.iter().enumerate() {
            offsets[i] = x;
            widths[i] = width * fraction;
            x += widths[i];
        }
        Self { left, width, offsets, widths }
    }

    fn right(&self) -> f32 {
        self.left + self.width
    }

    fn span_width(&self, span: usize) -> f32 {
        self.widths.iter().take(span.clamp(1, 8)).sum()
    }
}

fn baseline_in(top: f32, height: f32, size: f32) -> f32 {
    top + height / 2.0 + size * 0.35
}

fn draw_table_head(canvas: &mut PageCanvas, columns: &Columns, top: f32) -> f32 {
    canvas.fill_rect(columns.left, top, columns.width, TABLE_HEAD_HEIGHT, HEAD_BACKGROUND);
    let baseline = baseline_in(top, TABLE_HEAD_HEIGHT, TABLE_HEAD_SIZE);
    for (i, title) in TABLE_COLUMNS.iter().enumerate() {
        let x = aligned_x(columns, i, StandardFont::HelveticaBold, TABLE_HEAD_SIZE, title);
        canvas.text(StandardFont::HelveticaBold, TABLE_HEAD_SIZE, x, baseline, title);
    }
    canvas.hline(columns.left, columns.right(), top + TABLE_HEAD_HEIGHT);
    top + TABLE_HEAD_HEIGHT
}

fn aligned_x(columns: &Columns, column: usize, font: StandardFont, size: f32, text: &str) -> f32 {
    if column >= FIRST_AMOUNT_COLUMN {
        columns.offsets[column] + columns.widths[column] - CELL_PADDING - font.text_width(text, size)
    } else {
        columns.offsets[column] + CELL_PADDING
    }
}

fn draw_row(canvas: &mut PageCanvas, columns: &Columns, top: f32, row: &RowView) {
    let baseline = baseline_in(top, ROW_HEIGHT, CELL_SIZE);
    for (i, cell) in row.cells.iter().enumerate() {
        let x = aligned_x(columns, i, StandardFont::Helvetica, CELL_SIZE, cell);
        canvas.text(StandardFont::Helvetica, CELL_SIZE, x, baseline, cell);
    }
    canvas.hline(columns.left, columns.right(), top + ROW_HEIGHT);
}

fn draw_placeholder(canvas: &mut PageCanvas, columns: &Columns, top: f32, message: &str, span: usize) {
    let span_width = columns.span_width(span);
    let text_width = StandardFont::Helvetica.text_width(message, CELL_SIZE);
    let x = columns.left + (span_width - text_width).max(0.0) / 2.0;
    canvas.text(StandardFont::Helvetica, CELL_SIZE, x, baseline_in(top, PLACEHOLDER_HEIGHT, CELL_SIZE), message);
    canvas.hline(columns.left, columns.right(), top + PLACEHOLDER_HEIGHT);
}

/// Title and parameter summary; returns the y where the table starts.
fn draw_summary(canvas: &mut PageCanvas, view: &ScheduleView, left: f32, width: f32, top: f32) -> f32 {
    let mut y = top + TITLE_SIZE;
    canvas.text(StandardFont::HelveticaBold, TITLE_SIZE, left, y, &view.title);
    y += SECTION_GAP;

    let cell_width = width / HEADER_COLUMNS as f32;
    for (i, (label, value)) in view.header.entries().iter().enumerate() {
        let x = left + (i % HEADER_COLUMNS) as f32 * cell_width;
        let baseline = y + HEADER_LINE * (i / HEADER_COLUMNS + 1) as f32;
        let label = format!("{} :", label);
        canvas.text(StandardFont::HelveticaBold, HEADER_SIZE, x, baseline, &label);
        let value_x = x + StandardFont::HelveticaBold.text_width(&label, HEADER_SIZE) + 4.0;
        canvas.text(StandardFont::Helvetica, HEADER_SIZE, value_x, baseline, value);
    }
    let header_rows = view.header.entries().len().div_ceil(HEADER_COLUMNS);
    y + HEADER_LINE * header_rows as f32 + SECTION_GAP
}

/// Lays out `view` and returns one content stream per page.
///
/// The column header row is repeated at the top of every page; a row never
/// straddles two pages.
pub fn layout_schedule(view: &ScheduleView, options: &ExportOptions) -> Result<Vec<Content>, RenderError> {
    let page = options.page_size().to_pt();
    let margins = margins_pt(&options.margins);
    let content_width = page.width - margins.left - margins.right;
    let bottom_limit = page.height - margins.bottom;
    if content_width <= 0.0 || bottom_limit - margins.top < TABLE_HEAD_HEIGHT + PLACEHOLDER_HEIGHT {
        return Err(RenderError::Other(format!(
            "Margins leave no room for the table on a {}x{}pt page",
            page.width, page.height
        )));
    }

    let columns = Columns::new(margins.left, content_width);
    let mut pages = Vec::new();
    let mut canvas = PageCanvas::new(page.height);
    let mut y = draw_summary(&mut canvas, view, margins.left, content_width, margins.top);
    y = draw_table_head(&mut canvas, &columns, y);
    let mut entries_on_page = 0usize;

    for entry in &view.table {
        let height = match entry {
            TableEntry::Placeholder { .. } => PLACEHOLDER_HEIGHT,
            TableEntry::Row(_) => ROW_HEIGHT,
        };
        if y + height > bottom_limit && entries_on_page > 0 {
            pages.push(canvas.finish());
            canvas = PageCanvas::new(page.height);
            y = draw_table_head(&mut canvas, &columns, margins.top);
            entries_on_page = 0;
        }
        match entry {
            TableEntry::Placeholder { message, span } => draw_placeholder(&mut canvas, &columns, y, message, *span),
            TableEntry::Row(row) => draw_row(&mut canvas, &columns, y, row),
        }
        y += height;
        entries_on_page += 1;
    }
    pages.push(canvas.finish());

    log::debug!("Laid out {} table entries on {} page(s)", view.table.len(), pages.len());
    Ok(pages)
}

fn margins_pt(margins: &Margins) -> Margins {
    Margins {
        top: margins.top * MM_TO_PT,
        left: margins.left * MM_TO_PT,
        bottom: margins.bottom * MM_TO_PT,
        right: margins.right * MM_TO_PT,
    }
}
