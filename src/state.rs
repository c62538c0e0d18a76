use crate::config::Messages;
use crate::render::render_schedule;
use echeancier_source::TableUpdate;
use echeancier_types::{AmortizationRow, HeaderParams, ScheduleView};

/// The latest header and rows received from the host.
///
/// Each update replaces its slot entirely (last write wins). Cloning gives
/// the snapshot an export works from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleState {
    header: Option<HeaderParams>,
    rows: Vec<AmortizationRow>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> Option<&HeaderParams> {
        self.header.as_ref()
    }

    pub fn rows(&self) -> &[AmortizationRow] {
        &self.rows
    }

    pub fn set_header(&mut self, header: HeaderParams) {
        self.header = Some(header);
    }

    pub fn set_rows(&mut self, rows: Vec<AmortizationRow>) {
        self.rows = rows;
    }

    pub fn apply(&mut self, update: TableUpdate) {
        match update {
            TableUpdate::Header(header) => self.set_header(header),
            TableUpdate::Schedule(rows) => {
                log::debug!("Schedule replaced with {} row(s)", rows.len());
                self.set_rows(rows)
            }
        }
    }

    pub fn render(&self, messages: &Messages) -> ScheduleView {
        render_schedule(self, messages)
    }
}
