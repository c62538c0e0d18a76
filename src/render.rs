//! Projection of header and rows onto the display model.
//!
//! The header treats zero as missing while rows display it; both rules come
//! from the host widget and are kept as they are.

use crate::config::Messages;
use crate::format::{format_amount, format_date, format_rate, PLACEHOLDER};
use crate::state::ScheduleState;
use echeancier_types::{AmortizationRow, HeaderParams, HeaderView, RowView, ScheduleView, TableEntry, TABLE_COLUMNS};

fn header_amount(value: Option<f64>) -> String {
    match value.filter(|v| *v != 0.0 && !v.is_nan()) {
        Some(v) => format!("{} €", format_amount(Some(v))),
        None => PLACEHOLDER.to_string(),
    }
}

fn row_amount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} €", format_amount(Some(v))),
        None => String::new(),
    }
}

pub fn render_header(params: &HeaderParams) -> HeaderView {
    HeaderView {
        principal: header_amount(params.principal),
        annual_rate: format_rate(params.annual_rate),
        monthly_payment: header_amount(params.monthly_payment),
        duration_months: params
            .duration_months
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(PLACEHOLDER)
            .to_string(),
        total_interest: header_amount(params.total_interest),
        total_cost: header_amount(params.total_cost),
    }
}

pub fn render_row(row: &AmortizationRow) -> RowView {
    RowView {
        cells: [
            row.number.clone().unwrap_or_default(),
            format_date(row.date.as_ref()),
            row_amount(row.opening_balance),
            row_amount(row.interest),
            row_amount(row.fee),
            row_amount(row.principal_repaid),
            row_amount(row.closing_balance),
            row_amount(row.installment),
        ],
    }
}

/// Renders the table body. No rows (absent or empty) gives a single
/// placeholder entry spanning every column.
pub fn render_table(rows: Option<&[AmortizationRow]>, no_rows_message: &str) -> Vec<TableEntry> {
    match rows {
        Some(rows) if !rows.is_empty() => rows.iter().map(|row| TableEntry::Row(render_row(row))).collect(),
        _ => vec![TableEntry::Placeholder { message: no_rows_message.to_string(), span: TABLE_COLUMNS.len() }],
    }
}

pub fn render_schedule(state: &ScheduleState, messages: &Messages) -> ScheduleView {
    let header = match state.header() {
        Some(params) => render_header(params),
        None => render_header(&HeaderParams::default()),
    };
    ScheduleView {
        title: messages.title.clone(),
        header,
        table: render_table(Some(state.rows()), &messages.no_rows),
    }
}
