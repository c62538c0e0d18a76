//! Maps loosely-typed host records onto [`HeaderParams`] and [`AmortizationRow`].
//!
//! The host delivers JSON objects whose cells may be missing, null, numbers or
//! numeric strings. All of that is resolved here, once, so the renderer only
//! ever sees `Option`s.

use chrono::{DateTime, NaiveDate};
use echeancier_types::{AmortizationRow, DateValue, HeaderParams};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Spellings of the duration column, in priority order. The host may send the
/// accented name precomposed or decomposed.
pub const DURATION_KEYS: [&str; 3] = ["Dur\u{e9}e_Mois", "Duree_Mois", "Dure\u{301}e_Mois"];

/// Names of the two host tables the widget listens to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub header: String,
    pub schedule: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self { header: "PARAMÈTRES".to_string(), schedule: "ECHÉANCIER".to_string() }
    }
}

/// Records delivered for one host table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBatch {
    pub table: String,
    #[serde(default)]
    pub records: Vec<Value>,
}

impl RecordBatch {
    pub fn new(table: impl Into<String>, records: Vec<Value>) -> Self {
        Self { table: table.into(), records }
    }
}

/// A typed update produced from a [`RecordBatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableUpdate {
    Header(HeaderParams),
    Schedule(Vec<AmortizationRow>),
}

/// Turns record batches into typed table updates.
#[derive(Debug, Clone, Default)]
pub struct RecordAdapter {
    tables: TableNames,
}

impl RecordAdapter {
    pub fn new(tables: TableNames) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    /// Converts a batch into an update.
    ///
    /// Returns `None` for batches of unknown tables and for empty header
    /// batches, which leave the current header in place.
    pub fn adapt(&self, batch: &RecordBatch) -> Option<TableUpdate> {
        if batch.table == self.tables.header {
            match batch.records.first() {
                Some(record) => Some(TableUpdate::Header(header_from_record(record))),
                None => {
                    log::debug!("Empty batch for '{}', keeping the current header", batch.table);
                    None
                }
            }
        } else if batch.table == self.tables.schedule {
            Some(TableUpdate::Schedule(batch.records.iter().map(row_from_record).collect()))
        } else {
            log::debug!("Ignoring records for unknown table '{}'", batch.table);
            None
        }
    }
}

/// Builds header parameters from one parameters-table record.
pub fn header_from_record(record: &Value) -> HeaderParams {
    let Some(fields) = record_fields(record) else {
        return HeaderParams::default();
    };
    HeaderParams {
        principal: number_field(fields, "Montant"),
        annual_rate: number_field(fields, "TauxAnnuel"),
        monthly_payment: number_field(fields, "Mensualit\u{e9}"),
        duration_months: DURATION_KEYS
            .iter()
            .filter_map(|key| fields.get(*key))
            .find(|value| is_truthy(value))
            .and_then(display_text),
        total_interest: number_field(fields, "TotalInterets"),
        total_cost: number_field(fields, "CoutTotal"),
    }
}

/// Builds a schedule row from one schedule-table record.
pub fn row_from_record(record: &Value) -> AmortizationRow {
    let Some(fields) = record_fields(record) else {
        return AmortizationRow::default();
    };
    AmortizationRow {
        number: fields.get("Numero").and_then(display_text),
        date: fields.get("Date").and_then(date_value),
        opening_balance: number_field(fields, "CapitalInitial"),
        interest: number_field(fields, "Interets"),
        fee: number_field(fields, "MontantFrais"),
        principal_repaid: number_field(fields, "CapitalRembourse"),
        closing_balance: number_field(fields, "CapitalFinal"),
        installment: number_field(fields, "Mensualite"),
    }
}

/// Returns the cell map of a record. Records are usually flat objects, but
/// some host APIs nest the cells under `fields`.
fn record_fields(record: &Value) -> Option<&Map<String, Value>> {
    let object = record.as_object()?;
    match object.get("fields").and_then(Value::as_object) {
        Some(fields) => Some(fields),
        None => Some(object),
    }
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    fields.get(key).and_then(number_value)
}

/// Reads a numeric cell. Numeric strings are accepted; anything else,
/// including non-finite values, counts as missing.
pub fn number_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Text shown verbatim for a cell, with whole numbers printed without a
/// fractional part.
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i.to_string());
            }
            if let Some(u) = n.as_u64() {
                return Some(u.to_string());
            }
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truthiness of a cell the way the host's scripting side evaluates it:
/// null, false, zero and the empty string are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads a date cell: ISO text is kept for the formatter, epoch seconds and
/// the host's encoded `["d", seconds]` form are decoded to a calendar date.
/// A bare zero is falsy and counts as missing.
fn date_value(value: &Value) -> Option<DateValue> {
    match value {
        Value::String(s) if !s.is_empty() => Some(DateValue::Text(s.clone())),
        Value::Number(n) => n.as_f64().filter(|s| *s != 0.0).and_then(date_from_epoch).map(DateValue::Date),
        Value::Array(items) => match items.as_slice() {
            [Value::String(tag), seconds] if tag == "d" || tag == "D" => {
                seconds.as_f64().and_then(date_from_epoch).map(DateValue::Date)
            }
            _ => None,
        },
        _ => None,
    }
}

fn date_from_epoch(seconds: f64) -> Option<NaiveDate> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp(seconds.floor() as i64, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_maps_all_six_fields() {
        let header = header_from_record(&json!({
            "Montant": 100000,
            "TauxAnnuel": 0.035,
            "Mensualité": null,
            "Duree_Mois": 120,
            "TotalInterets": "18 000",
            "CoutTotal": "118650.25"
        }));
        assert_eq!(header.principal, Some(100000.0));
        assert_eq!(header.annual_rate, Some(0.035));
        assert_eq!(header.monthly_payment, None);
        assert_eq!(header.duration_months.as_deref(), Some("120"));
        // Not a plain number: treated as missing.
        assert_eq!(header.total_interest, None);
        assert_eq!(header.total_cost, Some(118650.25));
    }

    #[test]
    fn duration_aliases_follow_priority_and_skip_empty_values() {
        let header = header_from_record(&json!({ "Durée_Mois": 240, "Duree_Mois": 120 }));
        assert_eq!(header.duration_months.as_deref(), Some("240"));

        let header = header_from_record(&json!({ "Durée_Mois": "", "Duree_Mois": 120 }));
        assert_eq!(header.duration_months.as_deref(), Some("120"));

        let mut record = Map::new();
        record.insert("Duree_Mois".to_string(), json!(0));
        record.insert("Dure\u{301}e_Mois".to_string(), json!("36"));
        let header = header_from_record(&Value::Object(record));
        assert_eq!(header.duration_months.as_deref(), Some("36"));

        let header = header_from_record(&json!({ "Duree_Mois": 0 }));
        assert_eq!(header.duration_months, None);
    }

    #[test]
    fn nested_fields_are_unwrapped() {
        let header = header_from_record(&json!({ "id": 1, "fields": { "Montant": 5000 } }));
        assert_eq!(header.principal, Some(5000.0));
    }

    #[test]
    fn row_keeps_zero_and_drops_null() {
        let row = row_from_record(&json!({
            "Numero": 1,
            "Date": "2024-01-31",
            "CapitalInitial": 100000,
            "Interets": 0,
            "MontantFrais": null,
            "Mensualite": 988.45
        }));
        assert_eq!(row.number.as_deref(), Some("1"));
        assert_eq!(row.date, Some(DateValue::Text("2024-01-31".into())));
        assert_eq!(row.interest, Some(0.0));
        assert_eq!(row.fee, None);
        assert_eq!(row.principal_repaid, None);
        assert_eq!(row.installment, Some(988.45));
    }

    #[test]
    fn epoch_dates_are_decoded() {
        let row = row_from_record(&json!({ "Date": 1706659200 }));
        assert_eq!(row.date, Some(DateValue::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())));

        let row = row_from_record(&json!({ "Date": ["d", 1706659200] }));
        assert_eq!(row.date, Some(DateValue::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())));
    }

    #[test]
    fn zero_date_is_missing() {
        assert_eq!(row_from_record(&json!({ "Date": 0 })).date, None);
        assert_eq!(row_from_record(&json!({ "Date": 0.0 })).date, None);
    }

    #[test]
    fn non_object_records_yield_empty_values() {
        assert_eq!(row_from_record(&json!(42)), AmortizationRow::default());
        assert_eq!(header_from_record(&json!(null)), HeaderParams::default());
    }

    #[test]
    fn adapter_routes_batches_by_table() {
        let adapter = RecordAdapter::default();

        let update = adapter.adapt(&RecordBatch::new("PARAMÈTRES", vec![json!({"Montant": 1}), json!({"Montant": 2})]));
        match update {
            Some(TableUpdate::Header(header)) => assert_eq!(header.principal, Some(1.0)),
            other => panic!("expected header update, got {:?}", other),
        }

        assert_eq!(adapter.adapt(&RecordBatch::new("PARAMÈTRES", vec![])), None);
        assert_eq!(
            adapter.adapt(&RecordBatch::new("ECHÉANCIER", vec![])),
            Some(TableUpdate::Schedule(vec![]))
        );
        assert_eq!(adapter.adapt(&RecordBatch::new("Other", vec![json!({})])), None);
    }

    #[test]
    fn display_text_prints_whole_floats_as_integers() {
        assert_eq!(display_text(&json!(120.0)).as_deref(), Some("120"));
        assert_eq!(display_text(&json!(12.5)).as_deref(), Some("12.5"));
        assert_eq!(display_text(&json!(null)), None);
    }
}
