//! Display-ready projection of the schedule.
//!
//! Every string here is final text: formatting, suffixes and placeholders have
//! already been applied. Converters only lay these strings out.

use serde::Serialize;

/// Column titles of the schedule table, in display order.
pub const TABLE_COLUMNS: [&str; 8] = [
    "N°",
    "Date",
    "Capital initial",
    "Intérêts",
    "Frais",
    "Capital remboursé",
    "Capital final",
    "Mensualité",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView {
    pub principal: String,
    pub annual_rate: String,
    pub monthly_payment: String,
    pub duration_months: String,
    pub total_interest: String,
    pub total_cost: String,
}

impl HeaderView {
    /// Label/value pairs in the order the summary block shows them.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("Montant", self.principal.as_str()),
            ("Taux annuel", self.annual_rate.as_str()),
            ("Mensualité", self.monthly_payment.as_str()),
            ("Durée (mois)", self.duration_months.as_str()),
            ("Total intérêts", self.total_interest.as_str()),
            ("Coût total", self.total_cost.as_str()),
        ]
    }
}

/// The eight display cells of one schedule row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub cells: [String; 8],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TableEntry {
    /// Informational line shown instead of rows; spans `span` columns.
    Placeholder { message: String, span: usize },
    Row(RowView),
}

impl TableEntry {
    pub fn as_row(&self) -> Option<&RowView> {
        match self {
            TableEntry::Row(row) => Some(row),
            TableEntry::Placeholder { .. } => None,
        }
    }
}

/// Header summary plus table entries; the region a converter turns into pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub title: String,
    pub header: HeaderView,
    pub table: Vec<TableEntry>,
}

impl ScheduleView {
    pub fn rows(&self) -> impl Iterator<Item = &RowView> {
        self.table.iter().filter_map(TableEntry::as_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_serializes_with_kind_tag() {
        let entry = TableEntry::Placeholder { message: "Aucune ligne".into(), span: 8 };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "placeholder");
        assert_eq!(json["span"], 8);
    }

    #[test]
    fn rows_skips_placeholders() {
        let view = ScheduleView {
            title: String::new(),
            header: HeaderView::default(),
            table: vec![TableEntry::Placeholder { message: "x".into(), span: 8 }],
        };
        assert_eq!(view.rows().count(), 0);
    }
}
