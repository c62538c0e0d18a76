use chrono::NaiveDate;

/// Loan-level summary delivered by the parameters table.
///
/// Every field is optional: the host may omit a column or leave a cell empty.
/// The value is replaced wholesale on every update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderParams {
    /// Borrowed principal (`Montant`).
    pub principal: Option<f64>,
    /// Annual rate as a fraction, `0.035` for 3.5 % (`TauxAnnuel`).
    pub annual_rate: Option<f64>,
    /// Monthly installment (`Mensualité`).
    pub monthly_payment: Option<f64>,
    /// Duration in months, kept as display text since the host may send
    /// either a number or a string (`Duree_Mois` and its aliases).
    pub duration_months: Option<String>,
    /// Sum of interest over the loan (`TotalInterets`).
    pub total_interest: Option<f64>,
    /// Total cost of the loan (`CoutTotal`).
    pub total_cost: Option<f64>,
}

/// A date cell as delivered by the host: either ISO-8601 text or an
/// already-decoded calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Text(String),
    Date(NaiveDate),
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        DateValue::Text(text.to_string())
    }
}

impl From<String> for DateValue {
    fn from(text: String) -> Self {
        DateValue::Text(text)
    }
}

/// One period of the amortization schedule, in the order the host sent it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmortizationRow {
    /// Sequence number, displayed verbatim (`Numero`).
    pub number: Option<String>,
    pub date: Option<DateValue>,
    /// Balance at the start of the period (`CapitalInitial`).
    pub opening_balance: Option<f64>,
    /// `Interets`
    pub interest: Option<f64>,
    /// `MontantFrais`
    pub fee: Option<f64>,
    /// `CapitalRembourse`
    pub principal_repaid: Option<f64>,
    /// Balance at the end of the period (`CapitalFinal`).
    pub closing_balance: Option<f64>,
    /// `Mensualite`
    pub installment: Option<f64>,
}
