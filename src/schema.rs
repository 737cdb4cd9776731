use crate::line_items::Statement;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw values keyed by line-item label, then by fiscal-year label, for one
/// statement.
///
/// Missing cells read as 0. Values are expected to have passed the
/// validation gate; non-finite values that slip in through deserialization
/// also read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RawStatementData {
    cells: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RawStatementData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored value, or `None` when the cell was never entered.
    pub fn get(&self, label: &str, year: &str) -> Option<f64> {
        self.cells.get(label).and_then(|years| years.get(year)).copied()
    }

    /// The value used by the derivation: missing or non-finite cells read as 0.
    pub fn value(&self, label: &str, year: &str) -> f64 {
        match self.get(label, year) {
            Some(value) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    /// Returns a new snapshot with one cell replaced.
    pub fn with_value(&self, label: &str, year: &str, value: f64) -> Self {
        let mut next = self.clone();
        next.set_value(label, year, value);
        next
    }

    /// In-place write used while a snapshot is still being assembled.
    pub(crate) fn set_value(&mut self, label: &str, year: &str, value: f64) {
        self.cells
            .entry(label.to_string())
            .or_default()
            .insert(year.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.values().all(|years| years.is_empty())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.values().map(|years| years.len()).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.cells.iter().flat_map(|(label, years)| {
            years
                .iter()
                .map(move |(year, value)| (label.as_str(), year.as_str(), *value))
        })
    }
}

/// Immutable snapshot of both statements as entered.
///
/// Edits never mutate a snapshot in place; [`StatementInputs::with_value`]
/// produces the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatementInputs {
    #[serde(default)]
    #[schemars(description = "Form II: operating statement line items")]
    pub operating_statement: RawStatementData,

    #[serde(default)]
    #[schemars(description = "Form III: balance sheet line items")]
    pub balance_sheet: RawStatementData,
}

impl StatementInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statement(&self, statement: Statement) -> &RawStatementData {
        match statement {
            Statement::OperatingStatement => &self.operating_statement,
            Statement::BalanceSheet => &self.balance_sheet,
        }
    }

    pub fn with_value(&self, statement: Statement, label: &str, year: &str, value: f64) -> Self {
        let mut next = self.clone();
        next.set_value(statement, label, year, value);
        next
    }

    /// In-place write for bulk loads; the snapshot is not shared until the
    /// load returns it.
    pub(crate) fn set_value(&mut self, statement: Statement, label: &str, year: &str, value: f64) {
        let data = match statement {
            Statement::OperatingStatement => &mut self.operating_statement,
            Statement::BalanceSheet => &mut self.balance_sheet,
        };
        data.set_value(label, year, value);
    }

    /// True when neither statement holds a single cell.
    pub fn is_empty(&self) -> bool {
        self.operating_statement.is_empty() && self.balance_sheet.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(StatementInputs)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
