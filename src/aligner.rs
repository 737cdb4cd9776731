//! Positional alignment of the two statements on a shared fiscal-year axis.
//!
//! "Previous year" always means the previous position in [`FiscalYears`], never
//! the previous calendar value of the token.

use crate::error::{CreditAnalysisError, Result};
use crate::fields::FieldRef;
use crate::line_items::{find_line_item, LineItem, LineItemKind, Statement};
use crate::schema::RawStatementData;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Ordered, non-empty sequence of distinct fiscal-year labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FiscalYears {
    years: Vec<String>,
}

impl FiscalYears {
    pub fn new<I, S>(years: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let years: Vec<String> = years
            .into_iter()
            .map(|year| {
                let year: String = year.into();
                year.trim().to_string()
            })
            .collect();

        if years.is_empty() {
            return Err(CreditAnalysisError::InvalidFiscalYears(
                "at least one fiscal year is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for year in &years {
            if year.is_empty() {
                return Err(CreditAnalysisError::InvalidFiscalYears(
                    "fiscal year labels cannot be blank".to_string(),
                ));
            }
            if !seen.insert(year.as_str()) {
                return Err(CreditAnalysisError::InvalidFiscalYears(format!(
                    "fiscal year '{}' appears more than once",
                    year
                )));
            }
        }

        Ok(Self { years })
    }

    /// Consecutive calendar-year labels starting at `first_year`.
    ///
    /// The axis stops early rather than wrap past `i32::MAX`.
    pub fn consecutive(first_year: i32, count: usize) -> Self {
        let count = count.max(1);
        Self {
            years: (0..count)
                .map_while(|offset| {
                    i32::try_from(offset)
                        .ok()
                        .and_then(|offset| first_year.checked_add(offset))
                })
                .map(|year| year.to_string())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.years
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.years.iter().map(String::as_str)
    }

    pub fn position(&self, year: &str) -> Option<usize> {
        self.years.iter().position(|y| y == year)
    }

    pub fn contains(&self, year: &str) -> bool {
        self.position(year).is_some()
    }
}

impl TryFrom<Vec<String>> for FiscalYears {
    type Error = CreditAnalysisError;

    fn try_from(years: Vec<String>) -> Result<Self> {
        Self::new(years)
    }
}

impl From<FiscalYears> for Vec<String> {
    fn from(years: FiscalYears) -> Self {
        years.years
    }
}

/// One statement at one fiscal year, read on demand.
///
/// A row with no backing year (the year before the first) reads 0 everywhere.
/// Computed subtotals are evaluated from their terms, so they read the same
/// way whether or not the analyst could type into them.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    statement: Statement,
    source: Option<(&'a RawStatementData, &'a str)>,
}

impl<'a> Row<'a> {
    pub fn new(statement: Statement, data: &'a RawStatementData, year: &'a str) -> Self {
        Self {
            statement,
            source: Some((data, year)),
        }
    }

    pub fn zero(statement: Statement) -> Self {
        Self {
            statement,
            source: None,
        }
    }

    pub fn statement(&self) -> Statement {
        self.statement
    }

    pub fn year(&self) -> Option<&'a str> {
        self.source.map(|(_, year)| year)
    }

    pub fn is_zero(&self) -> bool {
        self.source.is_none()
    }

    pub fn value(&self, label: &str) -> f64 {
        let Some((data, year)) = self.source else {
            return 0.0;
        };

        match find_line_item(self.statement, label).and_then(LineItem::terms) {
            Some(terms) => terms
                .iter()
                .map(|term| term.sign * self.value(term.label))
                .sum(),
            None => data.value(label, year),
        }
    }

    pub fn field(&self, field: FieldRef) -> f64 {
        debug_assert_eq!(
            field.statement(),
            self.statement,
            "{:?} read from the wrong statement",
            field
        );
        self.value(field.label())
    }

    /// Every value-bearing line of the statement schema at this year.
    pub fn flatten(&self) -> BTreeMap<&'static str, f64> {
        self.statement
            .line_items()
            .iter()
            .filter(|item| item.kind != LineItemKind::Header)
            .map(|item| (item.label, self.value(item.label)))
            .collect()
    }
}

/// The four rows one year's metrics are derived from.
#[derive(Debug, Clone, Copy)]
pub struct AlignedYear<'a> {
    pub index: usize,
    pub year: &'a str,
    pub current_income: Row<'a>,
    pub current_balance: Row<'a>,
    pub previous_income: Row<'a>,
    pub previous_balance: Row<'a>,
}

/// Pairs the k-th year with the k-th rows of both statements and the rows at
/// position k - 1.
pub fn align<'a>(
    years: &'a FiscalYears,
    income: &'a RawStatementData,
    balance: &'a RawStatementData,
) -> Vec<AlignedYear<'a>> {
    let mut aligned = Vec::with_capacity(years.len());
    let mut previous: Option<&'a str> = None;

    for (index, year) in years.iter().enumerate() {
        let (previous_income, previous_balance) = match previous {
            Some(prev) => (
                Row::new(Statement::OperatingStatement, income, prev),
                Row::new(Statement::BalanceSheet, balance, prev),
            ),
            None => (
                Row::zero(Statement::OperatingStatement),
                Row::zero(Statement::BalanceSheet),
            ),
        };

        aligned.push(AlignedYear {
            index,
            year,
            current_income: Row::new(Statement::OperatingStatement, income, year),
            current_balance: Row::new(Statement::BalanceSheet, balance, year),
            previous_income,
            previous_balance,
        });

        previous = Some(year);
    }

    aligned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiscal_years_validation() {
        assert!(FiscalYears::new(Vec::<String>::new()).is_err());
        assert!(FiscalYears::new(["2020", "2021", "2020"]).is_err());
        assert!(FiscalYears::new(["2020", " "]).is_err());

        let years = FiscalYears::new(["FY23", "FY24"]).unwrap();
        assert_eq!(years.position("FY24"), Some(1));
        assert!(!years.contains("2024"));
    }

    #[test]
    fn test_consecutive_stops_at_last_representable_year() {
        let years = FiscalYears::consecutive(i32::MAX - 1, 5);
        assert_eq!(years.len(), 2);
        assert_eq!(years.as_slice().last().map(String::as_str), Some("2147483647"));

        let years = FiscalYears::consecutive(2019, 0);
        assert_eq!(years.len(), 1);
    }

    #[test]
    fn test_fiscal_years_deserialize_validates() {
        let parsed: std::result::Result<FiscalYears, _> = serde_json::from_str(r#"["2020","2020"]"#);
        assert!(parsed.is_err());

        let parsed: FiscalYears = serde_json::from_str(r#"["2020","2021"]"#).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_first_year_has_zero_previous_rows() {
        let years = FiscalYears::consecutive(2019, 3);
        let income = RawStatementData::new().with_value("10. Finance Charges", "2019", 20.0);
        let balance = RawStatementData::new().with_value("29. Inventory:", "2019", 50.0);

        let aligned = align(&years, &income, &balance);
        assert_eq!(aligned.len(), 3);

        let first = &aligned[0];
        assert!(first.previous_income.is_zero());
        assert!(first.previous_balance.is_zero());
        assert_eq!(first.previous_balance.field(FieldRef::Inventory), 0.0);
        assert_eq!(first.current_balance.field(FieldRef::Inventory), 50.0);

        let second = &aligned[1];
        assert_eq!(second.previous_income.field(FieldRef::FinanceCharges), 20.0);
        assert_eq!(second.current_income.field(FieldRef::FinanceCharges), 0.0);
    }

    #[test]
    fn test_alignment_is_positional() {
        // Out-of-calendar-order tokens: "previous" is still the prior position.
        let years = FiscalYears::new(["2024", "2019"]).unwrap();
        let balance = RawStatementData::new().with_value("29. Inventory:", "2024", 80.0);
        let income = RawStatementData::new();

        let aligned = align(&years, &income, &balance);
        assert_eq!(aligned[1].year, "2019");
        assert_eq!(aligned[1].previous_balance.field(FieldRef::Inventory), 80.0);
    }

    #[test]
    fn test_computed_lines_are_evaluated() {
        let income = RawStatementData::new()
            .with_value("1. Gross Sales - Total", "2020", 1_000.0)
            .with_value("2. Less Excise Duty/cess if any", "2020", 100.0)
            .with_value("4. Other operating/revenue income - Total", "2020", 50.0)
            .with_value("Cost of Goods Sold", "2020", 600.0)
            .with_value("Total Selling Gen & Admin Exp", "2020", 150.0);

        let row = Row::new(Statement::OperatingStatement, &income, "2020");
        assert_eq!(row.field(FieldRef::NetOperatingIncome), 950.0);
        assert_eq!(row.field(FieldRef::CostOfSales), 750.0);
        assert_eq!(row.field(FieldRef::OperatingProfit), 200.0);

        let flat = row.flatten();
        assert_eq!(flat.get("3. Net Sales (1-2)"), Some(&900.0));
        assert!(!flat.contains_key("CURRENT LIABILITIES"));
    }
}
