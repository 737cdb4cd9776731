//! # Credit Analysis Engine
//!
//! Derives the credit-analysis metric set from a multi-year operating
//! statement (Form II) and balance sheet (Form III).
//!
//! ## Core Concepts
//!
//! - **Statement inputs**: raw cell values keyed by canonical line-item label, then by fiscal year
//! - **Fiscal years**: an ordered axis; "previous year" always means the previous position
//! - **Computed lines**: subtotals such as Net Sales are evaluated from their terms, never typed in
//! - **Derived metrics**: a fixed vocabulary of amounts, ratios, percentages and day counts per year
//! - **Safe arithmetic**: no input combination produces NaN or infinity in the output
//!
//! ## Example
//!
//! ```rust
//! use credit_analysis_engine::*;
//!
//! let config = EngineConfig::default();
//! let years = FiscalYears::new(["2023", "2024"]).unwrap();
//!
//! let inputs = StatementInputs::new()
//!     .with_value(Statement::OperatingStatement, "1. Gross Sales - Total", "2023", 100.0)
//!     .with_value(Statement::OperatingStatement, "1. Gross Sales - Total", "2024", 150.0);
//!
//! let derived = process_credit_analysis(&config, &years, &inputs).unwrap();
//! assert_eq!(derived.get(Metric::SalesGrowth, "2024"), Some(50.0));
//! ```

pub mod aligner;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod fields;
pub mod ingestion;
pub mod line_items;
pub mod metrics;
pub mod schema;
pub mod session;
pub mod utils;
pub mod validation;

pub use aligner::{align, AlignedYear, FiscalYears, Row};
pub use config::EngineConfig;
pub use engine::{BaseFigures, DerivationEngine};
pub use error::{CreditAnalysisError, Result};
pub use export::MetricsReport;
pub use fields::{resolve_label, FieldRef, LABEL_ALIASES};
pub use ingestion::*;
pub use line_items::{find_line_item, LineItem, LineItemKind, Section, Statement, Term};
pub use metrics::{DerivedMetricsData, Metric, PresentationSection, Unit, YearMetrics};
pub use schema::{RawStatementData, StatementInputs};
pub use session::{RecomputeOutcome, RecomputeTicket, SharedWorkbook, Workbook};
pub use utils::*;
pub use validation::{check_amount, check_percentage, AcceptedCell, ValidationGate};

use log::{debug, info};
use std::panic::{self, AssertUnwindSafe};

pub struct CreditAnalysisProcessor;

impl CreditAnalysisProcessor {
    /// Runs the full derivation over one input snapshot.
    ///
    /// Refuses to run when both statements are empty. A fault inside the
    /// derivation, or a non-finite value in its output, is reported as
    /// [`CreditAnalysisError::ComputationFault`] and nothing is returned.
    pub fn process(
        config: &EngineConfig,
        years: &FiscalYears,
        inputs: &StatementInputs,
    ) -> Result<DerivedMetricsData> {
        config.validate()?;

        if inputs.is_empty() {
            return Err(CreditAnalysisError::NoInputData);
        }

        info!(
            "Computing credit analysis across {} fiscal years",
            years.len()
        );
        debug!(
            "Snapshot holds {} operating statement cells and {} balance sheet cells",
            inputs.operating_statement.cell_count(),
            inputs.balance_sheet.cell_count()
        );

        let engine = DerivationEngine::new(config);
        let derived = panic::catch_unwind(AssertUnwindSafe(|| engine.compute(years, inputs)))
            .map_err(|payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "derivation panicked".to_string());
                CreditAnalysisError::ComputationFault(message)
            })?;

        if !derived.all_finite() {
            return Err(CreditAnalysisError::ComputationFault(
                "derivation produced a non-finite value".to_string(),
            ));
        }

        debug!("Derived {} metrics", derived.metric_count());
        Ok(derived)
    }

    /// Processes and renders the result as CSV in one step.
    pub fn process_to_csv(
        config: &EngineConfig,
        years: &FiscalYears,
        inputs: &StatementInputs,
    ) -> Result<String> {
        let derived = Self::process(config, years, inputs)?;
        MetricsReport::new(&derived).to_csv()
    }
}

pub fn process_credit_analysis(
    config: &EngineConfig,
    years: &FiscalYears,
    inputs: &StatementInputs,
) -> Result<DerivedMetricsData> {
    CreditAnalysisProcessor::process(config, years, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_year_company() -> StatementInputs {
        let mut inputs = StatementInputs::new();
        for (year, sales, cogs, interest, inventory) in
            [("2023", 1_000.0, 600.0, 40.0, 120.0), ("2024", 1_200.0, 700.0, 45.0, 160.0)]
        {
            inputs = inputs
                .with_value(Statement::OperatingStatement, "1. Gross Sales - Total", year, sales)
                .with_value(Statement::OperatingStatement, "Cost of Goods Sold", year, cogs)
                .with_value(Statement::OperatingStatement, "10. Finance Charges", year, interest)
                .with_value(Statement::BalanceSheet, "29. Inventory:", year, inventory)
                .with_value(
                    Statement::BalanceSheet,
                    "31. Total Current Assets (26 to 30)",
                    year,
                    inventory * 2.0,
                )
                .with_value(
                    Statement::BalanceSheet,
                    "7. Total current liabilities [A + B]",
                    year,
                    inventory,
                );
        }
        inputs
    }

    #[test]
    fn test_end_to_end_processing() {
        let config = EngineConfig::default();
        let years = FiscalYears::new(["2023", "2024"]).unwrap();

        let derived = process_credit_analysis(&config, &years, &two_year_company()).unwrap();

        let ebitda = derived.get(Metric::Ebitda, "2024").unwrap();
        assert!((ebitda - 500.0).abs() < 0.01);

        let growth = derived.get(Metric::SalesGrowth, "2024").unwrap();
        assert!((growth - 20.0).abs() < 0.01);

        let current_ratio = derived.get(Metric::CurrentRatio, "2024").unwrap();
        assert!((current_ratio - 2.0).abs() < 0.01);

        // Average inventory 140 against COGS 700.
        assert_eq!(derived.get(Metric::InventoryDays, "2024"), Some(73.0));
        assert!(derived.all_finite());
    }

    #[test]
    fn test_empty_inputs_are_refused() {
        let config = EngineConfig::default();
        let years = config.default_fiscal_years();

        let result = process_credit_analysis(&config, &years, &StatementInputs::new());
        assert!(matches!(result, Err(CreditAnalysisError::NoInputData)));
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let config = EngineConfig {
            days_in_year: 0.0,
            ..EngineConfig::default()
        };
        let years = FiscalYears::consecutive(2023, 2);

        let result = process_credit_analysis(&config, &years, &two_year_company());
        assert!(matches!(result, Err(CreditAnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_years_outside_the_axis_are_ignored() {
        let config = EngineConfig::default();
        let years = FiscalYears::new(["2024"]).unwrap();

        let derived = process_credit_analysis(&config, &years, &two_year_company()).unwrap();
        assert!(derived.get(Metric::Ebitda, "2023").is_none());

        // With 2023 off the axis, 2024 is the first year and grows from nothing.
        let growth = derived.get(Metric::SalesGrowth, "2024").unwrap();
        assert!((growth - 120_000.0).abs() < 0.01);
    }

    #[test]
    fn test_process_to_csv() {
        let config = EngineConfig::default();
        let years = FiscalYears::new(["2023", "2024"]).unwrap();

        let csv = CreditAnalysisProcessor::process_to_csv(&config, &years, &two_year_company())
            .unwrap();
        assert!(csv.starts_with("Particulars,2023,2024\n"));
        assert!(csv.contains("\nEBITDA,400.00,500.00\n"));
    }
}
