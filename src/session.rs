//! Workbook state held between edits: the current input snapshot and the
//! last published derived snapshot.
//!
//! [`Workbook`] is the single-owner form. [`SharedWorkbook`] can be shared
//! across threads; recomputation runs outside its lock and results are
//! published last-writer-wins.

use crate::aligner::FiscalYears;
use crate::config::EngineConfig;
use crate::error::{CreditAnalysisError, Result};
use crate::export::MetricsReport;
use crate::ingestion::{build_inputs, cell_records};
use crate::line_items::Statement;
use crate::metrics::DerivedMetricsData;
use crate::schema::StatementInputs;
use crate::validation::{AcceptedCell, ValidationGate};
use crate::CreditAnalysisProcessor;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct Workbook {
    config: EngineConfig,
    fiscal_years: FiscalYears,
    inputs: Arc<StatementInputs>,
    derived: Option<Arc<DerivedMetricsData>>,
}

impl Workbook {
    /// Opens an empty workbook on the configured default fiscal years.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let years = config.default_fiscal_years();
        Self::with_fiscal_years(config, years)
    }

    pub fn with_fiscal_years(config: EngineConfig, fiscal_years: FiscalYears) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fiscal_years,
            inputs: Arc::new(StatementInputs::new()),
            derived: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fiscal_years(&self) -> &FiscalYears {
        &self.fiscal_years
    }

    pub fn inputs(&self) -> Arc<StatementInputs> {
        Arc::clone(&self.inputs)
    }

    pub fn derived(&self) -> Option<Arc<DerivedMetricsData>> {
        self.derived.clone()
    }

    /// Stores one numeric cell. A rejected cell leaves the snapshot unchanged.
    pub fn set_cell(&mut self, statement: Statement, label: &str, year: &str, value: f64) -> Result<()> {
        let cell = ValidationGate::new(&self.config, &self.fiscal_years)
            .accept(statement, label, year, value)?;
        self.inputs = Arc::new(apply(&self.inputs, &cell));
        Ok(())
    }

    /// Stores one cell as typed into the entry grid.
    pub fn enter_cell(&mut self, statement: Statement, label: &str, year: &str, text: &str) -> Result<()> {
        let cell = ValidationGate::new(&self.config, &self.fiscal_years)
            .accept_text(statement, label, year, text)?;
        self.inputs = Arc::new(apply(&self.inputs, &cell));
        Ok(())
    }

    /// Replaces the whole input snapshot, e.g. one read back with
    /// [`StatementInputs::from_json`]. Every cell goes through the validation
    /// gate again; on the first rejection the current snapshot is kept.
    pub fn replace_inputs(&mut self, inputs: &StatementInputs) -> Result<()> {
        let records = cell_records(inputs);
        let validated = build_inputs(&records, &self.config, &self.fiscal_years)?;
        debug!("Replaced inputs with {} validated cells", records.len());
        self.inputs = Arc::new(validated);
        Ok(())
    }

    /// Derives metrics from the current snapshot and publishes them. On error
    /// the previously published snapshot stays in place.
    pub fn recompute(&mut self) -> Result<Arc<DerivedMetricsData>> {
        let derived = Arc::new(CreditAnalysisProcessor::process(
            &self.config,
            &self.fiscal_years,
            &self.inputs,
        )?);
        self.derived = Some(Arc::clone(&derived));
        Ok(derived)
    }

    /// Clears both statements and the derived snapshot together.
    pub fn reset(&mut self) {
        self.inputs = Arc::new(StatementInputs::new());
        self.derived = None;
        info!("Workbook reset");
    }

    pub fn export_csv(&self) -> Result<String> {
        let derived = self.derived.as_ref().ok_or(CreditAnalysisError::NoInputData)?;
        MetricsReport::new(derived).to_csv()
    }

    pub fn export_markdown(&self) -> Result<String> {
        let derived = self.derived.as_ref().ok_or(CreditAnalysisError::NoInputData)?;
        Ok(MetricsReport::new(derived).to_markdown())
    }
}

fn apply(inputs: &StatementInputs, cell: &AcceptedCell) -> StatementInputs {
    inputs.with_value(cell.statement, cell.label, &cell.year, cell.value)
}

#[derive(Debug)]
struct SharedState {
    inputs: Arc<StatementInputs>,
    derived: Option<Arc<DerivedMetricsData>>,
    /// Bumped on reset; tickets issued before a reset can never publish.
    epoch: u64,
    /// Highest ticket whose result was published in the current epoch.
    published: u64,
}

/// A recompute request bound to the snapshot it was issued against.
#[derive(Debug, Clone)]
pub struct RecomputeTicket {
    id: u64,
    epoch: u64,
    config: EngineConfig,
    fiscal_years: FiscalYears,
    inputs: Arc<StatementInputs>,
}

impl RecomputeTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn inputs(&self) -> &StatementInputs {
        &self.inputs
    }

    /// Runs the derivation on the captured snapshot. Takes no lock.
    pub fn run(&self) -> Result<DerivedMetricsData> {
        CreditAnalysisProcessor::process(&self.config, &self.fiscal_years, &self.inputs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecomputeOutcome {
    Published(Arc<DerivedMetricsData>),
    /// A newer ticket already published, or the workbook was reset.
    Superseded,
}

#[derive(Debug)]
pub struct SharedWorkbook {
    config: EngineConfig,
    fiscal_years: FiscalYears,
    state: RwLock<SharedState>,
    next_ticket: AtomicU64,
}

impl SharedWorkbook {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let years = config.default_fiscal_years();
        Self::with_fiscal_years(config, years)
    }

    pub fn with_fiscal_years(config: EngineConfig, fiscal_years: FiscalYears) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fiscal_years,
            state: RwLock::new(SharedState {
                inputs: Arc::new(StatementInputs::new()),
                derived: None,
                epoch: 0,
                published: 0,
            }),
            next_ticket: AtomicU64::new(1),
        })
    }

    // A panic while holding the lock cannot leave the state half-written:
    // every write swaps whole `Arc`s.
    fn read(&self) -> RwLockReadGuard<'_, SharedState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SharedState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn fiscal_years(&self) -> &FiscalYears {
        &self.fiscal_years
    }

    pub fn inputs(&self) -> Arc<StatementInputs> {
        Arc::clone(&self.read().inputs)
    }

    pub fn derived(&self) -> Option<Arc<DerivedMetricsData>> {
        self.read().derived.clone()
    }

    pub fn set_cell(&self, statement: Statement, label: &str, year: &str, value: f64) -> Result<()> {
        let cell = ValidationGate::new(&self.config, &self.fiscal_years)
            .accept(statement, label, year, value)?;
        let mut state = self.write();
        state.inputs = Arc::new(apply(&state.inputs, &cell));
        Ok(())
    }

    pub fn enter_cell(&self, statement: Statement, label: &str, year: &str, text: &str) -> Result<()> {
        let cell = ValidationGate::new(&self.config, &self.fiscal_years)
            .accept_text(statement, label, year, text)?;
        let mut state = self.write();
        state.inputs = Arc::new(apply(&state.inputs, &cell));
        Ok(())
    }

    /// Captures the current snapshot under a fresh ticket.
    pub fn begin_recompute(&self) -> Result<RecomputeTicket> {
        let state = self.read();
        if state.inputs.is_empty() {
            return Err(CreditAnalysisError::NoInputData);
        }

        let id = self.next_ticket.fetch_add(1, Ordering::SeqCst);
        debug!("Issued recompute ticket {} (epoch {})", id, state.epoch);

        Ok(RecomputeTicket {
            id,
            epoch: state.epoch,
            config: self.config.clone(),
            fiscal_years: self.fiscal_years.clone(),
            inputs: Arc::clone(&state.inputs),
        })
    }

    /// Publishes a finished result unless a newer ticket got there first.
    pub fn publish(&self, ticket: &RecomputeTicket, derived: DerivedMetricsData) -> RecomputeOutcome {
        let mut state = self.write();

        if ticket.epoch != state.epoch || ticket.id <= state.published {
            warn!(
                "Dropping result of recompute ticket {}: superseded by ticket {} (epoch {} vs {})",
                ticket.id, state.published, ticket.epoch, state.epoch
            );
            return RecomputeOutcome::Superseded;
        }

        let derived = Arc::new(derived);
        state.derived = Some(Arc::clone(&derived));
        state.published = ticket.id;
        debug!("Published recompute ticket {}", ticket.id);
        RecomputeOutcome::Published(derived)
    }

    /// Snapshot, compute outside the lock, publish.
    pub fn recompute(&self) -> Result<RecomputeOutcome> {
        let ticket = self.begin_recompute()?;
        let derived = ticket.run()?;
        Ok(self.publish(&ticket, derived))
    }

    pub fn reset(&self) {
        let mut state = self.write();
        state.inputs = Arc::new(StatementInputs::new());
        state.derived = None;
        state.epoch += 1;
        state.published = 0;
        info!("Shared workbook reset (epoch {})", state.epoch);
    }

    pub fn export_csv(&self) -> Result<String> {
        let derived = self.derived().ok_or(CreditAnalysisError::NoInputData)?;
        MetricsReport::new(&derived).to_csv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metric;
    use std::thread;

    fn workbook() -> Workbook {
        Workbook::with_fiscal_years(EngineConfig::default(), FiscalYears::consecutive(2019, 2))
            .unwrap()
    }

    #[test]
    fn test_recompute_requires_input() {
        let mut book = workbook();
        assert!(matches!(book.recompute(), Err(CreditAnalysisError::NoInputData)));
        assert!(book.derived().is_none());
    }

    #[test]
    fn test_rejected_cell_leaves_inputs_unchanged() {
        let mut book = workbook();
        book.set_cell(Statement::BalanceSheet, "29. Inventory:", "2019", 10.0)
            .unwrap();
        let before = book.inputs();

        let result = book.set_cell(Statement::BalanceSheet, "29. Inventory:", "2019", 1e11);
        assert!(result.is_err());
        assert_eq!(*book.inputs(), *before);
        assert_eq!(book.inputs().balance_sheet.get("29. Inventory:", "2019"), Some(10.0));
    }

    #[test]
    fn test_replace_inputs_revalidates_cells() {
        let mut book = workbook();
        book.set_cell(Statement::BalanceSheet, "29. Inventory:", "2019", 40.0)
            .unwrap();

        let loaded = StatementInputs::from_json(
            r#"{ "balance_sheet": { "Inventory": { "2019": 10.0, "2020": 20.0 } } }"#,
        )
        .unwrap();
        book.replace_inputs(&loaded).unwrap();
        assert_eq!(book.inputs().balance_sheet.get("29. Inventory:", "2020"), Some(20.0));
        assert_eq!(book.inputs().balance_sheet.get("Inventory", "2020"), None);

        let out_of_bounds = StatementInputs::from_json(
            r#"{ "balance_sheet": { "29. Inventory:": { "2019": 1e15 } } }"#,
        )
        .unwrap();
        let result = book.replace_inputs(&out_of_bounds);
        assert!(matches!(result, Err(CreditAnalysisError::InvalidInput { .. })));

        let unknown = StatementInputs::from_json(
            r#"{ "operating_statement": { "Not a line item": { "2019": 1.0 } } }"#,
        )
        .unwrap();
        assert!(book.replace_inputs(&unknown).is_err());
        assert_eq!(book.inputs().balance_sheet.get("29. Inventory:", "2019"), Some(10.0));
    }

    #[test]
    fn test_recompute_and_export() {
        let mut book = workbook();
        book.enter_cell(Statement::OperatingStatement, "1. Gross Sales - Total", "2019", "100")
            .unwrap();
        book.enter_cell(Statement::OperatingStatement, "1. Gross Sales - Total", "2020", "150")
            .unwrap();

        let derived = book.recompute().unwrap();
        let growth = derived.get(Metric::SalesGrowth, "2020").unwrap();
        assert!((growth - 50.0).abs() < 0.01);

        let csv = book.export_csv().unwrap();
        assert!(csv.starts_with("Particulars,2019,2020"));
        assert!(csv.contains("Sales growth,10000.00,50.00"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut book = workbook();
        book.set_cell(Statement::BalanceSheet, "# SBLC", "2019", 5.0).unwrap();
        book.recompute().unwrap();

        book.reset();
        assert!(book.inputs().is_empty());
        assert!(book.derived().is_none());
        assert!(book.export_csv().is_err());
    }

    #[test]
    fn test_stale_ticket_is_not_published() {
        let shared = SharedWorkbook::with_fiscal_years(
            EngineConfig::default(),
            FiscalYears::consecutive(2019, 1),
        )
        .unwrap();
        shared
            .set_cell(Statement::OperatingStatement, "1. Gross Sales - Total", "2019", 100.0)
            .unwrap();
        let older = shared.begin_recompute().unwrap();

        shared
            .set_cell(Statement::OperatingStatement, "1. Gross Sales - Total", "2019", 200.0)
            .unwrap();
        let newer = shared.begin_recompute().unwrap();
        assert!(newer.id() > older.id());

        let newer_result = newer.run().unwrap();
        assert!(matches!(
            shared.publish(&newer, newer_result),
            RecomputeOutcome::Published(_)
        ));

        let older_result = older.run().unwrap();
        assert_eq!(shared.publish(&older, older_result), RecomputeOutcome::Superseded);

        let derived = shared.derived().unwrap();
        assert_eq!(derived.get(Metric::TotalOperatingIncome, "2019"), Some(200.0));
    }

    #[test]
    fn test_reset_discards_in_flight_results() {
        let shared = SharedWorkbook::new(EngineConfig::default()).unwrap();
        shared.set_cell(Statement::BalanceSheet, "# SBLC", "2019", 5.0).unwrap();
        let ticket = shared.begin_recompute().unwrap();

        shared.reset();
        let result = ticket.run().unwrap();
        assert_eq!(shared.publish(&ticket, result), RecomputeOutcome::Superseded);
        assert!(shared.derived().is_none());
        assert!(shared.inputs().is_empty());
    }

    #[test]
    fn test_concurrent_recomputes_publish_a_whole_snapshot() {
        let shared = Arc::new(SharedWorkbook::new(EngineConfig::default()).unwrap());
        shared
            .set_cell(Statement::OperatingStatement, "1. Gross Sales - Total", "2019", 100.0)
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    shared
                        .set_cell(
                            Statement::BalanceSheet,
                            "29. Inventory:",
                            "2020",
                            (i as f64) * 10.0,
                        )
                        .unwrap();
                    shared.recompute().unwrap()
                })
            })
            .collect();

        let published = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|outcome| matches!(outcome, RecomputeOutcome::Published(_)))
            .count();
        assert!(published >= 1);

        let derived = shared.derived().unwrap();
        assert_eq!(derived.fiscal_years().len(), 11);
        for metric in Metric::ALL {
            assert!(derived.get(*metric, "2029").is_some());
        }
    }
}
