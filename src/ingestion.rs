use crate::aligner::FiscalYears;
use crate::config::EngineConfig;
use crate::error::{CreditAnalysisError, Result};
use crate::line_items::Statement;
use crate::schema::StatementInputs;
use crate::validation::ValidationGate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One cell as it arrives from an entry grid or an upstream export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub statement: Statement,
    pub label: String,
    pub year: String,
    pub value: f64,
}

/// Outcome of a lenient load: the accepted snapshot plus every rejected cell
/// with the reason it was turned away.
#[derive(Debug)]
pub struct IngestionReport {
    pub inputs: StatementInputs,
    pub accepted: usize,
    pub rejected: Vec<(CellRecord, CreditAnalysisError)>,
}

/// Builds a snapshot from cell records, stopping at the first rejection.
pub fn build_inputs(
    records: &[CellRecord],
    config: &EngineConfig,
    years: &FiscalYears,
) -> Result<StatementInputs> {
    let gate = ValidationGate::new(config, years);
    let mut inputs = StatementInputs::new();

    for record in records {
        let cell = gate.accept(record.statement, &record.label, &record.year, record.value)?;
        inputs.set_value(cell.statement, cell.label, &cell.year, cell.value);
    }

    debug!("Built input snapshot from {} cells", records.len());
    Ok(inputs)
}

/// Flattens a snapshot back into cell records, operating statement first.
pub fn cell_records(inputs: &StatementInputs) -> Vec<CellRecord> {
    Statement::ALL
        .into_iter()
        .flat_map(|statement| {
            inputs
                .statement(statement)
                .iter()
                .map(move |(label, year, value)| CellRecord {
                    statement,
                    label: label.to_string(),
                    year: year.to_string(),
                    value,
                })
        })
        .collect()
}

/// Builds a snapshot from every acceptable record and reports the rest.
pub fn build_inputs_lenient(
    records: Vec<CellRecord>,
    config: &EngineConfig,
    years: &FiscalYears,
) -> IngestionReport {
    let gate = ValidationGate::new(config, years);
    let mut inputs = StatementInputs::new();
    let mut accepted = 0;
    let mut rejected = Vec::new();

    for record in records {
        match gate.accept(record.statement, &record.label, &record.year, record.value) {
            Ok(cell) => {
                inputs.set_value(cell.statement, cell.label, &cell.year, cell.value);
                accepted += 1;
            }
            Err(e) => rejected.push((record, e)),
        }
    }

    if !rejected.is_empty() {
        warn!("{} of {} cells rejected", rejected.len(), accepted + rejected.len());
    }

    IngestionReport {
        inputs,
        accepted,
        rejected,
    }
}

/// Reads one statement laid out as a grid: a `Particulars` column of labels
/// followed by one column per fiscal year. Cells go through the text gate, so
/// blanks enter 0 and thousands separators are accepted.
pub fn read_statement_grid<R: Read>(
    reader: R,
    statement: Statement,
    inputs: &StatementInputs,
    config: &EngineConfig,
    years: &FiscalYears,
) -> Result<StatementInputs> {
    let gate = ValidationGate::new(config, years);
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let year_columns: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, year)| !year.is_empty())
        .map(|(index, year)| (index, year.clone()))
        .collect();

    info!(
        "Reading {} grid with {} year columns",
        statement.title(),
        year_columns.len()
    );

    let mut next = inputs.clone();
    let mut cells = 0usize;

    for row in csv_reader.records() {
        let row = row?;
        let Some(label) = row.get(0).filter(|label| !label.is_empty()) else {
            continue;
        };

        for (index, year) in &year_columns {
            let Some(text) = row.get(*index).filter(|text| !text.is_empty()) else {
                continue;
            };
            let cell = gate.accept_text(statement, label, year, text)?;
            next.set_value(cell.statement, cell.label, &cell.year, cell.value);
            cells += 1;
        }
    }

    debug!("Read {} cells into {}", cells, statement.title());
    Ok(next)
}
