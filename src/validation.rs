//! Boundary checks applied to every cell before it reaches a snapshot.

use crate::aligner::FiscalYears;
use crate::config::EngineConfig;
use crate::error::{CreditAnalysisError, Result};
use crate::fields::resolve_label;
use crate::line_items::{find_line_item, Statement};
use crate::utils::parse_cell;
use log::warn;

/// A cell that passed the gate, keyed by its canonical label.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedCell {
    pub statement: Statement,
    pub label: &'static str,
    pub year: String,
    pub value: f64,
}

/// Monetary cells: finite and within `[-limit, limit]`.
pub fn check_amount(value: f64, limit: f64) -> std::result::Result<f64, String> {
    if value.is_nan() {
        return Err("Value must be a finite number".to_string());
    }
    if value < -limit {
        return Err("Value is too small".to_string());
    }
    if value > limit {
        return Err("Value is too large".to_string());
    }
    if !value.is_finite() {
        return Err("Value must be a finite number".to_string());
    }
    Ok(value)
}

/// Percentage cells: finite and within `[min, max]`.
pub fn check_percentage(value: f64, min: f64, max: f64) -> std::result::Result<f64, String> {
    if !value.is_finite() {
        return Err("Percentage must be a finite number".to_string());
    }
    if value < min {
        return Err(if min == 0.0 {
            "Percentage cannot be negative".to_string()
        } else {
            format!("Percentage cannot be below {}%", min)
        });
    }
    if value > max {
        return Err(format!("Percentage cannot exceed {}%", max));
    }
    Ok(value)
}

pub struct ValidationGate<'a> {
    config: &'a EngineConfig,
    years: &'a FiscalYears,
}

impl<'a> ValidationGate<'a> {
    pub fn new(config: &'a EngineConfig, years: &'a FiscalYears) -> Self {
        Self { config, years }
    }

    /// Checks one numeric cell. A rejection carries a human-readable reason
    /// and never touches stored state.
    pub fn accept(
        &self,
        statement: Statement,
        label: &str,
        year: &str,
        value: f64,
    ) -> Result<AcceptedCell> {
        let canonical = self.editable_label(statement, label)?;
        let year = self.known_year(year)?;

        let checked = match find_line_item(statement, canonical) {
            Some(item) if item.is_percentage() => check_percentage(
                value,
                self.config.percentage_min,
                self.config.percentage_max,
            ),
            _ => check_amount(value, self.config.monetary_limit),
        };

        match checked {
            Ok(value) => Ok(AcceptedCell {
                statement,
                label: canonical,
                year,
                value,
            }),
            Err(reason) => {
                warn!("Rejected '{}' for {}: {}", canonical, year, reason);
                Err(CreditAnalysisError::InvalidInput {
                    label: canonical.to_string(),
                    year,
                    reason,
                })
            }
        }
    }

    /// Checks a cell as typed. Blank text enters 0; text that is not a number
    /// is rejected.
    pub fn accept_text(
        &self,
        statement: Statement,
        label: &str,
        year: &str,
        text: &str,
    ) -> Result<AcceptedCell> {
        match parse_cell(text) {
            Some(value) => self.accept(statement, label, year, value),
            None => {
                let canonical = self.editable_label(statement, label)?;
                let year = self.known_year(year)?;
                warn!("Rejected '{}' for {}: '{}' is not a number", canonical, year, text);
                Err(CreditAnalysisError::InvalidInput {
                    label: canonical.to_string(),
                    year,
                    reason: "Value must be a number".to_string(),
                })
            }
        }
    }

    fn editable_label(&self, statement: Statement, label: &str) -> Result<&'static str> {
        let canonical = resolve_label(statement, label)?;
        match find_line_item(statement, canonical) {
            Some(item) if item.accepts_input() => Ok(canonical),
            _ => Err(CreditAnalysisError::NotEditable(canonical.to_string())),
        }
    }

    fn known_year(&self, year: &str) -> Result<String> {
        let year = year.trim();
        if self.years.contains(year) {
            Ok(year.to_string())
        } else {
            Err(CreditAnalysisError::UnknownFiscalYear(year.to_string()))
        }
    }
}
