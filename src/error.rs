use thiserror::Error;

#[derive(Error, Debug)]
pub enum CreditAnalysisError {
    #[error("Invalid value for '{label}' in {year}: {reason}")]
    InvalidInput {
        label: String,
        year: String,
        reason: String,
    },

    #[error("Unknown line item: {0}")]
    UnknownLineItem(String),

    #[error("Unknown fiscal year: {0}")]
    UnknownFiscalYear(String),

    #[error("Line item '{0}' is not editable")]
    NotEditable(String),

    #[error("No input data: enter values in the operating statement or balance sheet first")]
    NoInputData,

    #[error("Error calculating output: {0}")]
    ComputationFault(String),

    #[error("Invalid fiscal year sequence: {0}")]
    InvalidFiscalYears(String),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CreditAnalysisError>;
