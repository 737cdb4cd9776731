use crate::aligner::FiscalYears;
use crate::error::{CreditAnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MONETARY_LIMIT: f64 = 9_999_999_999.0;
pub const DEFAULT_DAYS_IN_YEAR: f64 = 365.0;
pub const DEFAULT_FIRST_YEAR: i32 = 2019;
pub const DEFAULT_YEAR_COUNT: usize = 11;
pub const MAX_YEAR_COUNT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    #[schemars(
        description = "Largest magnitude accepted for a monetary cell. Values outside [-limit, limit] are rejected."
    )]
    pub monetary_limit: f64,

    #[schemars(description = "Lower bound for percentage-typed cells.")]
    pub percentage_min: f64,

    #[schemars(description = "Upper bound for percentage-typed cells.")]
    pub percentage_max: f64,

    #[schemars(description = "Day-count basis for debtor, inventory, payable and asset days.")]
    pub days_in_year: f64,

    #[schemars(description = "First calendar year of the default fiscal-year axis.")]
    pub first_year: i32,

    #[schemars(description = "Number of consecutive years in the default fiscal-year axis.")]
    pub year_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            monetary_limit: DEFAULT_MONETARY_LIMIT,
            percentage_min: 0.0,
            percentage_max: 100.0,
            days_in_year: DEFAULT_DAYS_IN_YEAR,
            first_year: DEFAULT_FIRST_YEAR,
            year_count: DEFAULT_YEAR_COUNT,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.monetary_limit.is_finite() || self.monetary_limit <= 0.0 {
            return Err(CreditAnalysisError::InvalidConfig(format!(
                "monetary_limit must be a positive finite number, got {}",
                self.monetary_limit
            )));
        }

        if !self.percentage_min.is_finite()
            || !self.percentage_max.is_finite()
            || self.percentage_min > self.percentage_max
        {
            return Err(CreditAnalysisError::InvalidConfig(format!(
                "percentage range [{}, {}] is not a valid interval",
                self.percentage_min, self.percentage_max
            )));
        }

        if !self.days_in_year.is_finite() || self.days_in_year <= 0.0 {
            return Err(CreditAnalysisError::InvalidConfig(format!(
                "days_in_year must be positive, got {}",
                self.days_in_year
            )));
        }

        if self.year_count == 0 || self.year_count > MAX_YEAR_COUNT {
            return Err(CreditAnalysisError::InvalidConfig(format!(
                "year_count must be between 1 and {}, got {}",
                MAX_YEAR_COUNT, self.year_count
            )));
        }

        let last_year = i32::try_from(self.year_count - 1)
            .ok()
            .and_then(|offset| self.first_year.checked_add(offset));
        if last_year.is_none() {
            return Err(CreditAnalysisError::InvalidConfig(format!(
                "a {}-year axis starting at {} runs past the last representable year",
                self.year_count, self.first_year
            )));
        }

        Ok(())
    }

    /// The fiscal-year axis used when a workbook is opened without one.
    pub fn default_fiscal_years(&self) -> FiscalYears {
        FiscalYears::consecutive(self.first_year, self.year_count)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(EngineConfig);
        serde_json::to_string_pretty(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.monetary_limit, 9_999_999_999.0);

        let years = config.default_fiscal_years();
        assert_eq!(years.len(), 11);
        assert_eq!(years.as_slice().first().map(String::as_str), Some("2019"));
        assert_eq!(years.as_slice().last().map(String::as_str), Some("2029"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "monetary_limit": 1000000.0 }"#).unwrap();
        assert_eq!(config.monetary_limit, 1_000_000.0);
        assert_eq!(config.days_in_year, 365.0);
        assert_eq!(config.percentage_max, 100.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = EngineConfig::from_json(r#"{ "days_in_year": 0.0 }"#);
        assert!(matches!(result, Err(CreditAnalysisError::InvalidConfig(_))));

        let result = EngineConfig::from_json(r#"{ "percentage_min": 50.0, "percentage_max": 10.0 }"#);
        assert!(matches!(result, Err(CreditAnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_year_axis_bounds_rejected() {
        let config = EngineConfig {
            first_year: i32::MAX,
            year_count: 2,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(CreditAnalysisError::InvalidConfig(_))));
        assert!(crate::session::Workbook::new(config.clone()).is_err());
        assert!(crate::session::SharedWorkbook::new(config).is_err());

        let config = EngineConfig {
            first_year: i32::MAX,
            year_count: 1,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());

        let result = EngineConfig::from_json(r#"{ "year_count": 1000000000 }"#);
        assert!(matches!(result, Err(CreditAnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_schema_generation() {
        let schema_json = EngineConfig::schema_as_json().unwrap();
        assert!(schema_json.contains("monetary_limit"));
        assert!(schema_json.contains("days_in_year"));
    }
}
