//! Output vocabulary of the ratio derivation and the derived-data container.

use crate::aligner::FiscalYears;
use crate::utils::{finite_or_zero, round_half_up, round_to};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// How a metric is rounded at the output boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Monetary amount, 2 decimals.
    Amount,
    /// Plain multiple (x times), 2 decimals.
    Ratio,
    /// Percentage points, 2 decimals.
    Percentage,
    /// Whole days.
    Days,
}

impl Unit {
    pub fn round(self, value: f64) -> f64 {
        match self {
            Unit::Days => round_half_up(value),
            Unit::Amount | Unit::Ratio | Unit::Percentage => round_to(value, 2),
        }
    }
}

macro_rules! metrics {
    ($($variant:ident => $label:literal, $unit:ident;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Metric {
            $($variant,)*
        }

        impl Metric {
            pub const ALL: &'static [Metric] = &[$(Metric::$variant,)*];

            pub fn label(self) -> &'static str {
                match self {
                    $(Metric::$variant => $label,)*
                }
            }

            pub fn unit(self) -> Unit {
                match self {
                    $(Metric::$variant => Unit::$unit,)*
                }
            }
        }
    };
}

metrics! {
    // Financial performance
    TotalOperatingIncome => "Total Operating Income", Amount;
    Ebitda => "EBITDA", Amount;
    Depreciation => "Depreciation", Amount;
    Interest => "Interest", Amount;
    OtherIncome => "Other Income", Amount;
    OtherExpense => "Other expense", Amount;
    ProfitBeforeTax => "Profit before tax", Amount;
    CurrentTax => "Current Tax", Amount;
    DeferredTax => "Deferred Tax", Amount;
    ProfitAfterTax => "Profit after tax", Amount;
    CashProfits => "Cash Profits (GCA)", Amount;

    // Capital structure
    ShareCapital => "Share Capital", Amount;
    TangibleNetWorth => "Tangible Net Worth (TNW)", Amount;
    UnsecuredLoanQuasiEquity => "Unsecured loan (Quasi eq.)", Amount;
    TotalDebt => "Total debt", Amount;
    TermDebt => "Term debt", Amount;
    Wctl => "WCTL", Amount;
    WorkingCapitalDebt => "Working capital debt", Amount;
    VehicleLoans => "Vehicle loans", Amount;
    UnsecuredLoans => "Unsecured loans", Amount;
    SblcBg => "SBLC/BG", Amount;
    CapitalEmployed => "Capital employed", Amount;
    LiquidityUnencumbered => "Liquidity (Unencumbered)", Amount;
    LiquidityEncumbered => "Liquidity (Encumbered)", Amount;
    Investments => "Investments", Amount;
    GroupCompanies => "Group companies", Amount;
    OtherInvestments => "Others", Amount;
    TotalOutsideLiabilities => "Total outside liabilities (TOL)", Amount;

    // Growth
    SalesGrowth => "Sales growth", Percentage;
    EbitdaGrowth => "EBITDA growth", Percentage;
    PbtGrowth => "PBT growth", Percentage;
    PatGrowth => "PAT growth", Percentage;

    // Profitability
    EbitdaMargin => "EBITDA Margin", Percentage;
    PbtMargin => "PBT Margin", Percentage;
    PatMargin => "PAT Margin", Percentage;

    // Returns
    ReturnOnCapitalEmployed => "Return on Capital Employed", Percentage;
    ReturnOnEquity => "Return on Equity", Percentage;

    // Solvency and coverage
    AverageCostOfBorrowing => "Average cost of borrowing", Percentage;
    CashProfitsToDebtRepay => "Cash Profits/Debt Repay", Ratio;
    DebtEquityRatio => "Debt Equity ratio", Ratio;
    OverallGearing => "Overall gearing", Ratio;
    TolTnw => "TOL/TNW", Ratio;
    InterestCoverageRatio => "Interest Coverage Ratio", Ratio;
    DebtServiceCoverageRatio => "Debt Service Coverage Ratio", Ratio;
    TotalDebtToCashProfits => "Total debt/Cash Profits", Ratio;
    TermDebtToCashProfits => "Term debt/Cash Profits", Ratio;
    TotalDebtToEbitda => "Total debt/EBITDA (Lev.)", Ratio;

    // Liquidity and turnover
    SalesToWcDebt => "Sales/WC debt", Ratio;
    CurrentRatio => "Current Ratio", Ratio;
    DebtorDays => "Debtor (days)", Days;
    InventoryDays => "Inventory (days)", Days;
    PayableDays => "Payable (days)", Days;
    OperatingCycleDays => "Operating cycle (days)", Days;
    AdjustedDebtorDays => "Adj. Debtor (days) (incl adv to supp)", Days;
    AdjustedPayableDays => "Adj. payable (days) (incl adv from cust)", Days;
    AdjustedOperatingCycleDays => "Adj. operating cycle (days)", Days;
    GrossCurrentAssetDays => "Gross Current Asset (days)", Days;
    FixedAssetsTurnoverRatio => "Fixed Assets Turnover Ratio", Ratio;

    // Other details
    TotalCurrentAssets => "Total current assets", Amount;
    TcaExceptFreeLiquidity => "TCA except free liquidity", Amount;
    TotalCurrentLiabilities => "Total current liabilities", Amount;
    TclExceptFinancialLiabilities => "TCL except fin liab", Amount;
    NetWorkingCapital => "Net WC", Amount;
    GrossDebtors => "Gross Debtors", Amount;
    AdvanceToSuppliers => "Advance to Suppliers", Amount;
    Inventory => "Inventory", Amount;
    Creditors => "Creditors", Amount;
    AdvanceFromCustomers => "Advance from Customers", Amount;
    CostOfGoodsSold => "Cost of goods sold", Amount;
    CostOfSales => "Cost of sales", Amount;
    GrossFixedAssetsInclCwip => "A Gross FA incl CWIP", Amount;
    CapexAdvance => "B Capex advance", Amount;
    CreditorsForCapex => "C Creditors for capex", Amount;
    Capex => "Capex (A1+B1+C1-A0-B0-C0)", Amount;
    GrossDebtAvailed => "Gross Debt availed", Amount;
    NetBlock => "Net block of Fixed Assets", Amount;
    RepaymentTermLoans => "Repayment of TL", Amount;
    RepaymentVehicleLoans => "Repayment of Vehicle loans", Amount;
    RepaymentWctl => "Repayment of WCTL", Amount;

    // DSCR detail
    AddInterest => "Add: Interest", Amount;
    LessInternalAccruals => "Less: Internal Accruals", Amount;
    CashAvailableForDebtServicing => "Cash available for debt servicing (A)", Amount;
    InterestPayment => "Interest payment", Amount;
    PrincipalRepayment => "Principal repayment", Amount;
    TotalDebtServicing => "Total debt servicing (B)", Amount;
    Dscr => "DSCR (A/B)", Ratio;

    // Capex and its financing
    FatrToCompareWithCapex => "FATR to compare with capex", Ratio;
    TermLoanToCapex => "% TL to capex", Percentage;
    IncrementalCapex => "Incremental capex", Amount;
    TotalTermDebtAvailed => "Total term debt availed", Amount;
    FundedFromTermDebt => "Funded from term debt", Amount;
    FundedFromUnsecuredLoan => "Funded from unsec. loan", Amount;
    FundedFromInternalAccruals => "Funded from Internal Accruals", Amount;

    // Term debt roll-forward
    TermDebtOpening => "Opening debt", Amount;
    TermDebtAvailed => "Add: Debt availed-other", Amount;
    TermDebtRepayments => "Less: Repayments", Amount;
    TermDebtClosing => "Closing debt", Amount;

    // Vehicle loan roll-forward
    VehicleLoansOpening => "Vehicle loans - Opening debt", Amount;
    VehicleLoansAvailed => "Vehicle loans - Add: Debt availed-other", Amount;
    VehicleLoansRepayments => "Vehicle loans - Less: Repayments", Amount;
    VehicleLoansClosing => "Vehicle loans - Closing debt", Amount;

    // WCTL roll-forward
    WctlOpening => "WCTL - Opening debt", Amount;
    WctlAvailed => "WCTL - Add: Debt availed-other", Amount;
    WctlRepayments => "WCTL - Less: Repayments", Amount;
    WctlClosing => "WCTL - Closing debt", Amount;
}

impl Metric {
    pub fn from_label(label: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.label() == label)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Metric::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown metric '{}'", label)))
    }
}

/// Presentation grouping of the output, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationSection {
    FinancialPerformance,
    CapitalStructure,
    GrowthRatios,
    ProfitabilityRatios,
    ReturnRatios,
    SolvencyRatios,
    LiquidityRatios,
    OtherDetails,
    Dscr,
    CapexFinancing,
    TermDebtDetails,
    VehicleLoanDetails,
    WctlDetails,
}

impl PresentationSection {
    pub const ALL: [PresentationSection; 13] = [
        PresentationSection::FinancialPerformance,
        PresentationSection::CapitalStructure,
        PresentationSection::GrowthRatios,
        PresentationSection::ProfitabilityRatios,
        PresentationSection::ReturnRatios,
        PresentationSection::SolvencyRatios,
        PresentationSection::LiquidityRatios,
        PresentationSection::OtherDetails,
        PresentationSection::Dscr,
        PresentationSection::CapexFinancing,
        PresentationSection::TermDebtDetails,
        PresentationSection::VehicleLoanDetails,
        PresentationSection::WctlDetails,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PresentationSection::FinancialPerformance => "FINANCIAL PERFORMANCE",
            PresentationSection::CapitalStructure => "CAPITAL STRUCTURE",
            PresentationSection::GrowthRatios => "GROWTH RATIOS",
            PresentationSection::ProfitabilityRatios => "PROFITABILITY RATIOS",
            PresentationSection::ReturnRatios => "RETURN RATIOS",
            PresentationSection::SolvencyRatios => "SOLVENCY RATIOS/COVERAGE RATIOS",
            PresentationSection::LiquidityRatios => "LIQUIDITY RATIOS / TURNOVER RATIOS",
            PresentationSection::OtherDetails => "OTHER DETAILS",
            PresentationSection::Dscr => "DSCR",
            PresentationSection::CapexFinancing => "CAPEX AND ITS FINANCING",
            PresentationSection::TermDebtDetails => "DETAILS OF TERM DEBT",
            PresentationSection::VehicleLoanDetails => "DETAILS OF VEHICLE LOANS",
            PresentationSection::WctlDetails => "DETAILS OF WCTL",
        }
    }

    /// Sections reporting money carry the unit note shown under the title.
    pub fn subtitle(self) -> Option<&'static str> {
        match self {
            PresentationSection::FinancialPerformance
            | PresentationSection::OtherDetails
            | PresentationSection::Dscr
            | PresentationSection::CapexFinancing
            | PresentationSection::TermDebtDetails
            | PresentationSection::VehicleLoanDetails
            | PresentationSection::WctlDetails => Some("(Amount in Cr.)"),
            _ => None,
        }
    }

    pub fn metrics(self) -> &'static [Metric] {
        use Metric::*;
        match self {
            PresentationSection::FinancialPerformance => &[
                TotalOperatingIncome,
                Ebitda,
                Depreciation,
                Interest,
                OtherIncome,
                OtherExpense,
                ProfitBeforeTax,
                CurrentTax,
                DeferredTax,
                ProfitAfterTax,
                CashProfits,
            ],
            PresentationSection::CapitalStructure => &[
                ShareCapital,
                TangibleNetWorth,
                UnsecuredLoanQuasiEquity,
                TotalDebt,
                TermDebt,
                Wctl,
                WorkingCapitalDebt,
                VehicleLoans,
                UnsecuredLoans,
                SblcBg,
                CapitalEmployed,
                LiquidityUnencumbered,
                LiquidityEncumbered,
                Investments,
                GroupCompanies,
                OtherInvestments,
                TotalOutsideLiabilities,
            ],
            PresentationSection::GrowthRatios => &[SalesGrowth, EbitdaGrowth, PbtGrowth, PatGrowth],
            PresentationSection::ProfitabilityRatios => &[EbitdaMargin, PbtMargin, PatMargin],
            PresentationSection::ReturnRatios => &[ReturnOnCapitalEmployed, ReturnOnEquity],
            PresentationSection::SolvencyRatios => &[
                AverageCostOfBorrowing,
                CashProfitsToDebtRepay,
                DebtEquityRatio,
                OverallGearing,
                TolTnw,
                InterestCoverageRatio,
                DebtServiceCoverageRatio,
                TotalDebtToCashProfits,
                TermDebtToCashProfits,
                TotalDebtToEbitda,
            ],
            PresentationSection::LiquidityRatios => &[
                SalesToWcDebt,
                CurrentRatio,
                DebtorDays,
                InventoryDays,
                PayableDays,
                OperatingCycleDays,
                AdjustedDebtorDays,
                InventoryDays,
                AdjustedPayableDays,
                AdjustedOperatingCycleDays,
                GrossCurrentAssetDays,
                FixedAssetsTurnoverRatio,
            ],
            PresentationSection::OtherDetails => &[
                TotalCurrentAssets,
                TcaExceptFreeLiquidity,
                TotalCurrentLiabilities,
                TclExceptFinancialLiabilities,
                NetWorkingCapital,
                GrossDebtors,
                AdvanceToSuppliers,
                Inventory,
                Creditors,
                AdvanceFromCustomers,
                CostOfGoodsSold,
                CostOfSales,
                GrossFixedAssetsInclCwip,
                CapexAdvance,
                CreditorsForCapex,
                Capex,
                GrossDebtAvailed,
                NetBlock,
                RepaymentTermLoans,
                RepaymentVehicleLoans,
                RepaymentWctl,
            ],
            PresentationSection::Dscr => &[
                CashProfits,
                AddInterest,
                LessInternalAccruals,
                CashAvailableForDebtServicing,
                InterestPayment,
                PrincipalRepayment,
                TotalDebtServicing,
                Dscr,
            ],
            PresentationSection::CapexFinancing => &[
                FatrToCompareWithCapex,
                TermLoanToCapex,
                IncrementalCapex,
                TotalTermDebtAvailed,
                FundedFromTermDebt,
                FundedFromUnsecuredLoan,
                FundedFromInternalAccruals,
            ],
            PresentationSection::TermDebtDetails => &[
                TermDebtOpening,
                TermDebtAvailed,
                TermDebtRepayments,
                TermDebtClosing,
            ],
            PresentationSection::VehicleLoanDetails => &[
                VehicleLoansOpening,
                VehicleLoansAvailed,
                VehicleLoansRepayments,
                VehicleLoansClosing,
            ],
            PresentationSection::WctlDetails => &[WctlOpening, WctlAvailed, WctlRepayments, WctlClosing],
        }
    }

    /// Every metric in report order, each listed once at its first position.
    pub fn report_order() -> Vec<Metric> {
        let mut ordered: Vec<Metric> = Vec::with_capacity(Metric::ALL.len());
        for section in Self::ALL {
            for metric in section.metrics() {
                if !ordered.contains(metric) {
                    ordered.push(*metric);
                }
            }
        }
        for metric in Metric::ALL {
            if !ordered.contains(metric) {
                ordered.push(*metric);
            }
        }
        ordered
    }
}

/// Per-year accumulator filled phase by phase; later phases read values
/// recorded by earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearMetrics {
    values: BTreeMap<Metric, f64>,
}

impl YearMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        self.values.insert(metric, finite_or_zero(value));
    }

    /// A metric not yet recorded in this pass reads 0.
    pub fn get(&self, metric: Metric) -> f64 {
        self.values.get(&metric).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.values.iter().map(|(metric, value)| (*metric, *value))
    }
}

/// Derived metric time series: metric, then fiscal year, to a rounded value.
///
/// A missing metric or year means "not computed", which is distinct from a
/// computed 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetricsData {
    fiscal_years: FiscalYears,
    values: BTreeMap<Metric, BTreeMap<String, f64>>,
}

impl DerivedMetricsData {
    pub fn new(fiscal_years: FiscalYears) -> Self {
        Self {
            fiscal_years,
            values: BTreeMap::new(),
        }
    }

    /// Stores one year's record, rounding each value by its unit.
    pub fn insert_year(&mut self, year: &str, record: &YearMetrics) {
        for (metric, value) in record.iter() {
            self.values
                .entry(metric)
                .or_default()
                .insert(year.to_string(), metric.unit().round(value));
        }
    }

    pub fn fiscal_years(&self) -> &FiscalYears {
        &self.fiscal_years
    }

    pub fn get(&self, metric: Metric, year: &str) -> Option<f64> {
        self.values.get(&metric).and_then(|years| years.get(year)).copied()
    }

    pub fn series(&self, metric: Metric) -> Option<&BTreeMap<String, f64>> {
        self.values.get(&metric)
    }

    /// Values of one metric in fiscal-year order; `None` marks a year not computed.
    pub fn ordered_series(&self, metric: Metric) -> Option<Vec<Option<f64>>> {
        let series = self.values.get(&metric)?;
        Some(
            self.fiscal_years
                .iter()
                .map(|year| series.get(year).copied())
                .collect(),
        )
    }

    pub fn year_values(&self, year: &str) -> BTreeMap<Metric, f64> {
        self.values
            .iter()
            .filter_map(|(metric, years)| years.get(year).map(|value| (*metric, *value)))
            .collect()
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.values.keys().copied()
    }

    pub fn metric_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn all_finite(&self) -> bool {
        self.values
            .values()
            .flat_map(|years| years.values())
            .all(|value| value.is_finite())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_are_unique() {
        let mut seen = HashSet::new();
        for metric in Metric::ALL {
            assert!(seen.insert(metric.label()), "duplicate label {}", metric);
            assert_eq!(Metric::from_label(metric.label()), Some(*metric));
        }
    }

    #[test]
    fn test_every_metric_is_presented() {
        let presented: HashSet<Metric> = PresentationSection::ALL
            .iter()
            .flat_map(|section| section.metrics().iter().copied())
            .collect();

        for metric in Metric::ALL {
            assert!(presented.contains(metric), "{} has no section", metric);
        }
        assert_eq!(PresentationSection::report_order().len(), Metric::ALL.len());
    }

    #[test]
    fn test_report_order_keeps_first_position() {
        let order = PresentationSection::report_order();
        assert_eq!(order[0], Metric::TotalOperatingIncome);

        let cash_profits = order.iter().position(|m| *m == Metric::CashProfits).unwrap();
        let share_capital = order.iter().position(|m| *m == Metric::ShareCapital).unwrap();
        assert!(cash_profits < share_capital);
    }

    #[test]
    fn test_insert_year_rounds_by_unit() {
        let years = FiscalYears::consecutive(2020, 2);
        let mut record = YearMetrics::new();
        record.set(Metric::CurrentRatio, 1.23456);
        record.set(Metric::DebtorDays, 36.0);
        record.set(Metric::Ebitda, f64::NAN);

        let mut data = DerivedMetricsData::new(years);
        data.insert_year("2020", &record);

        assert_eq!(data.get(Metric::CurrentRatio, "2020"), Some(1.23));
        assert_eq!(data.get(Metric::DebtorDays, "2020"), Some(36.0));
        assert_eq!(data.get(Metric::Ebitda, "2020"), Some(0.0));
        assert_eq!(data.get(Metric::CurrentRatio, "2021"), None);
        assert_eq!(data.get(Metric::Capex, "2020"), None);
        assert_eq!(
            data.ordered_series(Metric::CurrentRatio),
            Some(vec![Some(1.23), None])
        );
        assert!(data.all_finite());
    }

    #[test]
    fn test_json_uses_metric_labels() {
        let mut record = YearMetrics::new();
        record.set(Metric::TolTnw, 2.5);

        let mut data = DerivedMetricsData::new(FiscalYears::consecutive(2021, 1));
        data.insert_year("2021", &record);

        let json = data.to_json().unwrap();
        assert!(json.contains("\"TOL/TNW\""));

        let parsed = DerivedMetricsData::from_json(&json).unwrap();
        assert_eq!(parsed, data);
    }
}
