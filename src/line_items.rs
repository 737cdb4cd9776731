//! Canonical line-item schema for Form II (operating statement) and Form III
//! (balance sheet).
//!
//! Every label an analyst can key a value against is listed here, in entry-grid
//! order. Labels are opaque identifiers: classification is carried by
//! [`LineItemKind`], never inferred from the label text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    #[schemars(description = "Form II: the operating (income) statement")]
    OperatingStatement,

    #[schemars(description = "Form III: the balance sheet")]
    BalanceSheet,
}

impl Statement {
    pub const ALL: [Statement; 2] = [Statement::OperatingStatement, Statement::BalanceSheet];

    pub fn title(self) -> &'static str {
        match self {
            Statement::OperatingStatement => "Form II - Operating Statement",
            Statement::BalanceSheet => "Form III - Balance Sheet",
        }
    }

    pub fn line_items(self) -> &'static [LineItem] {
        match self {
            Statement::OperatingStatement => OPERATING_STATEMENT,
            Statement::BalanceSheet => BALANCE_SHEET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    // Form II
    Sales,
    CostOfSales,
    SellingGeneralAdmin,
    OperatingProfit,
    FinanceCharges,
    NonOperatingIncome,
    NonOperatingExpenses,
    ProfitAndTax,
    Appropriations,
    OperatingLeverage,
    // Form III
    CurrentLiabilities,
    TermLiabilities,
    NetWorth,
    CurrentAssets,
    FixedAssets,
    OtherNonCurrentAssets,
    AdditionalInformation,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Sales => "Sales",
            Section::CostOfSales => "Cost of Sales",
            Section::SellingGeneralAdmin => "Selling, General and Admin Expenses",
            Section::OperatingProfit => "Operating Profit",
            Section::FinanceCharges => "Finance Charges",
            Section::NonOperatingIncome => "Other Non-operating Income",
            Section::NonOperatingExpenses => "Other Non-operating Expenses",
            Section::ProfitAndTax => "Profit and Tax",
            Section::Appropriations => "Appropriations",
            Section::OperatingLeverage => "Operating Leverage",
            Section::CurrentLiabilities => "Current Liabilities",
            Section::TermLiabilities => "Term Liabilities",
            Section::NetWorth => "Net Worth",
            Section::CurrentAssets => "Current Assets",
            Section::FixedAssets => "Fixed Assets",
            Section::OtherNonCurrentAssets => "Other Non-current Assets",
            Section::AdditionalInformation => "Additional Information",
        }
    }
}

/// One signed component of a computed subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Term {
    pub label: &'static str,
    pub sign: f64,
}

impl Term {
    pub const fn plus(label: &'static str) -> Self {
        Self { label, sign: 1.0 }
    }

    pub const fn minus(label: &'static str) -> Self {
        Self { label, sign: -1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "terms", rename_all = "snake_case")]
pub enum LineItemKind {
    /// Section heading. Carries no value.
    Header,
    /// Monetary input cell.
    Amount,
    /// Percentage input cell, bounded to [0, 100].
    Percentage,
    /// Subtotal derived from other lines of the same statement. Never accepts
    /// input; rows evaluate it from its terms.
    Computed(&'static [Term]),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub section: Section,
    pub kind: LineItemKind,
}

impl LineItem {
    pub fn accepts_input(&self) -> bool {
        matches!(self.kind, LineItemKind::Amount | LineItemKind::Percentage)
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self.kind, LineItemKind::Percentage)
    }

    pub fn terms(&self) -> Option<&'static [Term]> {
        match self.kind {
            LineItemKind::Computed(terms) => Some(terms),
            _ => None,
        }
    }
}

const fn header(section: Section, label: &'static str) -> LineItem {
    LineItem {
        label,
        section,
        kind: LineItemKind::Header,
    }
}

const fn amount(section: Section, label: &'static str) -> LineItem {
    LineItem {
        label,
        section,
        kind: LineItemKind::Amount,
    }
}

const fn percentage(section: Section, label: &'static str) -> LineItem {
    LineItem {
        label,
        section,
        kind: LineItemKind::Percentage,
    }
}

const fn computed(section: Section, label: &'static str, terms: &'static [Term]) -> LineItem {
    LineItem {
        label,
        section,
        kind: LineItemKind::Computed(terms),
    }
}

/// Looks up a canonical label in a statement's schema.
pub fn find_line_item(statement: Statement, label: &str) -> Option<&'static LineItem> {
    static OPERATING: OnceLock<HashMap<&'static str, &'static LineItem>> = OnceLock::new();
    static BALANCE: OnceLock<HashMap<&'static str, &'static LineItem>> = OnceLock::new();

    let index = match statement {
        Statement::OperatingStatement => &OPERATING,
        Statement::BalanceSheet => &BALANCE,
    };
    index
        .get_or_init(|| {
            statement
                .line_items()
                .iter()
                .map(|item| (item.label, item))
                .collect()
        })
        .get(label)
        .copied()
}

// Form II subtotals

const NET_SALES: &[Term] = &[
    Term::plus("1. Gross Sales - Total"),
    Term::minus("2. Less Deductions"),
    Term::minus("2. Less Excise Duty/cess if any"),
];

const NET_OPERATING_INCOME: &[Term] = &[
    Term::plus("3. Net Sales (1-2)"),
    Term::plus("4. Other operating/revenue income - Total"),
];

const COST_OF_SALES_SUBTOTAL: &[Term] = &[
    Term::plus("Cost of Goods Sold"),
    Term::plus("Total Selling Gen & Admin Exp"),
];

const OPERATING_PROFIT: &[Term] = &[
    Term::plus("5. Net Operating Income (3+4)"),
    Term::minus("8. Sub-total (6+7) Cost of sales"),
];

const PROFIT_AFTER_INTEREST: &[Term] = &[
    Term::plus("9. Operating Profit before Interest (5-8)"),
    Term::minus("10. Finance Charges"),
];

const NET_NON_OPERATING: &[Term] = &[
    Term::plus("12. Sub-total (Income)"),
    Term::minus("12. Sub-total (Expenses)"),
];

const PROFIT_BEFORE_TAX: &[Term] = &[
    Term::plus("11. Operating Profit after Dep & Interest (9-10)"),
    Term::plus("12. Net of other non-operating income/ Exp"),
];

const NET_PROFIT: &[Term] = &[
    Term::plus("13. Profit before tax/loss (11+12)"),
    Term::minus("14. Sub Total- Tax"),
];

// Form III subtotals

const NET_WORKING_CAPITAL: &[Term] = &[
    Term::plus("31. Total Current Assets (26 to 30)"),
    Term::minus("7. Total current liabilities [A + B]"),
];

const ASSET_LIABILITY_DIFFERENCE: &[Term] = &[
    Term::plus("38. Total Assets (31+35+36+37)"),
    Term::minus("25. TOTAL LIABILITIES (14+24)"),
];

pub static OPERATING_STATEMENT: &[LineItem] = &[
    amount(Section::Sales, "1. Gross Sales"),
    amount(Section::Sales, "1. Gross Sales - i. Export Sales"),
    amount(Section::Sales, "1. Gross Sales - ii. Domestic Sales"),
    amount(Section::Sales, "1. Gross Sales - iii. Services Sales"),
    amount(Section::Sales, "1. Gross Sales - i. Services Sales"),
    amount(Section::Sales, "1. Gross Sales - Total"),
    amount(Section::Sales, "2. Less Deductions"),
    amount(Section::Sales, "2. Less Excise Duty/cess if any"),
    computed(Section::Sales, "3. Net Sales (1-2)", NET_SALES),
    amount(Section::Sales, "4. Other operating/revenue income"),
    amount(Section::Sales, "4. Other operating/revenue income - i. Rental Income"),
    amount(Section::Sales, "4. Other operating/revenue income - ii. Other Operating Income (Pls specify)"),
    amount(Section::Sales, "4. Other operating/revenue income - iii. Other Operating Income (Pls specify)"),
    amount(Section::Sales, "4. Other operating/revenue income - Total"),
    computed(Section::Sales, "5. Net Operating Income (3+4)", NET_OPERATING_INCOME),
    amount(Section::CostOfSales, "6. Cost of Sales"),
    percentage(Section::CostOfSales, "Material consumed % of sales"),
    amount(Section::CostOfSales, "6. i. Raw materials CONSUMED"),
    amount(Section::CostOfSales, "6. i. Raw materials CONSUMED - Imported"),
    amount(Section::CostOfSales, "6. i. Raw materials CONSUMED - Indigenous"),
    amount(Section::CostOfSales, "Opening stock"),
    amount(Section::CostOfSales, "Opening stock - Imported"),
    amount(Section::CostOfSales, "Opening stock - Indigenous"),
    amount(Section::CostOfSales, "Purchase"),
    amount(Section::CostOfSales, "Purchase - Raw Material"),
    amount(Section::CostOfSales, "Purchase - Trading Purchases"),
    amount(Section::CostOfSales, "Closing stock"),
    amount(Section::CostOfSales, "Closing stock - Imported"),
    amount(Section::CostOfSales, "Closing stock - Indigenous"),
    amount(Section::CostOfSales, "6. ii. Other Stores & Spares CONSUMED"),
    amount(Section::CostOfSales, "6. ii. Other Stores & Spares CONSUMED - Imported"),
    amount(Section::CostOfSales, "6. ii. Other Stores & Spares CONSUMED - Indigenous"),
    percentage(Section::CostOfSales, "Power and fuel % of manufacturing sales"),
    amount(Section::CostOfSales, "6. iii. Power and Fuel"),
    percentage(Section::CostOfSales, "Labour % of manufacturing sales"),
    amount(Section::CostOfSales, "6. iv. Direct Labour (Factory wages)"),
    amount(Section::CostOfSales, "6. v. Other manufacturing expenses"),
    amount(Section::CostOfSales, "6. vi. Repairs/maintenance/replacement etc."),
    amount(Section::CostOfSales, "6. vii. Other (Pls specify)"),
    amount(Section::CostOfSales, "6. viii. Other (Pls specify)"),
    amount(Section::CostOfSales, "6. ix. Other (Pls specify)"),
    amount(Section::CostOfSales, "6. x. Other Mfg exp not covered above"),
    percentage(Section::CostOfSales, "Dep % of GFA excl CWIP and Intangibles"),
    amount(Section::CostOfSales, "6. xi. Depreciation"),
    percentage(Section::CostOfSales, "Amor % of Intangibles"),
    amount(Section::CostOfSales, "6. xii. Amortisation"),
    amount(Section::CostOfSales, "Total Mfg Exp (i to ix)"),
    amount(Section::CostOfSales, "6. i. Opening Stock-in-process"),
    amount(Section::CostOfSales, "6. ii. Closing Stock-in-process"),
    amount(Section::CostOfSales, "Change in Stock-in-process/trade"),
    amount(Section::CostOfSales, "Cost of Production"),
    amount(Section::CostOfSales, "6. i. Opening Stock of finished goods"),
    amount(Section::CostOfSales, "6. ii. Closing Stock of finished goods"),
    amount(Section::CostOfSales, "Change in finished goods stock"),
    amount(Section::CostOfSales, "Cost of Goods Sold"),
    amount(Section::SellingGeneralAdmin, "7. Selling, general and Admin exp"),
    percentage(Section::SellingGeneralAdmin, "Oth expenses % of sales"),
    amount(Section::SellingGeneralAdmin, "7. i. Salary and staff expenses, director fee"),
    amount(Section::SellingGeneralAdmin, "7. ii. Rent, Rates and Taxes"),
    amount(Section::SellingGeneralAdmin, "7. iii. Bad Debts"),
    amount(Section::SellingGeneralAdmin, "7. iv. Advertisements and Sales Promotions"),
    amount(Section::SellingGeneralAdmin, "7. v. Freight Outward & Transportation Exp"),
    amount(Section::SellingGeneralAdmin, "7. vi. General & Admin. Expenses"),
    amount(Section::SellingGeneralAdmin, "7. vii. C&F Commission"),
    amount(Section::SellingGeneralAdmin, "7. viii. Other exp- Research & development"),
    amount(Section::SellingGeneralAdmin, "7. ix. Other exp- Royalty on sales"),
    amount(Section::SellingGeneralAdmin, "7. x. Other (Pls specify)"),
    amount(Section::SellingGeneralAdmin, "7. xi. Other (Pls specify)"),
    amount(Section::SellingGeneralAdmin, "7. xii. Other (Pls specify)"),
    amount(Section::SellingGeneralAdmin, "7. xiii. Other (Pls specify)"),
    amount(Section::SellingGeneralAdmin, "7. xiv. Other operating exp"),
    amount(Section::SellingGeneralAdmin, "Total Selling Gen & Admin Exp"),
    computed(Section::OperatingProfit, "8. Sub-total (6+7) Cost of sales", COST_OF_SALES_SUBTOTAL),
    computed(Section::OperatingProfit, "9. Operating Profit before Interest (5-8)", OPERATING_PROFIT),
    amount(Section::FinanceCharges, "10. Finance Charges"),
    amount(Section::FinanceCharges, "10. i. Interest on Term Loans(Link from Repay Sch)"),
    amount(Section::FinanceCharges, "10. ii. Interest on WCTL and DLOD"),
    amount(Section::FinanceCharges, "10. iii. Interest on CC"),
    amount(Section::FinanceCharges, "10. iv. Interest on vehicle loans"),
    amount(Section::FinanceCharges, "10. v. Bank Charges/Others"),
    amount(Section::FinanceCharges, "10. vi. Other (Pls specify)"),
    amount(Section::FinanceCharges, "10. vii. Other (Pls specify)"),
    computed(Section::FinanceCharges, "11. Operating Profit after Dep & Interest (9-10)", PROFIT_AFTER_INTEREST),
    amount(Section::NonOperatingIncome, "12. Other non-operating Income"),
    amount(Section::NonOperatingIncome, "12. i. Dividends received"),
    amount(Section::NonOperatingIncome, "12. ii. Extraordinary gains"),
    amount(Section::NonOperatingIncome, "12. iii. Profit on sale of fixed assets / Investments"),
    amount(Section::NonOperatingIncome, "12. iv. Gain on Exchange Fluctuations"),
    amount(Section::NonOperatingIncome, "12. v. Misc. income/ Write backs etc"),
    amount(Section::NonOperatingIncome, "12. vi. Interest from subsidiary"),
    amount(Section::NonOperatingIncome, "12. vii. Interest from others"),
    amount(Section::NonOperatingIncome, "12. viii. Rental Income"),
    amount(Section::NonOperatingIncome, "12. ix. Other income (Pls specify)"),
    amount(Section::NonOperatingIncome, "12. x. Other income (Pls specify)"),
    amount(Section::NonOperatingIncome, "12. xi. Other income (Pls specify)"),
    amount(Section::NonOperatingIncome, "12. xii. Other income (Pls specify)"),
    amount(Section::NonOperatingIncome, "12. xiii. Other income (Pls specify)"),
    amount(Section::NonOperatingIncome, "12. Sub-total (Income)"),
    amount(Section::NonOperatingExpenses, "12. Other non-operating expenses"),
    amount(Section::NonOperatingExpenses, "12. i. Prior Period Items"),
    amount(Section::NonOperatingExpenses, "12. ii. Extraordinary Losses"),
    amount(Section::NonOperatingExpenses, "12. iii. Loss on sale of fixed assets"),
    amount(Section::NonOperatingExpenses, "12. iv. Loss on Exchange Fluctuations"),
    amount(Section::NonOperatingExpenses, "12. v. Write Offs/ Misc expenses write offs"),
    amount(Section::NonOperatingExpenses, "12. vi. Stock Writeoff on account of Covid"),
    amount(Section::NonOperatingExpenses, "12. vii. Exceptional Items"),
    amount(Section::NonOperatingExpenses, "12. viii. Others (Pls specify)"),
    amount(Section::NonOperatingExpenses, "12. ix. Other expense (Pls specify)"),
    amount(Section::NonOperatingExpenses, "12. x. Other expense (Pls specify)"),
    amount(Section::NonOperatingExpenses, "12. xi. Other expense (Pls specify)"),
    amount(Section::NonOperatingExpenses, "12. xii. Other expense (Pls specify)"),
    amount(Section::NonOperatingExpenses, "12. xiii. Other expense (Pls specify)"),
    amount(Section::NonOperatingExpenses, "12. Sub-total (Expenses)"),
    computed(Section::NonOperatingExpenses, "12. Net of other non-operating income/ Exp", NET_NON_OPERATING),
    computed(Section::ProfitAndTax, "13. Profit before tax/loss (11+12)", PROFIT_BEFORE_TAX),
    amount(Section::ProfitAndTax, "14. Tax"),
    percentage(Section::ProfitAndTax, "Effective Tax rate"),
    amount(Section::ProfitAndTax, "14. i. Provision for taxes"),
    amount(Section::ProfitAndTax, "14. ii. Deferred Tax"),
    amount(Section::ProfitAndTax, "14. iii. Previous year adjustments"),
    amount(Section::ProfitAndTax, "14. Sub Total- Tax"),
    computed(Section::ProfitAndTax, "15. Net Profit / Loss (13-14)", NET_PROFIT),
    amount(Section::Appropriations, "16. Dividend Appropriations"),
    amount(Section::Appropriations, "16. i. Interim Dividend"),
    amount(Section::Appropriations, "16. ii. Proposed Dividend (Provision)"),
    amount(Section::Appropriations, "16. iii. Tax on dividend"),
    amount(Section::Appropriations, "16. Total Dividend Appropriation"),
    amount(Section::Appropriations, "17. Retained Profit- P&L carried to Balance Sheet"),
    amount(Section::OperatingLeverage, "18. Inputs for Computing Operating Leverage"),
    amount(Section::OperatingLeverage, "18. Variable Expenses (to be entered manually)"),
    amount(Section::OperatingLeverage, "18. Fixed Cost"),
    amount(Section::OperatingLeverage, "18. Contribution"),
];

pub static BALANCE_SHEET: &[LineItem] = &[
    header(Section::CurrentLiabilities, "CURRENT LIABILITIES"),
    amount(Section::CurrentLiabilities, "# SBLC"),
    amount(Section::CurrentLiabilities, "$ BG (EPC)"),
    amount(Section::CurrentLiabilities, "1. Short-term finance from banks (including bills purchased, discounted & excess borrowing and short term loans, placed on repayment basis) CC and OD"),
    amount(Section::CurrentLiabilities, "1. i. From Axis Bank"),
    amount(Section::CurrentLiabilities, "1. ii. From IDFC Bank"),
    amount(Section::CurrentLiabilities, "1. iii. From HDFC Bank"),
    amount(Section::CurrentLiabilities, "1. iv. From Yes Bank"),
    amount(Section::CurrentLiabilities, "1. v. Other Banks"),
    amount(Section::CurrentLiabilities, "1. Sub-total [i + iii] (A)"),
    amount(Section::CurrentLiabilities, "2. Short term borrowings from others/Commercial paper"),
    amount(Section::CurrentLiabilities, "3. Sundry Creditors (Trade)"),
    amount(Section::CurrentLiabilities, "4. Advance payments from customers /deposits from dealers"),
    amount(Section::CurrentLiabilities, "5A. Instalments of Vehicle loans (due within 1 yr) (including lease liability) (Linked to Repayment schedules)"),
    amount(Section::CurrentLiabilities, "5B. Instalments of WCTL and DLOD (due within 1 yr) (including lease liability) (Linked to Repayment schedules)"),
    amount(Section::CurrentLiabilities, "5C. Instalments of CAPEX linked Term Loans/ Debentures/ Preference Shares/ Deposits/ Other debts (due within 1 yr) (including lease liability) (Linked to Repayment schedules)"),
    amount(Section::CurrentLiabilities, "6. Other current liabilities & provisions (due within 1 year)"),
    amount(Section::CurrentLiabilities, "6. i. Tax/ Statutory deferred liabilities (due within 1 yr)"),
    amount(Section::CurrentLiabilities, "6. ii. Interest accrued (including both due & not due)"),
    amount(Section::CurrentLiabilities, "6. iii. Others dues- Rent & Dealership deposits"),
    amount(Section::CurrentLiabilities, "6. iv. Dividend Payable"),
    amount(Section::CurrentLiabilities, "6. v. Dues to Directors"),
    amount(Section::CurrentLiabilities, "6. vi. Other Liabilities"),
    amount(Section::CurrentLiabilities, "6. vii. Provisions- Dividend including tax"),
    amount(Section::CurrentLiabilities, "6. viii. Provisions- Others"),
    amount(Section::CurrentLiabilities, "6. ix. Preoperative expenses"),
    amount(Section::CurrentLiabilities, "6. x. Handling charges payable"),
    amount(Section::CurrentLiabilities, "6. xi. Rents payable"),
    amount(Section::CurrentLiabilities, "6. xii. Others (specify)"),
    amount(Section::CurrentLiabilities, "6. xiii. Others (specify)"),
    amount(Section::CurrentLiabilities, "6. xiv. Others (specify)"),
    amount(Section::CurrentLiabilities, "6. xv. Others (specify)"),
    amount(Section::CurrentLiabilities, "Sub total-Other Current Liabilities other than Bank Finance [2to6] (B)"),
    amount(Section::CurrentLiabilities, "7. Total current liabilities [A + B]"),
    header(Section::TermLiabilities, "TERM LIABILITIES"),
    amount(Section::TermLiabilities, "8. Creditors for Capex"),
    amount(Section::TermLiabilities, "9A. Term Loans (excluding instalments payable within 1 year and WCTL)"),
    amount(Section::TermLiabilities, "9B. WCTL and DLOD"),
    amount(Section::TermLiabilities, "9C. Vehicle loans"),
    amount(Section::TermLiabilities, "10. Preference Shares >1 Year but < 5 Years"),
    amount(Section::TermLiabilities, "11. Unsecured loans"),
    amount(Section::TermLiabilities, "12. Other term liabilities"),
    amount(Section::TermLiabilities, "12. i. Deferred Payment Credits (excluding instalments due within 1 year)"),
    amount(Section::TermLiabilities, "12. ii. Others - Corporate Loan"),
    amount(Section::TermLiabilities, "12. iii. Provisions"),
    amount(Section::TermLiabilities, "12. iv. Provisions"),
    amount(Section::TermLiabilities, "13. Total Term Liabilities (8+9+10+11+12)"),
    amount(Section::TermLiabilities, "14. Total Outside Liabilities [7+13]"),
    header(Section::NetWorth, "NET WORTH"),
    amount(Section::NetWorth, "15. Ordinary Share Capital (including premium)"),
    amount(Section::NetWorth, "16. Share Warrants"),
    amount(Section::NetWorth, "17. Share Premium: Opening"),
    amount(Section::NetWorth, "17. Adjustments (please specify)"),
    amount(Section::NetWorth, "17. Closing"),
    amount(Section::NetWorth, "18. General Reserve: Opening"),
    amount(Section::NetWorth, "18. Adjustments (please specify)"),
    amount(Section::NetWorth, "18. Closing"),
    amount(Section::NetWorth, "19. Capital Reserve: Opening"),
    amount(Section::NetWorth, "19. Adjustments (please specify)"),
    amount(Section::NetWorth, "19. Closing"),
    amount(Section::NetWorth, "20. Other Reserves (Ind AS Adjustment)"),
    amount(Section::NetWorth, "21. Surplus (+) or deficit (-) in Profit & Loss a/c"),
    amount(Section::NetWorth, "22. Deferred Tax Liability (Net)"),
    amount(Section::NetWorth, "23. Others"),
    amount(Section::NetWorth, "23. i. Capital Subsidy"),
    amount(Section::NetWorth, "23. ii. Share Application Money"),
    amount(Section::NetWorth, "23. iii. Share Suspense"),
    amount(Section::NetWorth, "23. iv. Revaluation Reserve- not part of TNW"),
    amount(Section::NetWorth, "23. v. Others specify"),
    amount(Section::NetWorth, "23. vi. Others specify"),
    amount(Section::NetWorth, "23. vii. Others specify"),
    amount(Section::NetWorth, "23. viii. Others specify"),
    amount(Section::NetWorth, "23. ix. Others specify"),
    amount(Section::NetWorth, "24. Net Worth (15 to 23)"),
    amount(Section::NetWorth, "25. TOTAL LIABILITIES (14+24)"),
    computed(Section::NetWorth, "Difference Asset & Liabilities", ASSET_LIABILITY_DIFFERENCE),
    header(Section::CurrentAssets, "CURRENT ASSETS"),
    amount(Section::CurrentAssets, "26. Cash and Bank Balances (unencumbered)"),
    amount(Section::CurrentAssets, "27. Investments (other than long term)"),
    amount(Section::CurrentAssets, "27. i. Govt. and other trustee securities- short term"),
    amount(Section::CurrentAssets, "27. ii. Encumbered"),
    amount(Section::CurrentAssets, "27. iii. Cash at Bank (Pending for strategic investment)"),
    amount(Section::CurrentAssets, "28. Sundry Debtors- LESS THAN 6 MONTHS OLD"),
    amount(Section::CurrentAssets, "28. i. Domestic receivables other than deferred & exports (incldg. bills discounted by banks)"),
    amount(Section::CurrentAssets, "28. ii. Export receivables (incldg. Bills discounted by banks)"),
    amount(Section::CurrentAssets, "29. Inventory:"),
    amount(Section::CurrentAssets, "29. i. Raw materials"),
    amount(Section::CurrentAssets, "29. i. Imported"),
    amount(Section::CurrentAssets, "29. i. Indigenous"),
    amount(Section::CurrentAssets, "29. ii. Stocks-in-process/trade"),
    amount(Section::CurrentAssets, "29. iii. Finished goods"),
    amount(Section::CurrentAssets, "29. iv. Other consumable stores/spares/packing mat."),
    amount(Section::CurrentAssets, "29. iv. Imported"),
    amount(Section::CurrentAssets, "29. iv. Indigenous"),
    amount(Section::CurrentAssets, "30. Other current assets (specify major items)"),
    amount(Section::CurrentAssets, "30. i. Advances to suppliers of raw material/spares"),
    amount(Section::CurrentAssets, "30. ii. Advance payment of taxes (net of provisions)"),
    amount(Section::CurrentAssets, "30. iii. Other advances- considered good"),
    amount(Section::CurrentAssets, "30. iv. Accured interest income"),
    amount(Section::CurrentAssets, "30. v. Others- Current dues from Directors"),
    amount(Section::CurrentAssets, "30. vi. Prepaid Expenses"),
    amount(Section::CurrentAssets, "30. vii. Instalments of deferred receivables (due within 1 year)"),
    amount(Section::CurrentAssets, "30. viii. Others (Godown and Office Rents)"),
    amount(Section::CurrentAssets, "30. ix. Inter croporate Deposit"),
    amount(Section::CurrentAssets, "30. x. Others (pls specify)"),
    amount(Section::CurrentAssets, "30. xi. Others (pls specify)"),
    amount(Section::CurrentAssets, "30. xii. Others (pls specify)"),
    amount(Section::CurrentAssets, "30. xiii. Others (pls specify)"),
    amount(Section::CurrentAssets, "30. xiv. Others (pls specify)"),
    amount(Section::CurrentAssets, "30. xv. Others (pls specify)"),
    amount(Section::CurrentAssets, "31. Total Current Assets (26 to 30)"),
    header(Section::FixedAssets, "FIXED ASSETS"),
    amount(Section::FixedAssets, "32. Gross Block (land, building, machinery, WIP) Opening"),
    amount(Section::FixedAssets, "32. Capex"),
    amount(Section::FixedAssets, "32. Closing"),
    amount(Section::FixedAssets, "33. Capital work in process"),
    amount(Section::FixedAssets, "34. Accumulated Depreciation till date"),
    amount(Section::FixedAssets, "35. Net Block (32+33-34)"),
    header(Section::OtherNonCurrentAssets, "OTHER NON-CURRENT ASSETS"),
    amount(Section::OtherNonCurrentAssets, "36. Investments/book debts/advances/ deposits which are not current assets"),
    amount(Section::OtherNonCurrentAssets, "36. i. Investment in New Business"),
    amount(Section::OtherNonCurrentAssets, "36. ii. Loans & Investments in Group companies/ subsidiaries"),
    amount(Section::OtherNonCurrentAssets, "36. iii. Non current Investment"),
    amount(Section::OtherNonCurrentAssets, "36. iv. Advances for capital goods/ contractors"),
    amount(Section::OtherNonCurrentAssets, "36. v. Debtors More Than 6 Months (net of provisions)"),
    amount(Section::OtherNonCurrentAssets, "36. vi. Deferred receivables (maturity > 1 year)"),
    amount(Section::OtherNonCurrentAssets, "36. vii. Others- FD lodged with authorities/ margin money"),
    amount(Section::OtherNonCurrentAssets, "36. viii. Other"),
    amount(Section::OtherNonCurrentAssets, "36. ix. Others- Security depo, Disputed IT refund receivable"),
    amount(Section::OtherNonCurrentAssets, "36. x. Misc expenditures not written off"),
    amount(Section::OtherNonCurrentAssets, "36. xi. long term loans and advances"),
    amount(Section::OtherNonCurrentAssets, "36. xii. Others (MAT CREDIT ENTITLEMENT)"),
    amount(Section::OtherNonCurrentAssets, "36. xiii. Others (pls specify)"),
    amount(Section::OtherNonCurrentAssets, "36. xiv. Others (pls specify)"),
    amount(Section::OtherNonCurrentAssets, "36. xv. Others (pls specify)"),
    amount(Section::OtherNonCurrentAssets, "36. xvi. Others (pls specify)"),
    amount(Section::OtherNonCurrentAssets, "Total Other Non-current Assets (35+36)"),
    amount(Section::OtherNonCurrentAssets, "37. Intangible Assets"),
    amount(Section::OtherNonCurrentAssets, "37. Goodwill"),
    amount(Section::OtherNonCurrentAssets, "37. Others"),
    amount(Section::OtherNonCurrentAssets, "37. Accumulated amortization"),
    amount(Section::OtherNonCurrentAssets, "38. Total Assets (31+35+36+37)"),
    amount(Section::OtherNonCurrentAssets, "39. Tangible Net Worth (24-37)"),
    amount(Section::OtherNonCurrentAssets, "40. Adjusted TNW (TNW+Quasi equity)"),
    amount(Section::OtherNonCurrentAssets, "40. Unsecured Loans"),
    amount(Section::OtherNonCurrentAssets, "40. Unsecured Loans eligible for QE classification"),
    computed(Section::OtherNonCurrentAssets, "41. Net Working Capital (31-7)", NET_WORKING_CAPITAL),
    header(Section::AdditionalInformation, "ADDITIONAL INFORMATION"),
    amount(Section::AdditionalInformation, "A. Break-up of Unsecured Loans"),
    amount(Section::AdditionalInformation, "A. i. as Long Term Loans"),
    amount(Section::AdditionalInformation, "A. ii. as Short Term Loans"),
    amount(Section::AdditionalInformation, "B. Arrears of depreciation"),
    amount(Section::AdditionalInformation, "C. Contingent Liabilities: (mention details from Balance Sheet)"),
    amount(Section::AdditionalInformation, "C. i. Arrears of cumulative dividends"),
    amount(Section::AdditionalInformation, "C. ii. Gratuity liability not provided for"),
    amount(Section::AdditionalInformation, "C. iii. Disputed excise / customs /tax liabilities"),
    amount(Section::AdditionalInformation, "C. iv. Bank guarantee / Letter of credit outstanding"),
    amount(Section::AdditionalInformation, "C. v. Other liabilities not provided for"),
    amount(Section::AdditionalInformation, "C. vi. Others (pls specify)"),
    amount(Section::AdditionalInformation, "C. vii. Others (pls specify)"),
    amount(Section::AdditionalInformation, "C. viii. Others (pls specify)"),
    amount(Section::AdditionalInformation, "C. ix. Others (pls specify)"),
    amount(Section::AdditionalInformation, "C. x. Others (pls specify)"),
    amount(Section::AdditionalInformation, "D. Repayment of TL"),
    amount(Section::AdditionalInformation, "E. Repayment of Vehicle loans"),
    amount(Section::AdditionalInformation, "F. Repayment of WCTL"),
    amount(Section::AdditionalInformation, "G. Funded from Internal Accruals"),
];
