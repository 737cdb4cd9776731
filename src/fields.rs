//! The fields the ratio derivation reads, bound to canonical schema labels.
//!
//! Formulas never spell a label themselves; they go through [`FieldRef`], so a
//! label rename in the schema is a one-line change here and a mismatch is caught
//! by the tests below rather than silently reading zero.
//!
//! Short spellings used by older worksheets ("SBLC", "Inventory", "Closing", ...)
//! are accepted on input through [`LABEL_ALIASES`] and normalized by
//! [`resolve_label`].

use crate::error::{CreditAnalysisError, Result};
use crate::line_items::{find_line_item, Statement};

macro_rules! field_refs {
    ($($variant:ident => $statement:ident, $label:literal;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FieldRef {
            $($variant,)*
        }

        impl FieldRef {
            pub const ALL: &'static [FieldRef] = &[$(FieldRef::$variant,)*];

            pub fn statement(self) -> Statement {
                match self {
                    $(FieldRef::$variant => Statement::$statement,)*
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(FieldRef::$variant => $label,)*
                }
            }
        }
    };
}

field_refs! {
    // Form II
    NetOperatingIncome => OperatingStatement, "5. Net Operating Income (3+4)";
    OperatingProfit => OperatingStatement, "9. Operating Profit before Interest (5-8)";
    Depreciation => OperatingStatement, "6. xi. Depreciation";
    Amortisation => OperatingStatement, "6. xii. Amortisation";
    FinanceCharges => OperatingStatement, "10. Finance Charges";
    NonOperatingIncome => OperatingStatement, "12. Sub-total (Income)";
    NonOperatingExpenses => OperatingStatement, "12. Sub-total (Expenses)";
    ProvisionForTaxes => OperatingStatement, "14. i. Provision for taxes";
    DeferredTax => OperatingStatement, "14. ii. Deferred Tax";
    PreviousYearTaxAdjustments => OperatingStatement, "14. iii. Previous year adjustments";
    CostOfGoodsSold => OperatingStatement, "Cost of Goods Sold";
    CostOfSales => OperatingStatement, "8. Sub-total (6+7) Cost of sales";

    // Form III: liabilities
    Sblc => BalanceSheet, "# SBLC";
    BankGuarantee => BalanceSheet, "$ BG (EPC)";
    BankFinance => BalanceSheet, "1. Sub-total [i + iii] (A)";
    TradeCreditors => BalanceSheet, "3. Sundry Creditors (Trade)";
    CustomerAdvances => BalanceSheet, "4. Advance payments from customers /deposits from dealers";
    VehicleLoanInstalments => BalanceSheet, "5A. Instalments of Vehicle loans (due within 1 yr) (including lease liability) (Linked to Repayment schedules)";
    WctlInstalments => BalanceSheet, "5B. Instalments of WCTL and DLOD (due within 1 yr) (including lease liability) (Linked to Repayment schedules)";
    TermLoanInstalments => BalanceSheet, "5C. Instalments of CAPEX linked Term Loans/ Debentures/ Preference Shares/ Deposits/ Other debts (due within 1 yr) (including lease liability) (Linked to Repayment schedules)";
    OtherCurrentLiabilities => BalanceSheet, "Sub total-Other Current Liabilities other than Bank Finance [2to6] (B)";
    TotalCurrentLiabilities => BalanceSheet, "7. Total current liabilities [A + B]";
    CapexCreditors => BalanceSheet, "8. Creditors for Capex";
    TermLoans => BalanceSheet, "9A. Term Loans (excluding instalments payable within 1 year and WCTL)";
    VehicleLoans => BalanceSheet, "9C. Vehicle loans";
    UnsecuredLoans => BalanceSheet, "11. Unsecured loans";
    DeferredPaymentCredits => BalanceSheet, "12. i. Deferred Payment Credits (excluding instalments due within 1 year)";
    TotalOutsideLiabilities => BalanceSheet, "14. Total Outside Liabilities [7+13]";

    // Form III: net worth
    ShareCapital => BalanceSheet, "15. Ordinary Share Capital (including premium)";
    AdjustedTangibleNetWorth => BalanceSheet, "40. Adjusted TNW (TNW+Quasi equity)";
    QuasiEquityUnsecuredLoans => BalanceSheet, "40. Unsecured Loans eligible for QE classification";

    // Form III: assets
    UnencumberedCash => BalanceSheet, "26. Cash and Bank Balances (unencumbered)";
    GovernmentSecurities => BalanceSheet, "27. i. Govt. and other trustee securities- short term";
    EncumberedInvestments => BalanceSheet, "27. ii. Encumbered";
    CashPendingInvestment => BalanceSheet, "27. iii. Cash at Bank (Pending for strategic investment)";
    Debtors => BalanceSheet, "28. Sundry Debtors- LESS THAN 6 MONTHS OLD";
    Inventory => BalanceSheet, "29. Inventory:";
    SupplierAdvances => BalanceSheet, "30. i. Advances to suppliers of raw material/spares";
    TotalCurrentAssets => BalanceSheet, "31. Total Current Assets (26 to 30)";
    GrossBlockClosing => BalanceSheet, "32. Closing";
    CapitalWorkInProgress => BalanceSheet, "33. Capital work in process";
    NetBlock => BalanceSheet, "35. Net Block (32+33-34)";
    NewBusinessInvestment => BalanceSheet, "36. i. Investment in New Business";
    GroupCompanyInvestment => BalanceSheet, "36. ii. Loans & Investments in Group companies/ subsidiaries";
    NonCurrentInvestment => BalanceSheet, "36. iii. Non current Investment";
    CapexAdvances => BalanceSheet, "36. iv. Advances for capital goods/ contractors";
    OverdueDebtors => BalanceSheet, "36. v. Debtors More Than 6 Months (net of provisions)";
    MarginMoneyDeposits => BalanceSheet, "36. vii. Others- FD lodged with authorities/ margin money";

    // Form III: debt servicing
    TermLoanRepayment => BalanceSheet, "D. Repayment of TL";
    VehicleLoanRepayment => BalanceSheet, "E. Repayment of Vehicle loans";
    WctlRepayment => BalanceSheet, "F. Repayment of WCTL";
    InternalAccruals => BalanceSheet, "G. Funded from Internal Accruals";
}

/// Alternative spellings mapped onto canonical labels, per statement.
pub static LABEL_ALIASES: &[(Statement, &str, &str)] = &[
    (Statement::OperatingStatement, "Net Operating Income", "5. Net Operating Income (3+4)"),
    (Statement::OperatingStatement, "11. Operating Profit before Interest (5-10)", "9. Operating Profit before Interest (5-8)"),
    (Statement::OperatingStatement, "Operating Profit before Interest", "9. Operating Profit before Interest (5-8)"),
    (Statement::OperatingStatement, "9. i. Depreciation", "6. xi. Depreciation"),
    (Statement::OperatingStatement, "Depreciation", "6. xi. Depreciation"),
    (Statement::OperatingStatement, "9. ii. Amortisation", "6. xii. Amortisation"),
    (Statement::OperatingStatement, "Amortisation", "6. xii. Amortisation"),
    (Statement::OperatingStatement, "12. Finance Charges", "10. Finance Charges"),
    (Statement::OperatingStatement, "Finance Charges", "10. Finance Charges"),
    (Statement::OperatingStatement, "Sub-total (Income)", "12. Sub-total (Income)"),
    (Statement::OperatingStatement, "Sub-total (Expenses)", "12. Sub-total (Expenses)"),
    (Statement::OperatingStatement, "Provision for taxes", "14. i. Provision for taxes"),
    (Statement::OperatingStatement, "Deferred Tax", "14. ii. Deferred Tax"),
    (Statement::OperatingStatement, "Previous year adjustments", "14. iii. Previous year adjustments"),
    (Statement::OperatingStatement, "Sub-total (6+7) Cost of sales", "8. Sub-total (6+7) Cost of sales"),
    (Statement::BalanceSheet, "SBLC", "# SBLC"),
    (Statement::BalanceSheet, "BG", "$ BG (EPC)"),
    (Statement::BalanceSheet, "Sub-total [i + iii] (A)", "1. Sub-total [i + iii] (A)"),
    (Statement::BalanceSheet, "Sundry Creditors (Trade)", "3. Sundry Creditors (Trade)"),
    (Statement::BalanceSheet, "Advance payments from customers /deposits from dealers", "4. Advance payments from customers /deposits from dealers"),
    (Statement::BalanceSheet, "Instalments of Vehicle loans due within 1 yr", "5A. Instalments of Vehicle loans (due within 1 yr) (including lease liability) (Linked to Repayment schedules)"),
    (Statement::BalanceSheet, "Instalments of WCTL and DLOD due within 1 yr", "5B. Instalments of WCTL and DLOD (due within 1 yr) (including lease liability) (Linked to Repayment schedules)"),
    (Statement::BalanceSheet, "Instalments of CAPEX linked Term Loans due within 1 yr", "5C. Instalments of CAPEX linked Term Loans/ Debentures/ Preference Shares/ Deposits/ Other debts (due within 1 yr) (including lease liability) (Linked to Repayment schedules)"),
    (Statement::BalanceSheet, "Total current liabilities [A + B]", "7. Total current liabilities [A + B]"),
    (Statement::BalanceSheet, "Creditors for Capex", "8. Creditors for Capex"),
    (Statement::BalanceSheet, "Term Loans (excluding instalments payable within 1 year and WCTL)", "9A. Term Loans (excluding instalments payable within 1 year and WCTL)"),
    (Statement::BalanceSheet, "Vehicle loans", "9C. Vehicle loans"),
    (Statement::BalanceSheet, "Unsecured loans", "11. Unsecured loans"),
    (Statement::BalanceSheet, "Deferred Payment Credits (excluding instalments due within 1 year)", "12. i. Deferred Payment Credits (excluding instalments due within 1 year)"),
    (Statement::BalanceSheet, "Total Outside Liabilities [7+13]", "14. Total Outside Liabilities [7+13]"),
    (Statement::BalanceSheet, "Ordinary Share Capital (including premium)", "15. Ordinary Share Capital (including premium)"),
    (Statement::BalanceSheet, "Adjusted TNW (TNW+Quasi equity)", "40. Adjusted TNW (TNW+Quasi equity)"),
    (Statement::BalanceSheet, "Unsecured Loans eligible for QE classification", "40. Unsecured Loans eligible for QE classification"),
    (Statement::BalanceSheet, "Cash and Bank Balances (unencumbered)", "26. Cash and Bank Balances (unencumbered)"),
    (Statement::BalanceSheet, "Govt. and other trustee securities- short term", "27. i. Govt. and other trustee securities- short term"),
    (Statement::BalanceSheet, "Encumbered", "27. ii. Encumbered"),
    (Statement::BalanceSheet, "Cash at Bank (Pending for strategic investment)", "27. iii. Cash at Bank (Pending for strategic investment)"),
    (Statement::BalanceSheet, "Sundry Debtors- LESS THAN 6 MONTHS OLD", "28. Sundry Debtors- LESS THAN 6 MONTHS OLD"),
    (Statement::BalanceSheet, "Inventory", "29. Inventory:"),
    (Statement::BalanceSheet, "Advances to suppliers of raw material/spares", "30. i. Advances to suppliers of raw material/spares"),
    (Statement::BalanceSheet, "Total Current Assets (26 to 30)", "31. Total Current Assets (26 to 30)"),
    (Statement::BalanceSheet, "Closing", "32. Closing"),
    (Statement::BalanceSheet, "Capital work in process", "33. Capital work in process"),
    (Statement::BalanceSheet, "Net Block (32+33-34)", "35. Net Block (32+33-34)"),
    (Statement::BalanceSheet, "Investment in New Business", "36. i. Investment in New Business"),
    (Statement::BalanceSheet, "Loans & Investments in Group companies/ subsidiaries", "36. ii. Loans & Investments in Group companies/ subsidiaries"),
    (Statement::BalanceSheet, "Non current Investment", "36. iii. Non current Investment"),
    (Statement::BalanceSheet, "Advances for capital goods/ contractors", "36. iv. Advances for capital goods/ contractors"),
    (Statement::BalanceSheet, "Debtors More Than 6 Months (net of provisions)", "36. v. Debtors More Than 6 Months (net of provisions)"),
    (Statement::BalanceSheet, "Others- FD lodged with authorities/ margin money", "36. vii. Others- FD lodged with authorities/ margin money"),
    (Statement::BalanceSheet, "Repayment of TL", "D. Repayment of TL"),
    (Statement::BalanceSheet, "Repayment of Vehicle loans", "E. Repayment of Vehicle loans"),
    (Statement::BalanceSheet, "Repayment of WCTL", "F. Repayment of WCTL"),
    (Statement::BalanceSheet, "Funded from Internal Accruals", "G. Funded from Internal Accruals"),
];

/// Normalizes a user-supplied label to its canonical spelling.
///
/// Exact canonical labels win over aliases; surrounding whitespace is ignored.
pub fn resolve_label(statement: Statement, label: &str) -> Result<&'static str> {
    let trimmed = label.trim();

    if let Some(item) = find_line_item(statement, trimmed) {
        return Ok(item.label);
    }

    LABEL_ALIASES
        .iter()
        .find(|(alias_statement, alias, _)| *alias_statement == statement && *alias == trimmed)
        .and_then(|(_, _, canonical)| find_line_item(statement, canonical))
        .map(|item| item.label)
        .ok_or_else(|| CreditAnalysisError::UnknownLineItem(format!("{} ({})", trimmed, statement.title())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_ref_is_a_schema_label() {
        for field in FieldRef::ALL {
            let item = find_line_item(field.statement(), field.label());
            assert!(
                item.is_some(),
                "{:?} points at '{}', which is not in {:?}",
                field,
                field.label(),
                field.statement()
            );
        }
    }

    #[test]
    fn test_every_alias_targets_a_schema_label() {
        for (statement, alias, canonical) in LABEL_ALIASES {
            assert!(
                find_line_item(*statement, canonical).is_some(),
                "alias '{}' targets unknown '{}'",
                alias,
                canonical
            );
            assert!(
                find_line_item(*statement, alias).is_none(),
                "alias '{}' shadows a canonical label",
                alias
            );
        }
    }

    #[test]
    fn test_resolve_label() {
        assert_eq!(resolve_label(Statement::BalanceSheet, "SBLC").unwrap(), "# SBLC");
        assert_eq!(
            resolve_label(Statement::BalanceSheet, "Inventory").unwrap(),
            "29. Inventory:"
        );
        assert_eq!(
            resolve_label(Statement::BalanceSheet, " 29. Inventory: ").unwrap(),
            "29. Inventory:"
        );
        assert_eq!(
            resolve_label(Statement::OperatingStatement, "12. Finance Charges").unwrap(),
            "10. Finance Charges"
        );

        assert!(resolve_label(Statement::OperatingStatement, "SBLC").is_err());
        assert!(resolve_label(Statement::BalanceSheet, "Goodwill on the moon").is_err());
    }
}
