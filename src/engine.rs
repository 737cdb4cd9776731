use crate::aligner::{align, AlignedYear, FiscalYears, Row};
use crate::config::EngineConfig;
use crate::fields::FieldRef;
use crate::metrics::{DerivedMetricsData, Metric, YearMetrics};
use crate::schema::StatementInputs;
use crate::utils::{average, growth_percent, safe_divide, turnover_days};
use log::debug;

/// Figures read or combined straight from one year's pair of statement rows.
///
/// Built for the current year and for the previous year, so every phase that
/// needs a prior-year value reads it from here rather than from raw labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseFigures {
    // Financial performance
    pub total_operating_income: f64,
    pub ebitda: f64,
    pub depreciation: f64,
    pub interest: f64,
    pub other_income: f64,
    pub other_expense: f64,
    pub profit_before_tax: f64,
    pub current_tax: f64,
    pub deferred_tax: f64,
    pub profit_after_tax: f64,
    pub cash_profits: f64,
    pub cost_of_goods_sold: f64,
    pub cost_of_sales: f64,

    // Capital structure
    pub share_capital: f64,
    pub tangible_net_worth: f64,
    pub quasi_equity: f64,
    pub term_debt: f64,
    pub wctl: f64,
    pub working_capital_debt: f64,
    pub vehicle_loans: f64,
    pub unsecured_loans_gross: f64,
    pub unsecured_loans: f64,
    pub total_debt: f64,
    pub sblc_bg: f64,
    pub capital_employed: f64,
    pub liquidity_unencumbered: f64,
    pub liquidity_encumbered: f64,
    pub group_companies: f64,
    pub other_investments: f64,
    pub investments: f64,
    pub total_outside_liabilities: f64,

    // Working capital
    pub total_current_assets: f64,
    pub tca_except_free_liquidity: f64,
    pub total_current_liabilities: f64,
    pub tcl_except_financial_liabilities: f64,
    pub gross_debtors: f64,
    pub advance_to_suppliers: f64,
    pub inventory: f64,
    pub creditors: f64,
    pub advance_from_customers: f64,

    // Fixed assets and debt servicing
    pub net_block: f64,
    pub gross_fa_incl_cwip: f64,
    pub capex_advance: f64,
    pub capex_creditors: f64,
    pub repayment_term_loans: f64,
    pub repayment_vehicle_loans: f64,
    pub repayment_wctl: f64,
    pub internal_accruals: f64,
}

impl BaseFigures {
    pub fn from_rows(income: &Row<'_>, balance: &Row<'_>) -> Self {
        let f = |field: FieldRef| income.field(field);
        let b = |field: FieldRef| balance.field(field);

        // Phase 1: financial performance
        let depreciation = f(FieldRef::Depreciation) + f(FieldRef::Amortisation);
        let ebitda = f(FieldRef::OperatingProfit) + depreciation;
        let interest = f(FieldRef::FinanceCharges);
        let other_income = f(FieldRef::NonOperatingIncome);
        let other_expense = f(FieldRef::NonOperatingExpenses);
        let profit_before_tax = ebitda - depreciation - interest + other_income - other_expense;
        let current_tax =
            f(FieldRef::ProvisionForTaxes) + f(FieldRef::PreviousYearTaxAdjustments);
        let deferred_tax = f(FieldRef::DeferredTax);
        let profit_after_tax = profit_before_tax - current_tax - deferred_tax;
        let cash_profits = profit_after_tax + deferred_tax + depreciation;

        // Phase 2: capital structure
        let tangible_net_worth = b(FieldRef::AdjustedTangibleNetWorth);
        let quasi_equity = b(FieldRef::QuasiEquityUnsecuredLoans);
        let term_debt = b(FieldRef::TermLoanInstalments) + b(FieldRef::TermLoans);
        let wctl = b(FieldRef::WctlInstalments) + b(FieldRef::DeferredPaymentCredits);
        let working_capital_debt = b(FieldRef::BankFinance);
        let vehicle_loans = b(FieldRef::VehicleLoanInstalments) + b(FieldRef::VehicleLoans);
        let unsecured_loans_gross = b(FieldRef::UnsecuredLoans);
        let unsecured_loans = unsecured_loans_gross - quasi_equity;
        let liquidity_unencumbered = b(FieldRef::UnencumberedCash)
            + b(FieldRef::GovernmentSecurities)
            + b(FieldRef::CashPendingInvestment);
        let group_companies = b(FieldRef::GroupCompanyInvestment);
        let other_investments =
            b(FieldRef::NewBusinessInvestment) + b(FieldRef::NonCurrentInvestment);
        let total_current_assets = b(FieldRef::TotalCurrentAssets);

        Self {
            total_operating_income: f(FieldRef::NetOperatingIncome),
            ebitda,
            depreciation,
            interest,
            other_income,
            other_expense,
            profit_before_tax,
            current_tax,
            deferred_tax,
            profit_after_tax,
            cash_profits,
            cost_of_goods_sold: f(FieldRef::CostOfGoodsSold),
            cost_of_sales: f(FieldRef::CostOfSales) - depreciation,

            share_capital: b(FieldRef::ShareCapital),
            tangible_net_worth,
            quasi_equity,
            term_debt,
            wctl,
            working_capital_debt,
            vehicle_loans,
            unsecured_loans_gross,
            unsecured_loans,
            total_debt: term_debt + working_capital_debt + vehicle_loans + unsecured_loans,
            sblc_bg: b(FieldRef::Sblc) + b(FieldRef::BankGuarantee),
            capital_employed: tangible_net_worth + working_capital_debt,
            liquidity_unencumbered,
            liquidity_encumbered: b(FieldRef::EncumberedInvestments)
                + b(FieldRef::MarginMoneyDeposits),
            group_companies,
            other_investments,
            investments: group_companies + other_investments,
            total_outside_liabilities: b(FieldRef::TotalOutsideLiabilities),

            total_current_assets,
            tca_except_free_liquidity: total_current_assets - liquidity_unencumbered,
            total_current_liabilities: b(FieldRef::TotalCurrentLiabilities),
            tcl_except_financial_liabilities: b(FieldRef::OtherCurrentLiabilities),
            gross_debtors: b(FieldRef::Debtors) + b(FieldRef::OverdueDebtors),
            advance_to_suppliers: b(FieldRef::SupplierAdvances),
            inventory: b(FieldRef::Inventory),
            creditors: b(FieldRef::TradeCreditors),
            advance_from_customers: b(FieldRef::CustomerAdvances),

            net_block: b(FieldRef::NetBlock),
            gross_fa_incl_cwip: b(FieldRef::GrossBlockClosing) + b(FieldRef::CapitalWorkInProgress),
            capex_advance: b(FieldRef::CapexAdvances),
            capex_creditors: b(FieldRef::CapexCreditors),
            repayment_term_loans: b(FieldRef::TermLoanRepayment),
            repayment_vehicle_loans: b(FieldRef::VehicleLoanRepayment),
            repayment_wctl: b(FieldRef::WctlRepayment),
            internal_accruals: b(FieldRef::InternalAccruals),
        }
    }

    pub fn total_repayments(&self) -> f64 {
        self.repayment_term_loans + self.repayment_vehicle_loans + self.repayment_wctl
    }

    /// Gross fixed assets incl. CWIP, plus capex advances, less capex creditors.
    pub fn capex_base(&self) -> f64 {
        self.gross_fa_incl_cwip + self.capex_advance - self.capex_creditors
    }
}

/// Inputs of one phase: the year's base figures and the prior year's.
struct PhaseContext<'a> {
    current: &'a BaseFigures,
    previous: &'a BaseFigures,
    days_in_year: f64,
}

type Phase = fn(&PhaseContext<'_>, &mut YearMetrics);

const PHASES: [(&str, Phase); 8] = [
    ("financial performance", financial_performance),
    ("capital structure", capital_structure),
    ("growth", growth),
    ("profitability", profitability),
    ("returns", returns),
    ("solvency", solvency),
    ("liquidity", liquidity),
    ("capex and debt", capex_and_debt),
];

/// Derives the credit-analysis metric set from the two statements.
///
/// Pure and synchronous: the same inputs always produce the same output, and
/// no input combination makes a phase fail.
pub struct DerivationEngine {
    days_in_year: f64,
}

impl DerivationEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            days_in_year: config.days_in_year,
        }
    }

    pub fn compute(&self, years: &FiscalYears, inputs: &StatementInputs) -> DerivedMetricsData {
        let mut derived = DerivedMetricsData::new(years.clone());

        for aligned in align(years, &inputs.operating_statement, &inputs.balance_sheet) {
            let record = self.derive_year(&aligned);
            debug!(
                "Derived {} metrics for fiscal year {} (position {})",
                record.len(),
                aligned.year,
                aligned.index
            );
            derived.insert_year(aligned.year, &record);
        }

        derived
    }

    /// Runs every phase, in order, for one aligned year. Values are unrounded.
    pub fn derive_year(&self, aligned: &AlignedYear<'_>) -> YearMetrics {
        let current = BaseFigures::from_rows(&aligned.current_income, &aligned.current_balance);
        let previous =
            BaseFigures::from_rows(&aligned.previous_income, &aligned.previous_balance);

        let ctx = PhaseContext {
            current: &current,
            previous: &previous,
            days_in_year: self.days_in_year,
        };

        let mut record = YearMetrics::new();
        for (name, phase) in PHASES {
            phase(&ctx, &mut record);
            debug!("{}: {} phase done", aligned.year, name);
        }
        record
    }
}

fn financial_performance(ctx: &PhaseContext<'_>, out: &mut YearMetrics) {
    let c = ctx.current;
    out.set(Metric::TotalOperatingIncome, c.total_operating_income);
    out.set(Metric::Ebitda, c.ebitda);
    out.set(Metric::Depreciation, c.depreciation);
    out.set(Metric::Interest, c.interest);
    out.set(Metric::OtherIncome, c.other_income);
    out.set(Metric::OtherExpense, c.other_expense);
    out.set(Metric::ProfitBeforeTax, c.profit_before_tax);
    out.set(Metric::CurrentTax, c.current_tax);
    out.set(Metric::DeferredTax, c.deferred_tax);
    out.set(Metric::ProfitAfterTax, c.profit_after_tax);
    out.set(Metric::CashProfits, c.cash_profits);
}

fn capital_structure(ctx: &PhaseContext<'_>, out: &mut YearMetrics) {
    let c = ctx.current;
    out.set(Metric::ShareCapital, c.share_capital);
    out.set(Metric::TangibleNetWorth, c.tangible_net_worth);
    out.set(Metric::UnsecuredLoanQuasiEquity, c.quasi_equity);
    out.set(Metric::TotalDebt, c.total_debt);
    out.set(Metric::TermDebt, c.term_debt);
    out.set(Metric::Wctl, c.wctl);
    out.set(Metric::WorkingCapitalDebt, c.working_capital_debt);
    out.set(Metric::VehicleLoans, c.vehicle_loans);
    out.set(Metric::UnsecuredLoans, c.unsecured_loans);
    out.set(Metric::SblcBg, c.sblc_bg);
    out.set(Metric::CapitalEmployed, c.capital_employed);
    out.set(Metric::LiquidityUnencumbered, c.liquidity_unencumbered);
    out.set(Metric::LiquidityEncumbered, c.liquidity_encumbered);
    out.set(Metric::Investments, c.investments);
    out.set(Metric::GroupCompanies, c.group_companies);
    out.set(Metric::OtherInvestments, c.other_investments);
    out.set(Metric::TotalOutsideLiabilities, c.total_outside_liabilities);
}

fn growth(ctx: &PhaseContext<'_>, out: &mut YearMetrics) {
    let (c, p) = (ctx.current, ctx.previous);
    out.set(
        Metric::SalesGrowth,
        growth_percent(c.total_operating_income, p.total_operating_income),
    );
    out.set(Metric::EbitdaGrowth, growth_percent(c.ebitda, p.ebitda));
    out.set(
        Metric::PbtGrowth,
        growth_percent(c.profit_before_tax, p.profit_before_tax),
    );
    out.set(
        Metric::PatGrowth,
        growth_percent(c.profit_after_tax, p.profit_after_tax),
    );
}

fn profitability(ctx: &PhaseContext<'_>, out: &mut YearMetrics) {
    let c = ctx.current;
    let toi = c.total_operating_income;
    out.set(Metric::EbitdaMargin, safe_divide(c.ebitda, toi) * 100.0);
    out.set(Metric::PbtMargin, safe_divide(c.profit_before_tax, toi) * 100.0);
    out.set(Metric::PatMargin, safe_divide(c.profit_after_tax, toi) * 100.0);
}

fn returns(ctx: &PhaseContext<'_>, out: &mut YearMetrics) {
    let (c, p) = (ctx.current, ctx.previous);
    let avg_capital_employed = average(c.capital_employed, p.capital_employed);
    let avg_net_worth = average(c.tangible_net_worth, p.tangible_net_worth);

    out.set(
        Metric::ReturnOnCapitalEmployed,
        safe_divide(c.ebitda - c.depreciation, avg_capital_employed) * 100.0,
    );
    out.set(
        Metric::ReturnOnEquity,
        safe_divide(c.profit_after_tax, avg_net_worth) * 100.0,
    );
}

/// Coverage, leverage and DSCR.
///
/// Overall gearing, Total debt/Cash Profits and Total debt/EBITDA divide by
/// total debt (term + working capital + vehicle + unsecured loans), not by
/// working-capital debt alone. Average cost of borrowing is the one ratio
/// here taken against working-capital debt.
fn solvency(ctx: &PhaseContext<'_>, out: &mut YearMetrics) {
    let (c, p) = (ctx.current, ctx.previous);
    let avg_wc_debt = average(c.working_capital_debt, p.working_capital_debt);
    let repayments = c.total_repayments();
    let tnw = c.tangible_net_worth;

    out.set(
        Metric::AverageCostOfBorrowing,
        safe_divide(c.interest, avg_wc_debt) * 100.0,
    );
    out.set(
        Metric::CashProfitsToDebtRepay,
        safe_divide(c.cash_profits, c.cash_profits + repayments),
    );
    out.set(Metric::DebtEquityRatio, safe_divide(c.term_debt, tnw));
    out.set(Metric::OverallGearing, safe_divide(c.total_debt, tnw));
    out.set(Metric::TolTnw, safe_divide(c.total_outside_liabilities, tnw));
    out.set(Metric::InterestCoverageRatio, safe_divide(c.ebitda, c.interest));

    // Accruals only ever reduce cash available; a negative entry is ignored.
    let internal_accruals = c.internal_accruals.max(0.0);
    let cash_available = c.cash_profits + c.interest - internal_accruals;
    let debt_servicing = c.interest + repayments;
    let dscr = safe_divide(cash_available, debt_servicing);

    out.set(Metric::DebtServiceCoverageRatio, dscr);
    out.set(Metric::AddInterest, c.interest);
    out.set(Metric::LessInternalAccruals, internal_accruals);
    out.set(Metric::CashAvailableForDebtServicing, cash_available);
    out.set(Metric::InterestPayment, c.interest);
    out.set(Metric::PrincipalRepayment, repayments);
    out.set(Metric::TotalDebtServicing, debt_servicing);
    out.set(Metric::Dscr, dscr);

    out.set(
        Metric::TotalDebtToCashProfits,
        safe_divide(c.total_debt, c.cash_profits),
    );
    out.set(
        Metric::TermDebtToCashProfits,
        safe_divide(c.term_debt, c.cash_profits),
    );
    out.set(Metric::TotalDebtToEbitda, safe_divide(c.total_debt, c.ebitda));
}

fn liquidity(ctx: &PhaseContext<'_>, out: &mut YearMetrics) {
    let (c, p) = (ctx.current, ctx.previous);
    let days = ctx.days_in_year;
    let toi = c.total_operating_income;

    let debtor_days = turnover_days(toi, average(c.gross_debtors, p.gross_debtors), days);
    let inventory_days = turnover_days(
        c.cost_of_goods_sold,
        average(c.inventory, p.inventory),
        days,
    );
    let payable_days = turnover_days(c.cost_of_sales, average(c.creditors, p.creditors), days);

    let adjusted_debtor_days = turnover_days(
        toi,
        average(
            c.gross_debtors + c.advance_to_suppliers,
            p.gross_debtors + p.advance_to_suppliers,
        ),
        days,
    );
    let adjusted_payable_days = turnover_days(
        c.cost_of_sales,
        average(
            c.creditors + c.advance_from_customers,
            p.creditors + p.advance_from_customers,
        ),
        days,
    );
    let gross_current_asset_days = turnover_days(
        toi,
        average(c.tca_except_free_liquidity, p.tca_except_free_liquidity),
        days,
    );
    let fixed_assets_turnover = safe_divide(toi, average(c.net_block, p.net_block));

    out.set(
        Metric::SalesToWcDebt,
        safe_divide(toi, c.working_capital_debt),
    );
    out.set(
        Metric::CurrentRatio,
        safe_divide(c.total_current_assets, c.total_current_liabilities),
    );
    out.set(Metric::DebtorDays, debtor_days);
    out.set(Metric::InventoryDays, inventory_days);
    out.set(Metric::PayableDays, payable_days);
    out.set(
        Metric::OperatingCycleDays,
        debtor_days + inventory_days - payable_days,
    );
    out.set(Metric::AdjustedDebtorDays, adjusted_debtor_days);
    out.set(Metric::AdjustedPayableDays, adjusted_payable_days);
    out.set(
        Metric::AdjustedOperatingCycleDays,
        adjusted_debtor_days + inventory_days - adjusted_payable_days,
    );
    out.set(Metric::GrossCurrentAssetDays, gross_current_asset_days);
    out.set(Metric::FixedAssetsTurnoverRatio, fixed_assets_turnover);
}

fn capex_and_debt(ctx: &PhaseContext<'_>, out: &mut YearMetrics) {
    let (c, p) = (ctx.current, ctx.previous);

    // Other details
    out.set(Metric::TotalCurrentAssets, c.total_current_assets);
    out.set(Metric::TcaExceptFreeLiquidity, c.tca_except_free_liquidity);
    out.set(Metric::TotalCurrentLiabilities, c.total_current_liabilities);
    out.set(
        Metric::TclExceptFinancialLiabilities,
        c.tcl_except_financial_liabilities,
    );
    out.set(
        Metric::NetWorkingCapital,
        c.tca_except_free_liquidity - c.tcl_except_financial_liabilities,
    );
    out.set(Metric::GrossDebtors, c.gross_debtors);
    out.set(Metric::AdvanceToSuppliers, c.advance_to_suppliers);
    out.set(Metric::Inventory, c.inventory);
    out.set(Metric::Creditors, c.creditors);
    out.set(Metric::AdvanceFromCustomers, c.advance_from_customers);
    out.set(Metric::CostOfGoodsSold, c.cost_of_goods_sold);
    out.set(Metric::CostOfSales, c.cost_of_sales);
    out.set(Metric::NetBlock, c.net_block);
    out.set(Metric::RepaymentTermLoans, c.repayment_term_loans);
    out.set(Metric::RepaymentVehicleLoans, c.repayment_vehicle_loans);
    out.set(Metric::RepaymentWctl, c.repayment_wctl);

    // Capex: (A + B - C) this year less the same figure last year
    let capex = c.capex_base() - p.capex_base();
    out.set(Metric::GrossFixedAssetsInclCwip, c.gross_fa_incl_cwip);
    out.set(Metric::CapexAdvance, c.capex_advance);
    out.set(Metric::CreditorsForCapex, c.capex_creditors);
    out.set(Metric::Capex, capex);
    out.set(Metric::IncrementalCapex, capex);

    // Term debt roll-forward
    let term_debt_availed = c.term_debt + c.repayment_term_loans - p.term_debt;
    out.set(Metric::TermDebtOpening, p.term_debt);
    out.set(Metric::TermDebtAvailed, term_debt_availed);
    out.set(Metric::TermDebtRepayments, c.repayment_term_loans);
    out.set(Metric::TermDebtClosing, c.term_debt);
    out.set(Metric::GrossDebtAvailed, term_debt_availed);
    out.set(Metric::TotalTermDebtAvailed, term_debt_availed);

    // Financing of capex
    let funded_from_term_debt = term_debt_availed;
    let funded_from_unsecured = c.unsecured_loans_gross - p.unsecured_loans_gross;
    out.set(Metric::FatrToCompareWithCapex, out.get(Metric::FixedAssetsTurnoverRatio));
    out.set(
        Metric::TermLoanToCapex,
        safe_divide(funded_from_term_debt, capex) * 100.0,
    );
    out.set(Metric::FundedFromTermDebt, funded_from_term_debt);
    out.set(Metric::FundedFromUnsecuredLoan, funded_from_unsecured);
    out.set(
        Metric::FundedFromInternalAccruals,
        capex - funded_from_term_debt - funded_from_unsecured,
    );

    // Vehicle loan roll-forward
    out.set(Metric::VehicleLoansOpening, p.vehicle_loans);
    out.set(
        Metric::VehicleLoansAvailed,
        c.vehicle_loans + c.repayment_vehicle_loans - p.vehicle_loans,
    );
    out.set(Metric::VehicleLoansRepayments, c.repayment_vehicle_loans);
    out.set(Metric::VehicleLoansClosing, c.vehicle_loans);

    // WCTL roll-forward
    out.set(Metric::WctlOpening, p.wctl);
    out.set(Metric::WctlAvailed, c.wctl + c.repayment_wctl - p.wctl);
    out.set(Metric::WctlRepayments, c.repayment_wctl);
    out.set(Metric::WctlClosing, c.wctl);
}
