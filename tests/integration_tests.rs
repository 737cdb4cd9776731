use credit_analysis_engine::*;
use std::sync::Arc;
use std::thread;

const YEARS: [&str; 3] = ["2022", "2023", "2024"];

fn income_rows() -> Vec<(&'static str, [f64; 3])> {
    vec![
        ("1. Gross Sales - Total", [10_000.0, 12_000.0, 13_800.0]),
        ("Cost of Goods Sold", [6_500.0, 7_600.0, 8_600.0]),
        ("Total Selling Gen & Admin Exp", [1_500.0, 1_800.0, 2_100.0]),
        ("6. xi. Depreciation", [300.0, 350.0, 400.0]),
        ("10. Finance Charges", [400.0, 450.0, 420.0]),
        ("14. i. Provision for taxes", [200.0, 300.0, 400.0]),
        ("14. ii. Deferred Tax", [50.0, 60.0, 70.0]),
    ]
}

fn balance_rows() -> Vec<(&'static str, [f64; 3])> {
    vec![
        ("1. Sub-total [i + iii] (A)", [1_500.0, 1_800.0, 2_000.0]),
        ("3. Sundry Creditors (Trade)", [900.0, 1_000.0, 1_100.0]),
        ("40. Adjusted TNW (TNW+Quasi equity)", [5_000.0, 6_500.0, 8_500.0]),
        (
            "9A. Term Loans (excluding instalments payable within 1 year and WCTL)",
            [2_000.0, 2_400.0, 2_000.0],
        ),
        (
            "5C. Instalments of CAPEX linked Term Loans/ Debentures/ Preference Shares/ Deposits/ Other debts (due within 1 yr) (including lease liability) (Linked to Repayment schedules)",
            [400.0, 400.0, 400.0],
        ),
        ("D. Repayment of TL", [300.0, 400.0, 400.0]),
        ("28. Sundry Debtors- LESS THAN 6 MONTHS OLD", [1_800.0, 2_000.0, 2_300.0]),
        ("29. Inventory:", [1_300.0, 1_500.0, 1_700.0]),
        ("31. Total Current Assets (26 to 30)", [4_000.0, 4_600.0, 5_200.0]),
        ("7. Total current liabilities [A + B]", [2_800.0, 3_200.0, 3_500.0]),
        ("32. Closing", [6_000.0, 7_000.0, 7_500.0]),
        ("33. Capital work in process", [0.0, 200.0, 0.0]),
        ("35. Net Block (32+33-34)", [4_000.0, 4_700.0, 4_800.0]),
    ]
}

fn manufacturing_company() -> StatementInputs {
    let mut inputs = StatementInputs::new();
    for (label, values) in income_rows() {
        for (year, value) in YEARS.iter().zip(values) {
            inputs = inputs.with_value(Statement::OperatingStatement, label, year, value);
        }
    }
    for (label, values) in balance_rows() {
        for (year, value) in YEARS.iter().zip(values) {
            inputs = inputs.with_value(Statement::BalanceSheet, label, year, value);
        }
    }
    inputs
}

fn metric(derived: &DerivedMetricsData, metric: Metric, year: &str) -> f64 {
    derived
        .get(metric, year)
        .unwrap_or_else(|| panic!("{} missing for {}", metric, year))
}

#[test]
fn test_comprehensive_manufacturing_company() -> anyhow::Result<()> {
    let config = EngineConfig::default();
    let years = FiscalYears::new(YEARS)?;

    let derived = process_credit_analysis(&config, &years, &manufacturing_company())?;

    // Financial performance
    assert!((metric(&derived, Metric::Ebitda, "2023") - 2_950.0).abs() < 0.01);
    assert!((metric(&derived, Metric::ProfitBeforeTax, "2023") - 2_150.0).abs() < 0.01);
    assert!((metric(&derived, Metric::ProfitAfterTax, "2023") - 1_790.0).abs() < 0.01);
    assert!((metric(&derived, Metric::CashProfits, "2023") - 2_200.0).abs() < 0.01);

    // Growth and margins
    assert!((metric(&derived, Metric::SalesGrowth, "2023") - 20.0).abs() < 0.01);
    assert!((metric(&derived, Metric::SalesGrowth, "2024") - 15.0).abs() < 0.01);
    assert!((metric(&derived, Metric::EbitdaMargin, "2023") - 24.58).abs() < 0.01);

    // Returns on averaged balances
    assert!((metric(&derived, Metric::ReturnOnCapitalEmployed, "2023") - 35.14).abs() < 0.01);
    assert!((metric(&derived, Metric::ReturnOnEquity, "2023") - 31.13).abs() < 0.01);

    // Coverage
    assert!((metric(&derived, Metric::InterestCoverageRatio, "2023") - 6.56).abs() < 0.01);
    assert!((metric(&derived, Metric::Dscr, "2023") - 3.12).abs() < 0.01);
    assert!((metric(&derived, Metric::OverallGearing, "2023") - 0.71).abs() < 0.01);
    assert!((metric(&derived, Metric::CurrentRatio, "2023") - 1.44).abs() < 0.01);

    // Turnover days are whole numbers
    assert_eq!(metric(&derived, Metric::DebtorDays, "2023"), 58.0);
    assert_eq!(metric(&derived, Metric::InventoryDays, "2023"), 67.0);
    assert_eq!(metric(&derived, Metric::PayableDays, "2023"), 38.0);
    assert_eq!(metric(&derived, Metric::OperatingCycleDays, "2023"), 87.0);

    // Capex and its financing
    assert!((metric(&derived, Metric::Capex, "2023") - 1_200.0).abs() < 0.01);
    assert!((metric(&derived, Metric::TermDebtOpening, "2023") - 2_400.0).abs() < 0.01);
    assert!((metric(&derived, Metric::TermDebtAvailed, "2023") - 800.0).abs() < 0.01);
    assert!((metric(&derived, Metric::FundedFromInternalAccruals, "2023") - 400.0).abs() < 0.01);
    assert!((metric(&derived, Metric::TermLoanToCapex, "2023") - 66.67).abs() < 0.01);

    assert!(derived.all_finite());
    Ok(())
}

#[test]
fn test_csv_export_matches_derived_values() -> anyhow::Result<()> {
    let config = EngineConfig::default();
    let years = FiscalYears::new(YEARS)?;
    let derived = process_credit_analysis(&config, &years, &manufacturing_company())?;

    let csv_text = MetricsReport::new(&derived).to_csv()?;
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    assert_eq!(header, vec!["Particulars", "2022", "2023", "2024"]);

    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        let label = record.get(0).unwrap_or_default();
        let metric = Metric::from_label(label)
            .unwrap_or_else(|| panic!("unexpected row label '{}'", label));

        for (index, year) in YEARS.iter().enumerate() {
            let cell = record.get(index + 1).unwrap_or_default();
            let (_, decimals) = cell.split_once('.').unwrap_or((cell, ""));
            assert_eq!(decimals.len(), 2, "cell '{}' for {} {}", cell, label, year);

            let parsed: f64 = cell.parse()?;
            let expected = derived.get(metric, year).unwrap_or_default();
            assert!((parsed - expected).abs() < 0.01);
        }
        rows += 1;
    }

    assert_eq!(rows, derived.metric_count());
    assert_eq!(rows, Metric::ALL.len());
    Ok(())
}

#[test]
fn test_workbook_session_flow() -> anyhow::Result<()> {
    let mut workbook = Workbook::with_fiscal_years(EngineConfig::default(), FiscalYears::new(YEARS)?)?;

    assert!(matches!(
        workbook.recompute(),
        Err(CreditAnalysisError::NoInputData)
    ));

    workbook.enter_cell(Statement::OperatingStatement, "1. Gross Sales - Total", "2022", "1,000")?;
    workbook.enter_cell(Statement::OperatingStatement, "1. Gross Sales - Total", "2023", "1,500")?;
    workbook.set_cell(Statement::BalanceSheet, "SBLC", "2023", 25.0)?;
    workbook.set_cell(Statement::BalanceSheet, "BG", "2023", 75.0)?;

    let rejected = workbook.enter_cell(Statement::BalanceSheet, "29. Inventory:", "2023", "n/a");
    assert!(matches!(rejected, Err(CreditAnalysisError::InvalidInput { .. })));

    let derived = workbook.recompute()?;
    assert!((metric(&derived, Metric::SalesGrowth, "2023") - 50.0).abs() < 0.01);
    assert!((metric(&derived, Metric::SblcBg, "2023") - 100.0).abs() < 0.01);
    assert_eq!(metric(&derived, Metric::Inventory, "2023"), 0.0);

    // Recomputing an unchanged snapshot yields an identical result.
    let again = workbook.recompute()?;
    assert_eq!(*again, *derived);

    let markdown = workbook.export_markdown()?;
    assert!(markdown.contains("## CAPITAL STRUCTURE"));

    workbook.reset();
    assert!(workbook.inputs().is_empty());
    assert!(workbook.derived().is_none());
    Ok(())
}

#[test]
fn test_grid_ingestion_round_trip() -> anyhow::Result<()> {
    let config = EngineConfig::default();
    let years = FiscalYears::new(YEARS)?;

    let income_grid = "Particulars,2022,2023,2024\n\
                       1. Gross Sales - Total,800,1000,1100\n\
                       Cost of Goods Sold,500,600,650\n\
                       Finance Charges,20,25,\n";
    let balance_grid = "Particulars,2022,2023,2024\n\
                        Inventory,100,120,130\n\
                        31. Total Current Assets (26 to 30),400,500,600\n\
                        7. Total current liabilities [A + B],200,250,300\n";

    let inputs = read_statement_grid(
        income_grid.as_bytes(),
        Statement::OperatingStatement,
        &StatementInputs::new(),
        &config,
        &years,
    )?;
    let inputs = read_statement_grid(
        balance_grid.as_bytes(),
        Statement::BalanceSheet,
        &inputs,
        &config,
        &years,
    )?;

    assert_eq!(inputs.operating_statement.get("10. Finance Charges", "2023"), Some(25.0));
    assert_eq!(inputs.operating_statement.get("10. Finance Charges", "2024"), None);
    assert_eq!(inputs.balance_sheet.get("29. Inventory:", "2024"), Some(130.0));

    let derived = process_credit_analysis(&config, &years, &inputs)?;
    assert!((metric(&derived, Metric::CurrentRatio, "2024") - 2.0).abs() < 0.01);
    assert!((metric(&derived, Metric::InterestCoverageRatio, "2023") - 16.0).abs() < 0.01);
    assert_eq!(metric(&derived, Metric::InterestCoverageRatio, "2024"), 0.0);
    Ok(())
}

#[test]
fn test_schema_generation() -> anyhow::Result<()> {
    let inputs_schema = StatementInputs::schema_as_json()?;
    assert!(inputs_schema.contains("operating_statement"));
    assert!(inputs_schema.contains("balance_sheet"));

    let config_schema = EngineConfig::schema_as_json()?;
    assert!(config_schema.contains("monetary_limit"));
    assert!(config_schema.contains("percentage_max"));
    Ok(())
}

#[test]
fn test_snapshot_json_round_trip() -> anyhow::Result<()> {
    let config = EngineConfig::default();
    let years = FiscalYears::new(YEARS)?;
    let inputs = manufacturing_company();

    let reloaded = StatementInputs::from_json(&inputs.to_json()?)?;
    assert_eq!(reloaded, inputs);

    let derived = process_credit_analysis(&config, &years, &reloaded)?;
    let json = MetricsReport::new(&derived).to_json()?;
    assert!(json.contains("\"Debt Service Coverage Ratio\""));

    let parsed = DerivedMetricsData::from_json(&json)?;
    assert_eq!(parsed, derived);
    Ok(())
}

#[test]
fn test_shared_workbook_last_writer_wins() -> anyhow::Result<()> {
    let shared = Arc::new(SharedWorkbook::with_fiscal_years(
        EngineConfig::default(),
        FiscalYears::new(YEARS)?,
    )?);
    shared.set_cell(Statement::OperatingStatement, "1. Gross Sales - Total", "2022", 500.0)?;

    let handles: Vec<_> = (1..=6)
        .map(|step| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || -> credit_analysis_engine::Result<RecomputeOutcome> {
                shared.set_cell(
                    Statement::OperatingStatement,
                    "1. Gross Sales - Total",
                    "2023",
                    step as f64 * 100.0,
                )?;
                shared.recompute()
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.join().expect("recompute thread panicked")?;
        if let RecomputeOutcome::Published(derived) = outcome {
            assert_eq!(derived.fiscal_years().len(), 3);
        }
    }

    // Whatever ticket won, the published snapshot is complete and consistent
    // with the inputs some single recompute saw.
    let derived = shared.derived().expect("at least one result published");
    let sales_2023 = metric(&derived, Metric::TotalOperatingIncome, "2023");
    assert!((100.0..=600.0).contains(&sales_2023));
    for metric_kind in Metric::ALL {
        assert!(derived.get(*metric_kind, "2024").is_some());
    }

    // A final recompute after all edits always publishes the latest inputs.
    let latest = shared.inputs();
    match shared.recompute()? {
        RecomputeOutcome::Published(derived) => {
            let expected = latest.operating_statement.value("1. Gross Sales - Total", "2023");
            assert!((metric(&derived, Metric::TotalOperatingIncome, "2023") - expected).abs() < 0.01);
        }
        RecomputeOutcome::Superseded => panic!("sole recompute was superseded"),
    }
    Ok(())
}
