use std::io::Cursor;

use chrono::{TimeZone, Utc};
use loan_calculator_rs::{CalculatorConfig, SafeTimeProvider, Session, TimeSource};
use pretty_assertions::assert_eq;

fn run(input: &str, config: CalculatorConfig) -> String {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 11, 14, 22, 45, 56).unwrap(),
    ));
    let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), config, time);
    session.run().unwrap();
    String::from_utf8(session.into_output()).unwrap()
}

#[test]
fn mortgage_then_education_then_quit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loan_data.txt");
    let config = CalculatorConfig::default().with_export_path(&path);

    let input = "\
1
200000
0
6
30
Maybe
Yes
2
10000
0
5
No
";
    let out = run(input, config);

    assert!(out.starts_with("*** Welcome to NexGen Loans ***\n"));
    assert!(out.contains("Mortgage Loan Summary:\nPrincipal: $200,000.00\nAnnual Interest Rate: 6%\nLoan Term: 30 years\nMonthly Payment: $1,199.10\n"));
    assert!(out.contains("Please enter 'Yes' or 'No'."));
    assert!(out.contains("Education Loan Summary:"));
    assert!(out.contains("Monthly Payment: $166.67\nTotal Interest Paid: $0.00\nTotal Amount Paid: $10,000.00\n"));
    assert!(out.ends_with("Thank you for choosing NexGen Loans\nYour Future, Our Focus...\nSee You Soon !\n"));

    // the second loan overwrote the first export
    let export = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = export.lines().collect();
    assert_eq!(lines[1], "Your Education Loan : Repayment Pathway");
    assert_eq!(lines.len(), 5 + 60 + 1);
    assert_eq!(lines[5], "1\t \t$166.67 \t \t$166.67 \t\t$0.00\t\t$9,833.33");
    assert_eq!(lines[64], "60\t \t$166.67 \t \t$166.67 \t\t$0.00\t\t$0.00");
}

#[test]
fn mortgage_first_row_matches_reference_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loan_data.txt");
    let config = CalculatorConfig::default().with_export_path(&path);

    run("1\n250000\n50000\n6\n30\nNo\n", config);

    let export = std::fs::read_to_string(&path).unwrap();
    let first_row = export.lines().nth(5).unwrap();
    assert_eq!(first_row, "1\t \t$1,199.10 \t \t$199.10 \t\t$1,000.00\t\t$199,800.90");
    assert!(export.lines().nth(364).unwrap().ends_with("\t\t$0.00"));
}

#[test]
fn closed_input_ends_session_quietly() {
    let dir = tempfile::tempdir().unwrap();
    let config = CalculatorConfig::default().with_export_path(dir.path().join("unused.txt"));

    let out = run("1\n", config);

    assert!(out.contains("=== Mortgage Loan Calculator ==="));
    assert!(!out.contains("See You Soon"));
}
