//! quick start - price a mortgage and print the first year of its schedule
use loan_calculator_rs::{format_currency, LoanCategory, LoanRequest, LoanResult, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $350,000 home with $70,000 down at 6% over 30 years
    let request = LoanRequest::builder(LoanCategory::Mortgage)
        .gross_value(Money::from_major(350_000))
        .down_payment(Money::from_major(70_000))
        .rate(Rate::from_percentage(6))
        .term_years(30)
        .build()?;

    let result = LoanResult::calculate(&request)?;

    println!("Monthly payment: {}", format_currency(result.monthly_payment));
    println!("Total interest:  {}", format_currency(result.total_interest));

    for entry in result.schedule.iter().take(12) {
        println!(
            "{:>3}  principal {:>12}  interest {:>12}  balance {:>14}",
            entry.month,
            format_currency(entry.principal_portion),
            format_currency(entry.interest_portion),
            format_currency(entry.remaining_balance),
        );
    }

    Ok(())
}
