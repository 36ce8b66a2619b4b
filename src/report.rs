//! console summary and text export of a loan result
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::{DateTime, Local, TimeZone};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::loan::LoanResult;
use crate::payments::AmortizationEntry;
use crate::types::LoanCategory;

/// format an amount as `$` + thousands-separated value with two decimals
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.to_cents().as_decimal();
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// write the human readable loan summary
pub fn write_summary<W: Write>(out: &mut W, result: &LoanResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} Loan Summary:", result.category)?;
    writeln!(out, "Principal: {}", format_currency(result.principal))?;
    writeln!(out, "Annual Interest Rate: {}", result.annual_rate)?;
    writeln!(out, "Loan Term: {} years", result.term_years)?;
    writeln!(out, "Monthly Payment: {}", format_currency(result.monthly_payment))?;
    writeln!(out, "Total Interest Paid: {}", format_currency(result.total_interest))?;
    writeln!(out, "Total Amount Paid: {}", format_currency(result.total_paid))?;
    Ok(())
}

/// serializable view of a loan result without the schedule
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanSummaryView {
    pub loan_type: LoanCategory,
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub payment_count: usize,
}

impl LoanSummaryView {
    /// amounts are rounded to cents for presentation
    pub fn from_result(result: &LoanResult) -> Self {
        LoanSummaryView {
            loan_type: result.category,
            principal: result.principal.to_cents(),
            annual_rate: result.annual_rate,
            term_years: result.term_years,
            monthly_payment: result.monthly_payment.to_cents(),
            total_interest: result.total_interest.to_cents(),
            total_paid: result.total_paid.to_cents(),
            payment_count: result.schedule.len(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// write the fixed-width repayment table
pub fn write_schedule<W, Tz>(
    out: &mut W,
    category: LoanCategory,
    schedule: &[AmortizationEntry],
    generated_at: &DateTime<Tz>,
    config: &CalculatorConfig,
) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let rule = config.rule();

    writeln!(out, "{}", generated_at.format(&config.timestamp_format))?;
    writeln!(out, "Your {category} Loan : Repayment Pathway")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Month\t Payment \t\tPrincipal\t \tInterest\t Remaining Balance")?;
    writeln!(out, "{rule}")?;

    for entry in schedule {
        writeln!(
            out,
            "{}\t \t{} \t \t{} \t\t{}\t\t{}",
            entry.month,
            format_currency(entry.payment_amount),
            format_currency(entry.principal_portion),
            format_currency(entry.interest_portion),
            format_currency(entry.remaining_balance),
        )?;
    }

    writeln!(out, "{rule}")?;
    Ok(())
}

/// export a result's schedule to the configured file, replacing any previous export
pub fn export_schedule(
    result: &LoanResult,
    config: &CalculatorConfig,
    time_provider: &SafeTimeProvider,
) -> Result<()> {
    let path = &config.export_path;
    let export_err = |source| LoanError::Export {
        path: path.clone(),
        source,
    };

    let file = File::create(path).map_err(export_err)?;
    let mut writer = BufWriter::new(file);
    let generated_at = time_provider.now().with_timezone(&Local);

    write_schedule(&mut writer, result.category, &result.schedule, &generated_at, config)
        .and_then(|_| writer.flush())
        .map_err(export_err)?;

    info!(path = %path.display(), months = result.schedule.len(), "schedule exported");
    Ok(())
}
