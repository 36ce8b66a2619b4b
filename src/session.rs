use std::io::{BufRead, Write};

use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::{CalculatorConfig, SummaryFormat};
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::loan::LoanResult;
use crate::prompt::Prompter;
use crate::report::{export_schedule, write_summary, LoanSummaryView};
use crate::request::{resolve_principal, LoanRequest};
use crate::types::{LoanCategory, PrincipalSource};

/// interactive calculator session: owns the retry loop, never the numbers
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    config: CalculatorConfig,
    time: SafeTimeProvider,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: CalculatorConfig, time: SafeTimeProvider) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            config,
            time,
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// run loans until the user declines another or input ends
    pub fn run(&mut self) -> Result<()> {
        self.prompter.say("*** Welcome to NexGen Loans ***")?;

        loop {
            match self.run_once().and_then(|_| self.prompter.confirm_repeat()) {
                Ok(true) => continue,
                Ok(false) => break,
                Err(LoanError::EndOfInput) => {
                    info!("console input closed, ending session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }

        self.prompter.say("Thank you for choosing NexGen Loans\nYour Future, Our Focus...\nSee You Soon !")?;
        Ok(())
    }

    /// one full round: choose, collect, calculate, summarise, export.
    ///
    /// Returns `None` when the loan parameters were rejected.
    pub fn run_once(&mut self) -> Result<Option<LoanResult>> {
        let category = self.prompter.choose_category()?;
        let request = self.collect_request(category)?;

        let result = match LoanResult::calculate(&request) {
            Ok(result) => result,
            Err(LoanError::InvalidParameters { .. }) => {
                self.prompter.say("Invalid Loan Parameters.")?;
                self.prompter
                    .say("Loan calculation failed due to invalid inputs. Please try again.")?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match self.config.summary_format {
            SummaryFormat::Text => write_summary(self.prompter.output(), &result)?,
            SummaryFormat::Json => {
                let json = LoanSummaryView::from_result(&result)
                    .to_json_pretty()
                    .map_err(std::io::Error::from)?;
                self.prompter.say(json)?;
            }
        }

        let path = self.config.export_path.display().to_string();
        match export_schedule(&result, &self.config, &self.time) {
            Ok(()) => self.prompter.say(format_args!("Amortization Table saved to {path}"))?,
            Err(e) => {
                warn!(error = %e, "export failed");
                self.prompter.say(format_args!("Error: Unable to write to file {path}"))?;
            }
        }

        Ok(Some(result))
    }

    /// prompt for everything a request of this category needs
    fn collect_request(&mut self, category: LoanCategory) -> Result<LoanRequest> {
        self.prompter
            .say(format_args!("\n=== {category} Loan Calculator ==="))?;

        let name = category.label().to_lowercase();
        let source = if category.requires_down_payment() {
            let gross_value = self
                .prompter
                .ask_money(&format!("Enter the {name} value: $"))?;
            self.collect_down_payment(&name, gross_value)?
        } else {
            let amount = self
                .prompter
                .ask_money(&format!("Enter the {name} loan amount: $"))?;
            PrincipalSource::Direct { amount }
        };

        let rate_percent = self
            .prompter
            .ask("Enter the annual interest rate (%): ", Decimal::ZERO)?;
        let term_years = self.prompter.ask("Enter the loan term in years: ", 1u32)?;

        LoanRequest::new(category, source, Rate::from_percent(rate_percent), term_years)
    }

    /// re-ask the down payment until it fits under the gross value
    fn collect_down_payment(&mut self, name: &str, gross_value: Money) -> Result<PrincipalSource> {
        let prompt = format!("Enter the down payment for your {name} loan: $");
        loop {
            let source = PrincipalSource::DownPayment {
                gross_value,
                down_payment: self.prompter.ask_money(&prompt)?,
            };
            match resolve_principal(&source) {
                Ok(_) => return Ok(source),
                Err(LoanError::DownPaymentExceedsValue { .. }) => {
                    self.prompter
                        .say(format_args!("Down payment cannot be greater than {name} value."))?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use std::io::Cursor;

    fn session(input: &str, config: CalculatorConfig) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), config, time)
    }

    #[test]
    fn test_down_payment_reprompted_until_within_value() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalculatorConfig::default().with_export_path(dir.path().join("out.txt"));
        let mut s = session("3\n20000\n25000\n5000\n6\n5\n", config);

        let result = s.run_once().unwrap().unwrap();
        assert_eq!(result.category, LoanCategory::Car);
        assert_eq!(result.principal, Money::from_major(15_000));

        let out = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(out.matches("Down payment cannot be greater than car value.").count(), 1);
        assert!(out.contains("=== Car Loan Calculator ==="));
        assert!(out.contains("Car Loan Summary:"));
        assert!(out.contains("Amortization Table saved to"));
    }

    #[test]
    fn test_rejected_loan_produces_no_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let config = CalculatorConfig::default().with_export_path(&path);
        let mut s = session("1\n300000\n300000\n6\n30\n", config);

        assert!(s.run_once().unwrap().is_none());
        assert!(!path.exists());

        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("Invalid Loan Parameters.\n"));
        assert!(out.contains("Loan calculation failed due to invalid inputs. Please try again.\n"));
    }

    #[test]
    fn test_rate_beyond_decimal_range_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let config = CalculatorConfig::default().with_export_path(&path);
        let mut s = session("2\n1000000\n1000000000000000000000000000\n30\n", config);

        assert!(s.run_once().unwrap().is_none());
        assert!(!path.exists());

        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("Invalid Loan Parameters.\n"));
    }

    #[test]
    fn test_export_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalculatorConfig::default().with_export_path(dir.path());
        let mut s = session("2\n1000\n0\n1\nNo\n", config);

        s.run().unwrap();

        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("Error: Unable to write to file"));
        assert!(out.ends_with("See You Soon !\n"));
    }

    #[test]
    fn test_json_summary() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalculatorConfig::default()
            .with_export_path(dir.path().join("out.txt"))
            .with_summary_format(SummaryFormat::Json);
        let mut s = session("2\n1200\n0\n1\n", config);

        s.run_once().unwrap();

        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("\"loan_type\": \"Education\""));
        assert!(!out.contains("Education Loan Summary:"));
    }
}
