use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::{build_schedule, calculate_monthly_payment, AmortizationEntry};
use crate::request::LoanRequest;
use crate::types::LoanCategory;

/// outcome of a loan calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub category: LoanCategory,
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
    pub monthly_payment: Money,
    pub schedule: Vec<AmortizationEntry>,
    pub total_interest: Money,
    pub total_paid: Money,
}

impl LoanResult {
    /// resolve the principal, price the loan and build its schedule.
    ///
    /// Nothing is scheduled when the parameters are rejected.
    pub fn calculate(request: &LoanRequest) -> Result<Self> {
        let principal = request.resolve_principal()?;
        debug!(category = %request.category, %principal, "principal resolved");

        let monthly_payment =
            calculate_monthly_payment(principal, request.annual_rate, request.term_years)
                .map_err(|e| {
                    warn!(category = %request.category, error = %e, "loan rejected");
                    e
                })?;

        let schedule = build_schedule(
            principal,
            request.annual_rate,
            request.term_years,
            monthly_payment,
        )?;

        let total_interest: Money = schedule.iter().map(|e| e.interest_portion).sum();

        debug!(
            category = %request.category,
            %monthly_payment,
            months = schedule.len(),
            %total_interest,
            "schedule generated"
        );

        Ok(Self {
            category: request.category,
            principal,
            annual_rate: request.annual_rate,
            term_years: request.term_years,
            monthly_payment,
            schedule,
            total_interest,
            total_paid: principal + total_interest,
        })
    }

    /// entry for a given month, starting at 1
    pub fn entry(&self, month: u32) -> Option<&AmortizationEntry> {
        month
            .checked_sub(1)
            .and_then(|i| self.schedule.get(i as usize))
    }

    /// remaining balance after a given month
    pub fn balance_after(&self, month: u32) -> Money {
        self.entry(month)
            .map(|e| e.remaining_balance)
            .unwrap_or(self.principal)
    }

    /// sum of the principal portions across the schedule
    pub fn total_principal_repaid(&self) -> Money {
        self.schedule.iter().map(|e| e.principal_portion).sum()
    }
}
