use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// remaining balance left after the final payment that still counts as paid off
pub const SETTLEMENT_TOLERANCE: Money = Money::from_decimal(Decimal::from_parts(1, 0, 0, false, 6));

/// one month in an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

/// number of monthly payments in a term, `None` past `u32::MAX`
pub fn total_months(term_years: u32) -> Option<u32> {
    term_years.checked_mul(12)
}

/// fixed monthly payment that retires `principal` over `term_years`.
///
/// Fails with [`LoanError::InvalidParameters`] when the principal is not
/// positive, the term is zero or the rate is negative. Terms and rates
/// whose payment or total repaid leave the decimal range fail the same way.
pub fn calculate_monthly_payment(principal: Money, annual_rate: Rate, term_years: u32) -> Result<Money> {
    let invalid = || LoanError::InvalidParameters {
        principal,
        annual_rate,
        term_years,
    };

    if !principal.is_positive() || term_years == 0 || annual_rate.is_negative() {
        return Err(invalid());
    }

    let months = total_months(term_years).ok_or_else(invalid)?;
    let count = Decimal::from(months);
    let p = principal.as_decimal();

    let payment = if annual_rate.is_zero() {
        Some(p / count)
    } else {
        // payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
        let r = annual_rate.monthly_rate().as_decimal();
        match (Decimal::ONE + r).checked_powu(u64::from(months)) {
            // rate too small to register at decimal precision
            Some(growth) if growth <= Decimal::ONE => Some(p / count),
            Some(growth) => growth
                .checked_div(growth - Decimal::ONE)
                .and_then(|ratio| p.checked_mul(r)?.checked_mul(ratio)),
            // growth past the decimal range: the ratio is 1 to full precision
            None => p.checked_mul(r),
        }
    }
    .ok_or_else(invalid)?;

    // every running total of the schedule stays under payment * months
    payment.checked_mul(count).ok_or_else(invalid)?;

    Ok(Money::from_decimal(payment))
}

/// month-by-month breakdown of a fixed payment over the term.
///
/// Inputs are expected to have passed [`calculate_monthly_payment`]: the
/// payment then covers each month's interest, so the balance never grows
/// and `balance * r` stays within `principal * r`.
pub fn build_schedule(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    monthly_payment: Money,
) -> Result<Vec<AmortizationEntry>> {
    let monthly_rate = annual_rate.monthly_rate();
    let months = total_months(term_years).ok_or(LoanError::InvalidParameters {
        principal,
        annual_rate,
        term_years,
    })?;

    let mut entries = Vec::with_capacity(months as usize);
    let mut balance = principal;

    for month in 1..=months {
        let interest_portion = balance.apply_periodic_rate(monthly_rate);
        let principal_portion = monthly_payment - interest_portion;
        balance -= principal_portion;

        entries.push(AmortizationEntry {
            month,
            payment_amount: monthly_payment,
            principal_portion,
            interest_portion,
            remaining_balance: settle(balance, month == months),
        });
    }

    Ok(entries)
}

/// clamp a running balance for recording: never negative, and residue
/// after the final payment is zero
fn settle(balance: Money, final_month: bool) -> Money {
    if balance.is_negative() || (final_month && balance < SETTLEMENT_TOLERANCE) {
        Money::ZERO
    } else {
        balance
    }
}
