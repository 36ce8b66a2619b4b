use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::{LoanCategory, PrincipalSource};

/// a single loan calculation request, built once per interactive round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub category: LoanCategory,
    pub source: PrincipalSource,
    pub annual_rate: Rate,
    pub term_years: u32,
}

impl LoanRequest {
    /// create a request, checking the principal source fits the category
    pub fn new(
        category: LoanCategory,
        source: PrincipalSource,
        annual_rate: Rate,
        term_years: u32,
    ) -> Result<Self> {
        let fits = match source {
            PrincipalSource::DownPayment { .. } => category.requires_down_payment(),
            PrincipalSource::Direct { .. } => !category.requires_down_payment(),
        };
        if !fits {
            return Err(LoanError::CategoryMismatch { category });
        }

        Ok(Self {
            category,
            source,
            annual_rate,
            term_years,
        })
    }

    pub fn builder(category: LoanCategory) -> LoanRequestBuilder {
        LoanRequestBuilder::new(category)
    }

    /// financed principal for this request
    pub fn resolve_principal(&self) -> Result<Money> {
        resolve_principal(&self.source)
    }
}

/// resolve the financed principal from its source.
///
/// A down payment may equal the gross value (yielding a zero principal the
/// payment calculator will reject) but never exceed it.
pub fn resolve_principal(source: &PrincipalSource) -> Result<Money> {
    match *source {
        PrincipalSource::DownPayment {
            gross_value,
            down_payment,
        } => {
            if gross_value.is_negative() {
                return Err(LoanError::NegativeAmount {
                    field: "gross value",
                    amount: gross_value,
                });
            }
            if down_payment.is_negative() {
                return Err(LoanError::NegativeAmount {
                    field: "down payment",
                    amount: down_payment,
                });
            }
            if down_payment > gross_value {
                return Err(LoanError::DownPaymentExceedsValue {
                    down_payment,
                    gross_value,
                });
            }
            Ok(gross_value - down_payment)
        }
        PrincipalSource::Direct { amount } => {
            if amount.is_negative() {
                return Err(LoanError::NegativeAmount {
                    field: "loan amount",
                    amount,
                });
            }
            Ok(amount)
        }
    }
}

/// builder for loan requests
pub struct LoanRequestBuilder {
    category: LoanCategory,
    gross_value: Option<Money>,
    down_payment: Option<Money>,
    loan_amount: Option<Money>,
    annual_rate: Option<Rate>,
    term_years: Option<u32>,
}

impl LoanRequestBuilder {
    pub fn new(category: LoanCategory) -> Self {
        Self {
            category,
            gross_value: None,
            down_payment: None,
            loan_amount: None,
            annual_rate: None,
            term_years: None,
        }
    }

    pub fn gross_value(mut self, value: Money) -> Self {
        self.gross_value = Some(value);
        self
    }

    pub fn down_payment(mut self, amount: Money) -> Self {
        self.down_payment = Some(amount);
        self
    }

    pub fn loan_amount(mut self, amount: Money) -> Self {
        self.loan_amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    /// annual rate as entered by a user, e.g. 6.5 for 6.5%
    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.annual_rate = Some(Rate::from_percent(percent));
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn build(self) -> Result<LoanRequest> {
        let source = if self.category.requires_down_payment() {
            let gross_value = self.gross_value.ok_or_else(|| LoanError::IncompleteRequest {
                message: format!("{} value required", self.category.label().to_lowercase()),
            })?;
            PrincipalSource::DownPayment {
                gross_value,
                // no down payment entered means nothing was paid upfront
                down_payment: self.down_payment.unwrap_or(Money::ZERO),
            }
        } else {
            let amount = self.loan_amount.ok_or_else(|| LoanError::IncompleteRequest {
                message: "loan amount required".to_string(),
            })?;
            PrincipalSource::Direct { amount }
        };

        let annual_rate = self.annual_rate.ok_or_else(|| LoanError::IncompleteRequest {
            message: "rate required".to_string(),
        })?;

        let term_years = self.term_years.ok_or_else(|| LoanError::IncompleteRequest {
            message: "term required".to_string(),
        })?;

        LoanRequest::new(self.category, source, annual_rate, term_years)
    }
}
