use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::LoanCategory;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid loan parameters: principal {principal}, annual rate {annual_rate}, term {term_years} years")]
    InvalidParameters {
        principal: Money,
        annual_rate: Rate,
        term_years: u32,
    },

    #[error("down payment {down_payment} exceeds value {gross_value}")]
    DownPaymentExceedsValue {
        down_payment: Money,
        gross_value: Money,
    },

    #[error("{field} cannot be negative: {amount}")]
    NegativeAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("incomplete loan request: {message}")]
    IncompleteRequest {
        message: String,
    },

    #[error("principal source does not match {category:?} loan")]
    CategoryMismatch {
        category: LoanCategory,
    },

    #[error("unable to write to file {}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("console input closed")]
    EndOfInput,

    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
