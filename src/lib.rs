pub mod config;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod payments;
pub mod prompt;
pub mod report;
pub mod request;
pub mod session;
pub mod types;

// re-export key types
pub use config::{CalculatorConfig, SummaryFormat};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use loan::LoanResult;
pub use payments::{build_schedule, calculate_monthly_payment, AmortizationEntry};
pub use prompt::{InputError, Prompter};
pub use report::{export_schedule, format_currency, LoanSummaryView};
pub use request::{resolve_principal, LoanRequest, LoanRequestBuilder};
pub use session::Session;
pub use types::{LoanCategory, PrincipalSource};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
