pub mod amortization;

pub use amortization::{
    build_schedule, calculate_monthly_payment, total_months, AmortizationEntry,
    SETTLEMENT_TOLERANCE,
};
