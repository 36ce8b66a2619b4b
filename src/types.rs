use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// loan categories offered by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanCategory {
    Mortgage,
    Education,
    Car,
}

impl LoanCategory {
    /// all categories in menu order
    pub const ALL: [LoanCategory; 3] = [
        LoanCategory::Mortgage,
        LoanCategory::Education,
        LoanCategory::Car,
    ];

    /// menu key shown to the user
    pub fn menu_key(&self) -> &'static str {
        match self {
            LoanCategory::Mortgage => "1",
            LoanCategory::Education => "2",
            LoanCategory::Car => "3",
        }
    }

    /// look up a category by its menu key
    pub fn from_menu_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.menu_key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanCategory::Mortgage => "Mortgage",
            LoanCategory::Education => "Education",
            LoanCategory::Car => "Car",
        }
    }

    /// whether the principal is derived from a value and a down payment
    pub fn requires_down_payment(&self) -> bool {
        matches!(self, LoanCategory::Mortgage | LoanCategory::Car)
    }
}

impl fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// where the financed principal comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalSource {
    /// gross value reduced by an upfront down payment (mortgage, car)
    DownPayment { gross_value: Money, down_payment: Money },
    /// amount entered directly (education)
    Direct { amount: Money },
}
