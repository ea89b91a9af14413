use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::StoreError;

/// Payment status of an order
///
/// Persisted as a single-character code in a `VARCHAR(1)` column
/// constrained to `'P'`, `'C'` or `'F'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Awaiting payment
    #[default]
    #[serde(rename = "P")]
    Pending,
    /// Payment captured
    #[serde(rename = "C")]
    Complete,
    /// Payment attempt failed
    #[serde(rename = "F")]
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Pending,
        PaymentStatus::Complete,
        PaymentStatus::Failed,
    ];

    /// Returns the stored code
    pub fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "P",
            PaymentStatus::Complete => "C",
            PaymentStatus::Failed => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Complete => "Complete",
            PaymentStatus::Failed => "Failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(PaymentStatus::Pending),
            "C" => Ok(PaymentStatus::Complete),
            "F" => Ok(PaymentStatus::Failed),
            other => Err(StoreError::Validation(format!(
                "invalid payment status code {other:?}: expected one of P, C, F"
            ))),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
