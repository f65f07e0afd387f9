use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanClosureError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Non-amortizing payment: month {month} principal reduction {payment} does not cover accrued interest {interest}")]
    NonAmortizing {
        month: u32,
        interest: Decimal,
        payment: Decimal,
    },

    #[error("Schedule too long: balance not repaid within {max_months} months")]
    ScheduleTooLong { max_months: u32 },

    #[error("Decimal overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanClosureError {
    fn from(e: serde_json::Error) -> Self {
        LoanClosureError::SerializationError(e.to_string())
    }
}
