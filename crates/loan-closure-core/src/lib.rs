pub mod emi;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "optimizer")]
pub mod optimizer;

pub use error::LoanClosureError;
pub use types::*;

/// Standard result type for all loan-closure operations
pub type LoanClosureResult<T> = Result<T, LoanClosureError>;
