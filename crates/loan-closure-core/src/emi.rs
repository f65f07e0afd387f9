//! Equated monthly installment (EMI) calculator.
//!
//! Computes the fixed monthly payment that retires a loan over its tenure
//! under uniform monthly compounding. All math uses `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanClosureError;
use crate::time_value::{level_payment, monthly_rate, round_money, MONTHS_PER_YEAR};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanClosureResult;

/// Annual rate (percent) above which a warning is attached.
const HIGH_RATE_WARNING_PCT: Decimal = dec!(50);

/// Smallest installment that can be paid: one cent.
const MIN_PAYMENT: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terms of an amortising loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5%).
    pub annual_rate_pct: Rate,
    /// Loan tenure in whole years.
    pub tenure_years: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_pct: Rate, tenure_years: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            tenure_years,
        }
    }

    /// Number of monthly installments over the full tenure.
    pub fn total_months(&self) -> LoanClosureResult<u32> {
        self.tenure_years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| LoanClosureError::InvalidInput {
                field: "tenure_years".into(),
                reason: "Tenure is too long to express in months".into(),
            })
    }
}

/// EMI together with the totals implied by paying it for the full tenure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub monthly_payment: Money,
    pub total_payments: u32,
    /// EMI x number of payments.
    pub total_payable: Money,
    /// Total payable minus principal.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly installment for a loan, rounded to 2 decimal places.
///
/// A zero rate yields straight-line repayment `principal / months`. An
/// installment that rounds below one cent is paid as one cent, so the loan
/// still amortises.
pub fn compute_emi(
    principal: Money,
    annual_rate_pct: Rate,
    tenure_years: u32,
) -> LoanClosureResult<Money> {
    let terms = LoanTerms::new(principal, annual_rate_pct, tenure_years);
    validate_terms(&terms)?;

    let months = terms.total_months()?;
    let payment = level_payment(monthly_rate(annual_rate_pct), months, principal)?;
    Ok(round_money(payment).max(MIN_PAYMENT))
}

/// Compute the EMI and its lifetime totals wrapped in the standard envelope.
pub fn analyze_emi(terms: &LoanTerms) -> LoanClosureResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let monthly_payment = compute_emi(terms.principal, terms.annual_rate_pct, terms.tenure_years)?;
    let total_payments = terms.total_months()?;

    if terms.annual_rate_pct > HIGH_RATE_WARNING_PCT {
        warnings.push(format!(
            "Annual rate of {}% is unusually high; check the rate is quoted in percent",
            terms.annual_rate_pct
        ));
    }

    let total_payable = monthly_payment
        .checked_mul(Decimal::from(total_payments))
        .ok_or_else(|| LoanClosureError::Overflow {
            context: "total payable over the tenure".into(),
        })?;
    let total_interest = total_payable
        .checked_sub(terms.principal)
        .ok_or_else(|| LoanClosureError::Overflow {
            context: "total interest over the tenure".into(),
        })?;
    let output = EmiOutput {
        monthly_payment,
        total_payments,
        total_payable,
        total_interest,
    };

    with_metadata(
        "Equated Monthly Installment (level payment, monthly compounding)",
        terms,
        warnings,
        start,
        output,
    )
}

pub(crate) fn validate_terms(terms: &LoanTerms) -> LoanClosureResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if terms.annual_rate_pct < Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if terms.tenure_years == 0 {
        return Err(LoanClosureError::InvalidInput {
            field: "tenure_years".into(),
            reason: "Tenure must be at least one year".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_emi_home_loan() {
        // 10 lakh at 8.5% over 20 years
        let emi = compute_emi(dec!(1_000_000), dec!(8.5), 20).unwrap();
        assert_eq!(emi, dec!(8678.23));
    }

    #[test]
    fn test_emi_short_loan() {
        // 1 lakh at 12% over 1 year: ~8884.88
        let emi = compute_emi(dec!(100_000), dec!(12), 1).unwrap();
        assert_eq!(emi, dec!(8884.88));
    }

    #[test]
    fn test_emi_zero_rate_is_straight_line() {
        let emi = compute_emi(dec!(1_200_000), Decimal::ZERO, 10).unwrap();
        assert_eq!(emi, dec!(10_000));
    }

    #[test]
    fn test_emi_zero_rate_rounds() {
        // 100,000 / 36 = 2777.777...
        let emi = compute_emi(dec!(100_000), Decimal::ZERO, 3).unwrap();
        assert_eq!(emi, dec!(2777.78));
    }

    #[test]
    fn test_emi_tiny_principal_pays_one_cent() {
        // 1 over 360 months is 0.0028 a month
        let emi = compute_emi(dec!(1), Decimal::ZERO, 30).unwrap();
        assert_eq!(emi, dec!(0.01));

        let emi = compute_emi(dec!(0.50), dec!(8.5), 30).unwrap();
        assert_eq!(emi, dec!(0.01));
    }

    #[test]
    fn test_emi_rejects_non_positive_principal() {
        let zero = compute_emi(Decimal::ZERO, dec!(8.5), 20);
        let negative = compute_emi(dec!(-1), dec!(8.5), 20);
        assert!(matches!(zero, Err(LoanClosureError::InvalidInput { .. })));
        assert!(matches!(negative, Err(LoanClosureError::InvalidInput { .. })));
    }

    #[test]
    fn test_emi_rejects_zero_tenure() {
        let result = compute_emi(dec!(1_000_000), dec!(8.5), 0);
        match result {
            Err(LoanClosureError::InvalidInput { field, .. }) => assert_eq!(field, "tenure_years"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_emi_rejects_negative_rate() {
        let result = compute_emi(dec!(1_000_000), dec!(-1), 20);
        assert!(matches!(result, Err(LoanClosureError::InvalidInput { .. })));
    }

    #[test]
    fn test_emi_overflow_is_an_error() {
        // 1200% a year compounded over 4800 months does not fit in a Decimal
        let result = compute_emi(dec!(1_000_000), dec!(1200), 400);
        assert!(matches!(result, Err(LoanClosureError::Overflow { .. })));
    }

    #[test]
    fn test_analyze_emi_totals() {
        let terms = LoanTerms::new(dec!(1_000_000), dec!(8.5), 20);
        let out = analyze_emi(&terms).unwrap();
        let r = &out.result;
        assert_eq!(r.monthly_payment, dec!(8678.23));
        assert_eq!(r.total_payments, 240);
        assert_eq!(r.total_payable, dec!(2_082_775.20));
        assert_eq!(r.total_interest, dec!(1_082_775.20));
        assert!(out.warnings.is_empty());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_analyze_emi_huge_principal_overflows() {
        let terms = LoanTerms::new(Decimal::MAX / dec!(2), dec!(8.5), 30);
        let result = analyze_emi(&terms);
        assert!(matches!(result, Err(LoanClosureError::Overflow { .. })));
    }

    #[test]
    fn test_analyze_emi_high_rate_warning() {
        let terms = LoanTerms::new(dec!(10_000), dec!(60), 1);
        let out = analyze_emi(&terms).unwrap();
        assert_eq!(out.warnings.len(), 1);
    }
}
