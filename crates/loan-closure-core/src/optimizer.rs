//! Loan closure optimisation.
//!
//! Compares the regular EMI schedule against one accelerated by extra
//! monthly payments and/or a lump sum, reporting the tenure and interest
//! saved along with the accelerated balance trajectory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{simulate, PaymentPlan, ScheduleEntry};
use crate::emi::{compute_emi, validate_terms, LoanTerms};
use crate::error::LoanClosureError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanClosureResult;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Loan terms plus the prepayments being considered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureInput {
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5%).
    pub annual_rate_pct: Rate,
    pub tenure_years: u32,
    #[serde(default)]
    pub extra_monthly: Money,
    #[serde(default)]
    pub lump_sum: Money,
    /// Month of the lump sum, between 1 and the tenure in months.
    #[serde(default)]
    pub lump_sum_month: u32,
}

impl ClosureInput {
    pub fn terms(&self) -> LoanTerms {
        LoanTerms::new(self.principal, self.annual_rate_pct, self.tenure_years)
    }
}

/// Baseline vs. accelerated repayment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureComparison {
    /// EMI paid in both schedules.
    pub monthly_payment: Money,
    pub original_tenure_months: u32,
    pub new_tenure_months: u32,
    pub months_saved: u32,
    pub interest_without_optimization: Money,
    pub interest_with_optimization: Money,
    pub interest_saved: Money,
    /// Month-end balances of the accelerated schedule.
    pub schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the baseline and accelerated schedules and compare them.
pub fn compare_closure(
    input: &ClosureInput,
) -> LoanClosureResult<ComputationOutput<ClosureComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = input.terms();
    validate_closure(input, &terms)?;

    let emi = compute_emi(terms.principal, terms.annual_rate_pct, terms.tenure_years)?;

    let plan = if input.lump_sum > Decimal::ZERO {
        PaymentPlan::new(emi)
            .with_extra_monthly(input.extra_monthly)
            .with_lump_sum(input.lump_sum, input.lump_sum_month)
    } else {
        PaymentPlan::new(emi).with_extra_monthly(input.extra_monthly)
    };

    if !plan.has_prepayments() {
        warnings.push(
            "No extra monthly payment or lump sum given; optimised schedule equals baseline"
                .into(),
        );
    }

    let baseline = simulate(terms.principal, terms.annual_rate_pct, &PaymentPlan::new(emi))?;
    let optimized = simulate(terms.principal, terms.annual_rate_pct, &plan)?;

    if plan.lump_sum > Decimal::ZERO && plan.lump_sum_month > optimized.total_months {
        warnings.push(format!(
            "Lump sum month {} falls after payoff in month {}; lump sum never applied",
            plan.lump_sum_month, optimized.total_months
        ));
    }

    let output = ClosureComparison {
        monthly_payment: emi,
        original_tenure_months: baseline.total_months,
        new_tenure_months: optimized.total_months,
        months_saved: baseline.total_months.saturating_sub(optimized.total_months),
        interest_without_optimization: baseline.total_interest_paid,
        interest_with_optimization: optimized.total_interest_paid,
        interest_saved: baseline.total_interest_paid - optimized.total_interest_paid,
        schedule: optimized.schedule,
    };

    with_metadata(
        "Loan closure optimisation: EMI baseline vs. prepayment schedule",
        input,
        warnings,
        start,
        output,
    )
}

fn validate_closure(input: &ClosureInput, terms: &LoanTerms) -> LoanClosureResult<()> {
    validate_terms(terms)?;

    if input.extra_monthly < Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "extra_monthly".into(),
            reason: "Extra monthly payment cannot be negative".into(),
        });
    }
    if input.lump_sum < Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "lump_sum".into(),
            reason: "Lump sum cannot be negative".into(),
        });
    }
    if input.lump_sum > Decimal::ZERO {
        let tenure_months = terms.total_months()?;
        if input.lump_sum_month == 0 || input.lump_sum_month > tenure_months {
            return Err(LoanClosureError::InvalidInput {
                field: "lump_sum_month".into(),
                reason: format!("Lump sum month must be between 1 and {tenure_months}"),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
