//! Month-by-month amortization simulator with prepayments.
//!
//! Runs a level-payment loan down to zero, optionally accelerating it with a
//! fixed extra payment every month and a one-time lump sum in a chosen
//! month. Interest for a month accrues on the opening balance before any
//! payment (including the lump sum) is applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanClosureError;
use crate::time_value::{monthly_rate, round_money};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanClosureResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hard cap on simulated months (100 years).
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Payments made against the loan each month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlan {
    /// Regular installment, normally the EMI.
    pub monthly_payment: Money,
    /// Additional principal paid every month.
    #[serde(default)]
    pub extra_monthly: Money,
    /// One-time additional principal payment.
    #[serde(default)]
    pub lump_sum: Money,
    /// 1-indexed month in which the lump sum is paid. 0 means never.
    #[serde(default)]
    pub lump_sum_month: u32,
}

impl PaymentPlan {
    /// Plan paying only the regular installment.
    pub fn new(monthly_payment: Money) -> Self {
        Self {
            monthly_payment,
            extra_monthly: Decimal::ZERO,
            lump_sum: Decimal::ZERO,
            lump_sum_month: 0,
        }
    }

    pub fn with_extra_monthly(mut self, extra_monthly: Money) -> Self {
        self.extra_monthly = extra_monthly;
        self
    }

    pub fn with_lump_sum(mut self, lump_sum: Money, month: u32) -> Self {
        self.lump_sum = lump_sum;
        self.lump_sum_month = month;
        self
    }

    /// True when the plan pays anything beyond the regular installment.
    pub fn has_prepayments(&self) -> bool {
        self.extra_monthly > Decimal::ZERO || self.lump_sum > Decimal::ZERO
    }
}

/// Balance outstanding at the end of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    /// Rounded to 2 decimal places.
    pub remaining_balance: Money,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Months until the balance reached zero. Equals `schedule.len()`.
    pub total_months: u32,
    /// Sum of monthly interest, rounded to 2 decimal places.
    pub total_interest_paid: Money,
    pub schedule: Vec<ScheduleEntry>,
}

impl ScheduleResult {
    /// Recorded balance at the end of `month`, if the loan was still running.
    pub fn balance_at(&self, month: u32) -> Option<Money> {
        let idx = month.checked_sub(1)? as usize;
        self.schedule.get(idx).map(|e| e.remaining_balance)
    }

    pub fn final_balance(&self) -> Money {
        self.schedule
            .last()
            .map(|e| e.remaining_balance)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Self-contained simulation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5%).
    pub annual_rate_pct: Rate,
    pub monthly_payment: Money,
    #[serde(default)]
    pub extra_monthly: Money,
    #[serde(default)]
    pub lump_sum: Money,
    #[serde(default)]
    pub lump_sum_month: u32,
}

impl ScheduleInput {
    pub fn plan(&self) -> PaymentPlan {
        PaymentPlan {
            monthly_payment: self.monthly_payment,
            extra_monthly: self.extra_monthly,
            lump_sum: self.lump_sum,
            lump_sum_month: self.lump_sum_month,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the loan balance month by month until it is fully repaid.
///
/// Fails with [`LoanClosureError::NonAmortizing`] as soon as a month's
/// payments do not reduce principal, and with
/// [`LoanClosureError::ScheduleTooLong`] if the loan is still outstanding
/// after [`MAX_SCHEDULE_MONTHS`].
pub fn simulate(
    principal: Money,
    annual_rate_pct: Rate,
    plan: &PaymentPlan,
) -> LoanClosureResult<ScheduleResult> {
    validate_simulation(principal, annual_rate_pct, plan)?;

    let rate = monthly_rate(annual_rate_pct);
    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut month: u32 = 0;
    let mut schedule = Vec::new();

    while balance > Decimal::ZERO {
        if month == MAX_SCHEDULE_MONTHS {
            return Err(LoanClosureError::ScheduleTooLong {
                max_months: MAX_SCHEDULE_MONTHS,
            });
        }
        month += 1;

        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| overflow("monthly interest", month))?;
        let mut principal_payment = plan
            .monthly_payment
            .checked_sub(interest)
            .and_then(|v| v.checked_add(plan.extra_monthly))
            .ok_or_else(|| overflow("principal payment", month))?;

        if month == plan.lump_sum_month {
            principal_payment = principal_payment
                .checked_add(plan.lump_sum)
                .ok_or_else(|| overflow("lump sum payment", month))?;
        }

        if principal_payment <= Decimal::ZERO {
            return Err(LoanClosureError::NonAmortizing {
                month,
                interest: round_money(interest),
                payment: round_money(principal_payment),
            });
        }

        if principal_payment > balance {
            principal_payment = balance;
        }

        balance -= principal_payment;
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| overflow("total interest", month))?;

        schedule.push(ScheduleEntry {
            month,
            remaining_balance: round_money(balance),
        });
    }

    Ok(ScheduleResult {
        total_months: month,
        total_interest_paid: round_money(total_interest),
        schedule,
    })
}

fn overflow(what: &str, month: u32) -> LoanClosureError {
    LoanClosureError::Overflow {
        context: format!("{what} in month {month}"),
    }
}

/// Run [`simulate`] and wrap the result in the standard envelope.
pub fn analyze_schedule(
    input: &ScheduleInput,
) -> LoanClosureResult<ComputationOutput<ScheduleResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let plan = input.plan();
    let result = simulate(input.principal, input.annual_rate_pct, &plan)?;

    if plan.lump_sum > Decimal::ZERO {
        if plan.lump_sum_month == 0 {
            warnings.push(format!(
                "Lump sum of {} ignored: lump_sum_month is 0",
                plan.lump_sum
            ));
        } else if plan.lump_sum_month > result.total_months {
            warnings.push(format!(
                "Lump sum month {} falls after payoff in month {}; lump sum never applied",
                plan.lump_sum_month, result.total_months
            ));
        }
    }

    with_metadata(
        "Monthly amortization with extra payments and lump sum",
        input,
        warnings,
        start,
        result,
    )
}

fn validate_simulation(
    principal: Money,
    annual_rate_pct: Rate,
    plan: &PaymentPlan,
) -> LoanClosureResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if plan.monthly_payment < Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment cannot be negative".into(),
        });
    }
    if plan.extra_monthly < Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "extra_monthly".into(),
            reason: "Extra monthly payment cannot be negative".into(),
        });
    }
    if plan.lump_sum < Decimal::ZERO {
        return Err(LoanClosureError::InvalidInput {
            field: "lump_sum".into(),
            reason: "Lump sum cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
