use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use loan_closure_core::amortization::{self, ScheduleInput};
use loan_closure_core::emi::{self, LoanTerms};
use loan_closure_core::optimizer::{self, ClosureInput};
use loan_closure_core::ComputationOutput;

use crate::input;

/// Lump sum month used when a lump sum is given without one.
const DEFAULT_LUMP_SUM_MONTH: u32 = 12;

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5 for 8.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for amortization schedule simulation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5 for 8.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Regular monthly payment (normally the EMI)
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Extra principal paid every month
    #[arg(long, default_value = "0")]
    pub extra_monthly: Decimal,

    /// One-time lump sum payment
    #[arg(long, default_value = "0")]
    pub lump_sum: Decimal,

    /// Month (1-indexed) in which the lump sum is paid
    #[arg(long, default_value = "0")]
    pub lump_sum_month: u32,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for loan closure optimisation
#[derive(Args)]
pub struct OptimizeArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5 for 8.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Extra principal paid every month
    #[arg(long, default_value = "0")]
    pub extra_monthly: Decimal,

    /// One-time lump sum payment
    #[arg(long, default_value = "0")]
    pub lump_sum: Decimal,

    /// Month (1-indexed) in which the lump sum is paid [default: 12 when a lump sum is given]
    #[arg(long)]
    pub lump_sum_month: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = match input::load::<LoanTerms>(args.input.as_deref())? {
        Some(terms) => terms,
        None => LoanTerms::new(
            args.principal
                .ok_or("--principal is required (or provide --input)")?,
            args.rate.ok_or("--rate is required (or provide --input)")?,
            args.years.ok_or("--years is required (or provide --input)")?,
        ),
    };
    debug!(?terms, "computing EMI");

    let result = emi::analyze_emi(&terms)?;
    to_value_logged(&result)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input = match input::load::<ScheduleInput>(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            monthly_payment: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            extra_monthly: args.extra_monthly,
            lump_sum: args.lump_sum,
            lump_sum_month: args.lump_sum_month,
        },
    };
    debug!(?schedule_input, "simulating amortization schedule");

    let result = amortization::analyze_schedule(&schedule_input)?;
    debug!(total_months = result.result.total_months, "schedule simulated");
    to_value_logged(&result)
}

pub fn run_optimize(args: OptimizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let closure_input = match input::load::<ClosureInput>(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => closure_from_flags(&args)?,
    };
    debug!(?closure_input, "comparing baseline and prepayment schedules");

    let result = optimizer::compare_closure(&closure_input)?;
    debug!(
        months_saved = result.result.months_saved,
        interest_saved = %result.result.interest_saved,
        "closure comparison complete"
    );
    to_value_logged(&result)
}

/// Build the optimiser input from individual flags.
fn closure_from_flags(args: &OptimizeArgs) -> Result<ClosureInput, Box<dyn std::error::Error>> {
    let lump_sum_month = match args.lump_sum_month {
        Some(month) => month,
        None if args.lump_sum > Decimal::ZERO => DEFAULT_LUMP_SUM_MONTH,
        None => 0,
    };
    Ok(ClosureInput {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
        tenure_years: args.years.ok_or("--years is required (or provide --input)")?,
        extra_monthly: args.extra_monthly,
        lump_sum: args.lump_sum,
        lump_sum_month,
    })
}

/// Surface core warnings on the log before serialising the envelope.
fn to_value_logged<T: Serialize>(
    output: &ComputationOutput<T>,
) -> Result<Value, Box<dyn std::error::Error>> {
    for w in &output.warnings {
        warn!("{}", w);
    }
    debug!(
        computation_time_us = output.metadata.computation_time_us,
        methodology = %output.methodology,
        "computation finished"
    );
    Ok(serde_json::to_value(output)?)
}
