use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanClosureError;
use crate::types::{Money, Rate};
use crate::LoanClosureResult;

pub const MONTHS_PER_YEAR: u32 = 12;

const PERCENT: Decimal = dec!(100);
const MONEY_DP: u32 = 2;

/// Monthly periodic rate from an annual rate quoted in percent.
///
/// `monthly_rate(8.5)` is `8.5 / 1200 ≈ 0.0070833`.
pub fn monthly_rate(annual_rate_pct: Rate) -> Rate {
    annual_rate_pct / (Decimal::from(MONTHS_PER_YEAR) * PERCENT)
}

/// Compound growth factor `(1 + rate)^nper`.
pub fn growth_factor(rate: Rate, nper: u32) -> LoanClosureResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| LoanClosureError::Overflow {
            context: format!("growth factor (1 + {rate})^{nper}"),
        })
}

/// Level payment that fully amortises `principal` over `nper` periods.
///
/// Uses `P * r * (1+r)^n / ((1+r)^n - 1)`, falling back to straight-line
/// `P / n` when the periodic rate is zero.
pub fn level_payment(rate: Rate, nper: u32, principal: Money) -> LoanClosureResult<Money> {
    if nper == 0 {
        return Err(LoanClosureError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = growth_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;

    // Rate too small to register in 28 significant digits.
    if denominator.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let numerator = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or_else(|| LoanClosureError::Overflow {
            context: "level payment numerator".into(),
        })?;

    Ok(numerator / denominator)
}

/// Round a monetary amount to 2 decimal places.
pub fn round_money(amount: Money) -> Money {
    amount.round_dp(MONEY_DP)
}
