use loan_closure_core::amortization::{simulate, PaymentPlan};
use loan_closure_core::emi::compute_emi;
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;

// Rates are drawn in basis points of a percent: 850 -> 8.50%.
fn pct(bp: u32) -> Decimal {
    Decimal::new(i64::from(bp), 2)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(48))]

    #[test]
    fn prop_emi_baseline_repays_within_tenure(
        principal in 100_000u32..5_000_000,
        rate_bp in 0u32..2000,
        years in 1u32..31,
    ) {
        let principal = Decimal::from(principal);
        let rate = pct(rate_bp);
        let emi = compute_emi(principal, rate, years).unwrap();
        prop_assert!(emi > Decimal::ZERO);

        let result = simulate(principal, rate, &PaymentPlan::new(emi)).unwrap();
        let tenure = years * 12;
        prop_assert!(result.total_months.abs_diff(tenure) <= 1);
        prop_assert_eq!(result.total_months as usize, result.schedule.len());
        prop_assert_eq!(result.final_balance(), Decimal::ZERO);

        for pair in result.schedule.windows(2) {
            prop_assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
        }
    }

    #[test]
    fn prop_emi_positive_for_small_principals(
        cents in 1i64..100_000,
        rate_bp in 0u32..2000,
        years in 1u32..41,
    ) {
        let emi = compute_emi(Decimal::new(cents, 2), pct(rate_bp), years).unwrap();
        prop_assert!(emi >= Decimal::new(1, 2));
    }

    #[test]
    fn prop_zero_rate_emi_is_straight_line(
        principal in 1_000u32..10_000_000,
        years in 1u32..41,
    ) {
        let principal = Decimal::from(principal);
        let emi = compute_emi(principal, Decimal::ZERO, years).unwrap();
        let expected = (principal / Decimal::from(years * 12)).round_dp(2);
        prop_assert_eq!(emi, expected);
    }

    #[test]
    fn prop_prepayments_never_cost_more(
        principal in 100_000u32..5_000_000,
        rate_bp in 0u32..2000,
        years in 1u32..31,
        extra in 0u32..50_000,
        lump in 0u32..1_000_000,
        lump_month_seed in 0u32..10_000,
    ) {
        let principal = Decimal::from(principal);
        let rate = pct(rate_bp);
        let emi = compute_emi(principal, rate, years).unwrap();
        let lump_month = lump_month_seed % (years * 12) + 1;

        let baseline = simulate(principal, rate, &PaymentPlan::new(emi)).unwrap();
        let plan = PaymentPlan::new(emi)
            .with_extra_monthly(Decimal::from(extra))
            .with_lump_sum(Decimal::from(lump), lump_month);
        let optimized = simulate(principal, rate, &plan).unwrap();

        prop_assert!(optimized.total_months <= baseline.total_months);
        prop_assert!(optimized.total_interest_paid <= baseline.total_interest_paid);
    }

    #[test]
    fn prop_lump_sum_reduces_its_month_balance(
        principal in 100_000u32..5_000_000,
        rate_bp in 0u32..2000,
        years in 1u32..31,
        lump in 1u32..2_000_000,
        lump_month_seed in 0u32..10_000,
    ) {
        let principal = Decimal::from(principal);
        let rate = pct(rate_bp);
        let lump = Decimal::from(lump);
        let emi = compute_emi(principal, rate, years).unwrap();
        let k = lump_month_seed % (years * 12) + 1;

        let baseline = simulate(principal, rate, &PaymentPlan::new(emi)).unwrap();
        let with_lump = simulate(principal, rate, &PaymentPlan::new(emi).with_lump_sum(lump, k))
            .unwrap();

        let before = baseline.balance_at(k).unwrap();
        let after = with_lump.balance_at(k).unwrap();
        prop_assert_eq!(before - after, lump.min(before));
        prop_assert_eq!(baseline.balance_at(k - 1), with_lump.balance_at(k - 1));
    }
}
