//! Property tests for the scaled-balance math.
//!
//! These use proptest to generate random inputs and verify the rounding and
//! floor invariants hold.

use bastion_core::{Scale, ScaledAmount, Scr, LedgerError, MIN_SCALE, SECONDS_PER_YEAR, WAD};
use proptest::prelude::*;

const T0: i64 = 1_700_000_000;

// Amounts up to 10^15 base units (a billion dollars at 6 decimals)
fn amount_strategy() -> impl Strategy<Value = u128> {
    1u128..1_000_000_000_000_000
}

// Scales from the floor up to 100x
fn scale_strategy() -> impl Strategy<Value = u128> {
    MIN_SCALE..100 * WAD
}

// Annual rates up to 100%
fn rate_strategy() -> impl Strategy<Value = u128> {
    0u128..WAD
}

proptest! {
    #[test]
    fn prop_round_trip_at_zero_elapsed(amount in amount_strategy(), rate in rate_strategy()) {
        let mut ledger = ScaledAmount::new(T0);
        let minted = ledger.add(amount, rate, T0).unwrap();
        prop_assert_eq!(minted, amount);
        prop_assert_eq!(ledger.current(rate, T0).unwrap(), amount);

        let burned = ledger.subtract(amount, rate, T0).unwrap();
        prop_assert_eq!(burned, minted);
        prop_assert_eq!(ledger.principal, 0);
        prop_assert_eq!(ledger.scale, Scale::ONE);
    }
}

proptest! {
    #[test]
    fn prop_credit_never_overpays(amount in amount_strategy(), scale in scale_strategy()) {
        let s = Scale::from_wad(scale).unwrap();
        let principal = s.to_scaled_floor(amount).unwrap();
        prop_assert!(s.to_current_floor(principal).unwrap() <= amount);
    }
}

proptest! {
    #[test]
    fn prop_debit_never_underpays(amount in amount_strategy(), scale in scale_strategy()) {
        let s = Scale::from_wad(scale).unwrap();
        let principal = s.to_scaled_ceil(amount).unwrap();
        prop_assert!(s.to_current_ceil(principal).unwrap() >= amount);
    }
}

proptest! {
    /// A debt reported with ceil rounding can always be repaid in full. This
    /// is the case the one-unit floor fallback in `debit_principal` exists for;
    /// loan scales only grow, so scales start at 1.0 here.
    #[test]
    fn prop_ceil_debt_is_exactly_repayable(
        principal in amount_strategy(),
        scale in WAD..100 * WAD,
    ) {
        let s = Scale::from_wad(scale).unwrap();
        let owed = s.to_current_ceil(principal).unwrap();
        let ceil = s.to_scaled_ceil(owed).unwrap();
        prop_assert!(ceil == principal || ceil == principal + 1);
        prop_assert_eq!(s.debit_principal(owed, principal).unwrap(), principal);
    }
}

proptest! {
    #[test]
    fn prop_balance_debit_never_hits_fallback(
        principal in amount_strategy(),
        scale in scale_strategy(),
    ) {
        let s = Scale::from_wad(scale).unwrap();
        let balance = s.to_current_floor(principal).unwrap();
        prop_assert!(s.to_scaled_ceil(balance).unwrap() <= principal);
    }
}

proptest! {
    #[test]
    fn prop_scale_floor_holds(
        principal in amount_strategy(),
        loss in amount_strategy(),
    ) {
        let mut ledger = ScaledAmount::new(T0);
        ledger.add(principal, 0, T0).unwrap();
        let before = ledger;

        let max_loss = ledger.max_negative_adjustment(&Scr::default(), T0).unwrap();
        let result = ledger.discrete_change(-(loss as i128), &Scr::default(), T0);
        if loss <= max_loss {
            prop_assert!(result.is_ok());
            prop_assert!(ledger.scale.wad() >= MIN_SCALE);
        } else {
            prop_assert_eq!(result.unwrap_err(), LedgerError::ScaleTooSmall.into());
            prop_assert_eq!(ledger, before);
        }
    }
}

proptest! {
    #[test]
    fn prop_blend_and_unblend(
        a in amount_strategy(),
        b in amount_strategy(),
        r1 in rate_strategy(),
        r2 in rate_strategy(),
    ) {
        let mut scr = Scr::default();
        scr.lock(a, r1).unwrap();
        scr.lock(b, r2).unwrap();

        let exact = (a * r1 + b * r2) / (a + b);
        prop_assert!(scr.interest_rate <= exact);
        prop_assert!(exact - scr.interest_rate <= 1);

        scr.unlock(a, r1).unwrap();
        prop_assert_eq!(scr.locked, b);
        // Floor division on blend and un-blend: off by at most (a + b) / b + 1
        let tolerance = (a + b) / b + 1;
        prop_assert!(scr.interest_rate.abs_diff(r2) <= tolerance);
    }
}

proptest! {
    #[test]
    fn prop_projection_matches_scr_earnings(
        supply in 1_000_000u128..1_000_000_000_000_000,
        locked_bps in 1u128..10_000,
        rate in rate_strategy(),
        elapsed in 1i64..(SECONDS_PER_YEAR as i64),
    ) {
        // Pool rate derived from the reservation earns (within rounding) what
        // the reservation itself reports
        let locked = supply * locked_bps / 10_000;
        let scr = Scr { locked, interest_rate: rate };
        let pool_rate = rate * locked / supply;

        let mut by_earnings = ScaledAmount::new(T0);
        by_earnings.add(supply, 0, T0).unwrap();
        let by_projection = by_earnings;

        by_earnings.discrete_change(0, &scr, T0 + elapsed).unwrap();
        let a = by_earnings.current(0, T0 + elapsed).unwrap();
        let b = by_projection.current(pool_rate, T0 + elapsed).unwrap();
        prop_assert!(a.abs_diff(b) <= 2);
    }
}
