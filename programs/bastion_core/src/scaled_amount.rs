// programs/bastion_core/src/scaled_amount.rs
//
// Scaled Amount
// =============
// A quantity stored as principal plus the scale it was last synchronised at.
// Nothing ticks in the background: every read projects the scale from
// `last_update` to "now", and every write persists that projection before
// applying its own delta.

use anchor_lang::prelude::*;

use crate::scale::{Scale, MIN_SCALE};
use crate::scr::Scr;
use crate::wad::{self, WAD};
use crate::LedgerError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct ScaledAmount {
    /// Scale-independent units
    pub principal: u128,
    /// Scale as of `last_update`
    pub scale: Scale,
    /// Unix timestamp of the last synchronisation
    pub last_update: i64,
}

impl ScaledAmount {
    pub fn new(now: i64) -> Self {
        Self {
            principal: 0,
            scale: Scale::ONE,
            last_update: now,
        }
    }

    /// Scale as it stands at `now` under `rate`. Pure.
    pub fn projected_scale(&self, rate: u128, now: i64) -> Result<Scale> {
        if self.principal == 0 {
            return Ok(Scale::ONE);
        }
        let elapsed = wad::elapsed_seconds(self.last_update, now);
        self.scale.project(rate, elapsed)
    }

    /// Current value, rounded down (what a holder owns)
    pub fn current(&self, rate: u128, now: i64) -> Result<u128> {
        self.projected_scale(rate, now)?
            .to_current_floor(self.principal)
    }

    /// Current value, rounded up (what a debtor owes)
    pub fn debt(&self, rate: u128, now: i64) -> Result<u128> {
        self.projected_scale(rate, now)?
            .to_current_ceil(self.principal)
    }

    /// Persist the projection to `now` without changing principal
    pub fn sync(&mut self, rate: u128, now: i64) -> Result<Scale> {
        let scale = self.projected_scale(rate, now)?;
        self.scale = scale;
        self.last_update = self.last_update.max(now);
        Ok(scale)
    }

    /// Credit `amount` current units. Returns the principal minted (rounded down).
    pub fn add(&mut self, amount: u128, rate: u128, now: i64) -> Result<u128> {
        let scale = self.projected_scale(rate, now)?;
        let delta = scale.to_scaled_floor(amount)?;
        let principal = wad::checked_add(self.principal, delta)?;

        self.scale = scale;
        self.last_update = self.last_update.max(now);
        self.principal = principal;
        Ok(delta)
    }

    /// Debit `amount` current units. Returns the principal burned (rounded up,
    /// see `Scale::debit_principal` for the one-unit boundary).
    pub fn subtract(&mut self, amount: u128, rate: u128, now: i64) -> Result<u128> {
        let scale = self.projected_scale(rate, now)?;
        let delta = scale.debit_principal(amount, self.principal)?;

        self.scale = scale;
        self.last_update = self.last_update.max(now);
        self.remove_principal(delta)?;
        Ok(delta)
    }

    /// Burn principal; an emptied amount starts over at scale 1.0
    pub fn remove_principal(&mut self, delta: u128) -> Result<()> {
        self.principal = self
            .principal
            .checked_sub(delta)
            .ok_or_else(|| error!(LedgerError::InsufficientPrincipal))?;
        if self.principal == 0 {
            self.scale = Scale::ONE;
        }
        Ok(())
    }

    /// Distribute a signed gain/loss pro-rata to every holder by moving the
    /// scale. Reservation earnings accrued since the last update are folded
    /// in first. Leaves `self` untouched on error.
    pub fn discrete_change(&mut self, amount: i128, scr: &Scr, now: i64) -> Result<()> {
        let earnings = scr.earnings_since(self.last_update, now)?;
        let earnings =
            i128::try_from(earnings).map_err(|_| error!(LedgerError::MathOverflow))?;
        let total = amount
            .checked_add(earnings)
            .ok_or_else(|| error!(LedgerError::MathOverflow))?;

        let scale = self.scale.grow_by_amount(total, self.principal)?;
        self.scale = scale;
        self.last_update = self.last_update.max(now);
        Ok(())
    }

    /// Smallest representable value of the current principal: the value it
    /// would have at `MIN_SCALE`
    pub fn min_value(&self) -> Result<u128> {
        wad::mul_div_ceil(self.principal, MIN_SCALE, WAD)
    }

    /// Largest loss `discrete_change` accepts at `now` without hitting the floor
    pub fn max_negative_adjustment(&self, scr: &Scr, now: i64) -> Result<u128> {
        let stored = self.scale.to_current_floor(self.principal)?;
        let earnings = scr.earnings_since(self.last_update, now)?;
        Ok(wad::checked_add(stored, earnings)?.saturating_sub(self.min_value()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wad::SECONDS_PER_YEAR;

    const T0: i64 = 1_700_000_000;
    const YEAR: i64 = SECONDS_PER_YEAR as i64;
    const FIVE_PCT: u128 = WAD / 20;

    #[test]
    fn test_new_is_empty_at_one() {
        let amount = ScaledAmount::new(T0);
        assert_eq!(amount.principal, 0);
        assert_eq!(amount.scale, Scale::ONE);
        assert_eq!(amount.last_update, T0);
        assert_eq!(amount.current(FIVE_PCT, T0 + YEAR).unwrap(), 0);
    }

    #[test]
    fn test_projected_scale_is_pure() {
        let mut amount = ScaledAmount::new(T0);
        amount.add(1_000, FIVE_PCT, T0).unwrap();
        let before = amount;

        let a = amount.projected_scale(FIVE_PCT, T0 + YEAR).unwrap();
        let b = amount.projected_scale(FIVE_PCT, T0 + YEAR).unwrap();
        assert_eq!(a, b);
        assert_eq!(amount, before);
        assert_eq!(a.wad(), WAD + FIVE_PCT);
    }

    #[test]
    fn test_projected_scale_ignores_past_now() {
        let mut amount = ScaledAmount::new(T0);
        amount.add(1_000, FIVE_PCT, T0).unwrap();
        assert_eq!(amount.projected_scale(FIVE_PCT, T0 - 100).unwrap(), Scale::ONE);
    }

    #[test]
    fn test_round_trip_zero_elapsed() {
        let mut amount = ScaledAmount::new(T0);
        let minted = amount.add(1_000_000, 0, T0).unwrap();
        assert_eq!(minted, 1_000_000);
        let burned = amount.subtract(1_000_000, 0, T0).unwrap();
        assert_eq!(burned, minted);
        assert_eq!(amount.principal, 0);
        assert_eq!(amount.scale, Scale::ONE);
    }

    #[test]
    fn test_add_rounds_principal_down() {
        let mut amount = ScaledAmount::new(T0);
        amount.add(1_000, 0, T0).unwrap();
        // push the scale to 3.0
        amount.discrete_change(2_000, &Scr::default(), T0).unwrap();
        let minted = amount.add(10, 0, T0).unwrap();
        assert_eq!(minted, 3);
    }

    #[test]
    fn test_subtract_rounds_principal_up() {
        let mut amount = ScaledAmount::new(T0);
        amount.add(1_000, 0, T0).unwrap();
        amount.discrete_change(2_000, &Scr::default(), T0).unwrap();
        let burned = amount.subtract(10, 0, T0).unwrap();
        assert_eq!(burned, 4);
        assert_eq!(amount.principal, 996);
    }

    #[test]
    fn test_subtract_more_than_held_fails() {
        let mut amount = ScaledAmount::new(T0);
        amount.add(100, 0, T0).unwrap();
        let before = amount;
        assert_eq!(
            amount.subtract(102, 0, T0).unwrap_err(),
            LedgerError::InsufficientPrincipal.into()
        );
        assert_eq!(amount, before);
    }

    #[test]
    fn test_loan_repaid_at_ceil_debt_resets_scale() {
        let mut loan = ScaledAmount::new(T0);
        loan.add(50_000_000, FIVE_PCT, T0).unwrap();

        let owed = loan.debt(FIVE_PCT, T0 + YEAR).unwrap();
        assert_eq!(owed, 52_500_000);

        loan.subtract(owed, FIVE_PCT, T0 + YEAR).unwrap();
        assert_eq!(loan.principal, 0);
        assert_eq!(loan.scale, Scale::ONE);
    }

    #[test]
    fn test_subtract_floor_fallback_pays_off_exactly() {
        // 50 principal at 1.05: debt() reports ceil(52.5) = 53 and
        // ceil(53 / 1.05) = 51 overshoots by one
        let mut loan = ScaledAmount::new(T0);
        loan.add(50, FIVE_PCT, T0).unwrap();
        let owed = loan.debt(FIVE_PCT, T0 + YEAR).unwrap();
        assert_eq!(owed, 53);

        let burned = loan.subtract(owed, FIVE_PCT, T0 + YEAR).unwrap();
        assert_eq!(burned, 50);
        assert_eq!(loan.principal, 0);
        assert_eq!(loan.scale, Scale::ONE);
    }

    #[test]
    fn test_discrete_change_folds_in_scr_earnings() {
        let mut supply = ScaledAmount::new(T0);
        supply.add(1_000_000_000, 0, T0).unwrap();
        let scr = Scr { locked: 400_000_000, interest_rate: WAD / 10 };

        supply.discrete_change(0, &scr, T0 + YEAR).unwrap();
        assert_eq!(supply.scale.wad(), 1_040_000_000_000_000_000);
        assert_eq!(supply.last_update, T0 + YEAR);
        assert_eq!(supply.current(0, T0 + YEAR).unwrap(), 1_040_000_000);
    }

    #[test]
    fn test_discrete_change_below_floor_is_atomic() {
        let mut supply = ScaledAmount::new(T0);
        supply.add(1_000, 0, T0).unwrap();
        let before = supply;

        assert_eq!(
            supply.discrete_change(-1_000, &Scr::default(), T0 + 10).unwrap_err(),
            LedgerError::ScaleTooSmall.into()
        );
        assert_eq!(supply, before);
    }

    #[test]
    fn test_min_value_and_max_negative_adjustment() {
        let mut supply = ScaledAmount::new(T0);
        supply.add(1_000_000_000_000, 0, T0).unwrap();

        // 1e12 * 1e-10 = 100
        assert_eq!(supply.min_value().unwrap(), 100);
        let max_loss = supply.max_negative_adjustment(&Scr::default(), T0).unwrap();
        assert_eq!(max_loss, 1_000_000_000_000 - 100);

        let loss = i128::try_from(max_loss).unwrap();
        supply.discrete_change(-loss, &Scr::default(), T0).unwrap();
        assert!(supply.scale.wad() >= MIN_SCALE);

        assert!(supply.discrete_change(-1, &Scr::default(), T0).is_err());
    }

    #[test]
    fn test_min_value_rounds_up() {
        let mut supply = ScaledAmount::new(T0);
        supply.add(1, 0, T0).unwrap();
        assert_eq!(supply.min_value().unwrap(), 1);
    }

    #[test]
    fn test_last_update_never_moves_back() {
        let mut amount = ScaledAmount::new(T0);
        amount.add(10, 0, T0).unwrap();
        amount.sync(0, T0 - 50).unwrap();
        assert_eq!(amount.last_update, T0);
    }
}
