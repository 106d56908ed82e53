// programs/bastion_core/src/scr.rs
//
// Capital Reservation (SCR)
// =========================
// Collateral locked against issued policies and the blended annual rate the
// pool earns on it. Two states: empty (0, 0) and locked (locked > 0).

use anchor_lang::prelude::*;

use crate::wad::{self, SECONDS_PER_YEAR};
use crate::LedgerError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct Scr {
    /// Locked collateral, current units
    pub locked: u128,
    /// Weighted-average annual rate on `locked` (WAD)
    pub interest_rate: u128,
}

impl Scr {
    pub fn is_empty(&self) -> bool {
        self.locked == 0
    }

    /// Add `amount` at `rate`, blending the rate by locked amount
    pub fn lock(&mut self, amount: u128, rate: u128) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        if self.is_empty() {
            self.locked = amount;
            self.interest_rate = rate;
            return Ok(());
        }

        let new_locked = wad::checked_add(self.locked, amount)?;
        let weighted = wad::checked_add(
            wad::checked_mul(self.interest_rate, self.locked)?,
            wad::checked_mul(rate, amount)?,
        )?;
        self.interest_rate = weighted / new_locked;
        self.locked = new_locked;
        Ok(())
    }

    /// Remove `amount` that was locked at `rate`, un-blending the rate
    pub fn unlock(&mut self, amount: u128, rate: u128) -> Result<()> {
        require!(amount <= self.locked, LedgerError::UnlockExceedsLocked);
        if amount == 0 {
            return Ok(());
        }
        if amount == self.locked {
            *self = Scr::default();
            return Ok(());
        }

        let new_locked = self.locked - amount;
        // Rounding in earlier blends can leave the product a hair short.
        let weighted = wad::checked_mul(self.interest_rate, self.locked)?
            .saturating_sub(wad::checked_mul(rate, amount)?);
        self.interest_rate = weighted / new_locked;
        self.locked = new_locked;
        Ok(())
    }

    /// Interest generated by the reservation between `since` and `now`
    pub fn earnings_since(&self, since: i64, now: i64) -> Result<u128> {
        let elapsed = wad::elapsed_seconds(since, now);
        if self.is_empty() || elapsed == 0 {
            return Ok(0);
        }
        let per_year = wad::wad_mul(self.locked, self.interest_rate)?;
        wad::mul_div_floor(per_year, elapsed, SECONDS_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wad::WAD;

    const TEN_PCT: u128 = WAD / 10;
    const TWENTY_PCT: u128 = WAD / 5;

    #[test]
    fn test_lock_from_empty() {
        let mut scr = Scr::default();
        scr.lock(400, TEN_PCT).unwrap();
        assert_eq!(scr, Scr { locked: 400, interest_rate: TEN_PCT });
    }

    #[test]
    fn test_lock_blends_rate() {
        let mut scr = Scr::default();
        scr.lock(100, TEN_PCT).unwrap();
        scr.lock(300, TWENTY_PCT).unwrap();

        // (100 * 10% + 300 * 20%) / 400 = 17.5%
        assert_eq!(scr.locked, 400);
        assert_eq!(scr.interest_rate, 175_000_000_000_000_000);
    }

    #[test]
    fn test_unlock_restores_rate() {
        let mut scr = Scr::default();
        scr.lock(100, TEN_PCT).unwrap();
        scr.lock(300, TWENTY_PCT).unwrap();
        scr.unlock(100, TEN_PCT).unwrap();

        assert_eq!(scr.locked, 300);
        assert_eq!(scr.interest_rate, TWENTY_PCT);
    }

    #[test]
    fn test_unlock_all_empties() {
        let mut scr = Scr::default();
        scr.lock(100, TEN_PCT).unwrap();
        scr.lock(50, TWENTY_PCT).unwrap();
        scr.unlock(150, TEN_PCT).unwrap();
        assert!(scr.is_empty());
        assert_eq!(scr.interest_rate, 0);
    }

    #[test]
    fn test_unlock_more_than_locked_fails() {
        let mut scr = Scr::default();
        scr.lock(100, TEN_PCT).unwrap();
        assert_eq!(
            scr.unlock(101, TEN_PCT).unwrap_err(),
            LedgerError::UnlockExceedsLocked.into()
        );
        assert_eq!(scr.locked, 100);
    }

    #[test]
    fn test_unlock_clamps_rounding_residue() {
        let mut scr = Scr { locked: 3, interest_rate: 1 };
        // 1 * 3 - 2 * 2 would be negative
        scr.unlock(2, 2).unwrap();
        assert_eq!(scr, Scr { locked: 1, interest_rate: 0 });
    }

    #[test]
    fn test_earnings_since() {
        let scr = Scr { locked: 400_000_000, interest_rate: TEN_PCT };
        assert_eq!(scr.earnings_since(0, SECONDS_PER_YEAR as i64).unwrap(), 40_000_000);
        assert_eq!(scr.earnings_since(0, (SECONDS_PER_YEAR / 2) as i64).unwrap(), 20_000_000);
        assert_eq!(scr.earnings_since(100, 100).unwrap(), 0);
        assert_eq!(scr.earnings_since(100, 50).unwrap(), 0);
        assert_eq!(Scr::default().earnings_since(0, 1_000_000).unwrap(), 0);
    }
}
