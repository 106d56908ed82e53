// programs/bastion_core/src/scale.rs
//
// Fixed-Point Scale
// =================
// The multiplier turning stored principal into current value. It only ever
// moves through two doors:
// - `project`: time-based simple interest since the last touch
// - `grow_by_amount`: an instantaneous gain or loss spread over principal
//
// Conversions between principal and current units are split into explicitly
// named floor/ceil functions so a call site always states which way it rounds.

use anchor_lang::prelude::*;

use crate::wad::{self, SECONDS_PER_YEAR, WAD};
use crate::LedgerError;

/// Lowest scale a ledger may reach (1e-10 of base). Below it, principal and
/// current-unit conversions lose too many digits to stay trustworthy.
pub const MIN_SCALE: u128 = WAD / 10_000_000_000;

/// Current value per unit of principal, in WAD
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scale(u128);

impl anchor_lang::Space for Scale {
    const INIT_SPACE: usize = 16;
}

impl Default for Scale {
    fn default() -> Self {
        Scale::ONE
    }
}

impl Scale {
    pub const ONE: Scale = Scale(WAD);

    pub fn from_wad(value: u128) -> Result<Scale> {
        require!(value >= MIN_SCALE, LedgerError::ScaleTooSmall);
        Ok(Scale(value))
    }

    pub fn wad(self) -> u128 {
        self.0
    }

    /// scale * (1 + rate * elapsed / year), linear within the window.
    /// Compounding comes from re-projecting on every touch.
    pub fn project(self, rate: u128, elapsed: u128) -> Result<Scale> {
        if rate == 0 || elapsed == 0 {
            return Ok(self);
        }
        let per_year = wad::wad_mul(self.0, rate)?;
        let growth = wad::mul_div_floor(per_year, elapsed, SECONDS_PER_YEAR)?;
        Ok(Scale(wad::checked_add(self.0, growth)?))
    }

    /// Spread `delta` current units over `principal` by shifting the scale.
    /// Gains round down and losses round up, so holders never profit from
    /// rounding.
    pub fn grow_by_amount(self, delta: i128, principal: u128) -> Result<Scale> {
        if delta == 0 {
            return Ok(self);
        }
        require!(principal > 0, LedgerError::NothingToAdjust);

        let magnitude = delta.unsigned_abs();
        let next = if delta > 0 {
            let increment = wad::mul_div_floor(magnitude, WAD, principal)?;
            wad::checked_add(self.0, increment)?
        } else {
            let decrement = wad::mul_div_ceil(magnitude, WAD, principal)?;
            self.0
                .checked_sub(decrement)
                .ok_or_else(|| error!(LedgerError::ScaleTooSmall))?
        };

        Scale::from_wad(next)
    }

    /// Current units -> principal, rounded down (used when crediting)
    pub fn to_scaled_floor(self, amount: u128) -> Result<u128> {
        wad::mul_div_floor(amount, WAD, self.0)
    }

    /// Current units -> principal, rounded up (used when debiting)
    pub fn to_scaled_ceil(self, amount: u128) -> Result<u128> {
        wad::mul_div_ceil(amount, WAD, self.0)
    }

    /// Principal -> current units, rounded down (balances held)
    pub fn to_current_floor(self, principal: u128) -> Result<u128> {
        wad::mul_div_floor(principal, self.0, WAD)
    }

    /// Principal -> current units, rounded up (debts owed)
    pub fn to_current_ceil(self, principal: u128) -> Result<u128> {
        wad::mul_div_ceil(principal, self.0, WAD)
    }

    /// Principal to debit for removing `amount` current units from a holder of
    /// `available` principal. Rounds up, except when rounding up overshoots the
    /// holder by exactly one unit: that only happens when `amount` itself was
    /// rounded up (a ceil-reported debt), so the floor conversion is the exact
    /// payoff.
    pub fn debit_principal(self, amount: u128, available: u128) -> Result<u128> {
        let ceil = self.to_scaled_ceil(amount)?;
        if ceil <= available {
            return Ok(ceil);
        }
        if ceil == wad::checked_add(available, 1)? {
            let floor = self.to_scaled_floor(amount)?;
            if floor <= available {
                return Ok(floor);
            }
        }
        err!(LedgerError::InsufficientPrincipal)
    }
}
