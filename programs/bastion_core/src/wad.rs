// programs/bastion_core/src/wad.rs
//
// WAD Fixed-Point Helpers
// =======================
// 18-decimal fixed point on u128. Every operation is checked and names its
// rounding direction; nothing in here rounds implicitly.

use anchor_lang::prelude::*;

use crate::LedgerError;

/// 1.0 in WAD fixed point
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Seconds in a (non-leap) year, the accrual period for annualised rates
pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 60 * 60;

pub fn checked_add(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or_else(|| error!(LedgerError::MathOverflow))
}

pub fn checked_sub(a: u128, b: u128) -> Result<u128> {
    a.checked_sub(b).ok_or_else(|| error!(LedgerError::MathOverflow))
}

pub fn checked_mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b).ok_or_else(|| error!(LedgerError::MathOverflow))
}

/// a * b / c, rounded down
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Result<u128> {
    require!(c != 0, LedgerError::MathOverflow);
    Ok(checked_mul(a, b)? / c)
}

/// a * b / c, rounded up
pub fn mul_div_ceil(a: u128, b: u128, c: u128) -> Result<u128> {
    require!(c != 0, LedgerError::MathOverflow);
    let product = checked_mul(a, b)?;
    let quotient = product / c;
    if product % c == 0 {
        Ok(quotient)
    } else {
        checked_add(quotient, 1)
    }
}

/// a * b in WAD, rounded down
pub fn wad_mul(a: u128, b: u128) -> Result<u128> {
    mul_div_floor(a, b, WAD)
}

/// a / b in WAD, rounded down
pub fn wad_div(a: u128, b: u128) -> Result<u128> {
    mul_div_floor(a, WAD, b)
}

/// Narrow a ledger quantity to the u64 used at instruction boundaries
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(LedgerError::MathOverflow))
}

/// Elapsed seconds between two unix timestamps, zero when time did not advance
pub fn elapsed_seconds(since: i64, now: i64) -> u128 {
    if now > since {
        now.abs_diff(since) as u128
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_rounding() {
        assert_eq!(mul_div_floor(10, 1, 3).unwrap(), 3);
        assert_eq!(mul_div_ceil(10, 1, 3).unwrap(), 4);
        assert_eq!(mul_div_ceil(9, 1, 3).unwrap(), 3);
    }

    #[test]
    fn test_division_by_zero_is_error() {
        assert!(mul_div_floor(1, 1, 0).is_err());
        assert!(mul_div_ceil(1, 1, 0).is_err());
    }

    #[test]
    fn test_overflow_is_error() {
        assert!(checked_mul(u128::MAX, 2).is_err());
        assert!(checked_sub(0, 1).is_err());
        assert!(to_u64(u64::MAX as u128 + 1).is_err());
        assert_eq!(to_u64(u64::MAX as u128).unwrap(), u64::MAX);
    }

    #[test]
    fn test_wad_helpers() {
        // 1.5 * 2.0 = 3.0
        assert_eq!(wad_mul(WAD + WAD / 2, 2 * WAD).unwrap(), 3 * WAD);
        // 1 / 3 truncates
        assert_eq!(wad_div(1, 3).unwrap(), 333_333_333_333_333_333);
    }

    #[test]
    fn test_elapsed_seconds() {
        assert_eq!(elapsed_seconds(100, 160), 60);
        assert_eq!(elapsed_seconds(160, 100), 0);
        assert_eq!(elapsed_seconds(-10, 10), 20);
    }
}
