// programs/bastion_core/src/lib.rs
//
// Bastion Core - Scaled-Balance Ledger Math
// =========================================
//
// This crate provides:
// - WAD (1e18) fixed-point helpers with explicit rounding
// - `Scale`: the accrual index turning principal into current value
// - `ScaledAmount`: lazily projected (principal, scale, last_update) records
// - `Scr`: locked solvency capital and its blended interest rate
//
// It holds no accounts of its own. `bastion_pool` embeds these types in its
// on-chain state and drives them with `Clock::unix_timestamp`.

use anchor_lang::prelude::*;

pub mod scale;
pub mod scaled_amount;
pub mod scr;
pub mod wad;

pub use scale::{Scale, MIN_SCALE};
pub use scaled_amount::ScaledAmount;
pub use scr::Scr;
pub use wad::{SECONDS_PER_YEAR, WAD};

// Offset keeps these codes clear of the programs' own 6000+ ranges
#[error_code(offset = 9000)]
pub enum LedgerError {
    #[msg("Arithmetic overflow or invalid conversion")]
    MathOverflow,

    #[msg("Scale would fall below its minimum")]
    ScaleTooSmall,

    #[msg("Amount exceeds the principal held")]
    InsufficientPrincipal,

    #[msg("Unlock amount exceeds locked SCR")]
    UnlockExceedsLocked,

    #[msg("Cannot distribute a change over zero principal")]
    NothingToAdjust,
}
