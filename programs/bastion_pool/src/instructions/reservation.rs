// programs/bastion_pool/src/instructions/reservation.rs
//
// Solvency Capital Reservation
// ============================
// Authorized borrowers lock pool capital behind the policies they write and
// release it when those policies expire. Locked capital earns its rate for
// every LP through the pool's token interest rate.

use anchor_lang::prelude::*;
use crate::errors::PoolError;
use crate::events::{PoolSnapshot, ScrLocked, ScrUnlocked};
use crate::state::{BorrowerLoan, PoolLedger};

#[derive(Accounts)]
pub struct ManageScr<'info> {
    #[account(
        mut,
        seeds = [
            PoolLedger::SEED_PREFIX,
            pool_ledger.currency_mint.as_ref(),
            &pool_ledger.pool_id.to_le_bytes()
        ],
        bump = pool_ledger.bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    /// Exists only while the borrower is authorized
    #[account(
        seeds = [BorrowerLoan::SEED_PREFIX, pool_ledger.key().as_ref(), borrower.key().as_ref()],
        bump = borrower_loan.bump,
        has_one = borrower @ PoolError::BorrowerMismatch
    )]
    pub borrower_loan: Account<'info, BorrowerLoan>,

    pub borrower: Signer<'info>,
}

pub fn lock_scr(ctx: Context<ManageScr>, amount: u64, interest_rate: u128) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool_ledger;

    pool.lock_scr(amount, interest_rate, clock.unix_timestamp)?;

    emit!(ScrLocked {
        pool: pool.key(),
        borrower: ctx.accounts.borrower.key(),
        amount,
        interest_rate,
        scr_amount: pool.scr_amount()?,
        token_interest_rate: pool.token_interest_rate,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// `adjustment` settles the gap between interest accrued on the reservation
/// and interest actually earned by the policy
pub fn unlock_scr(
    ctx: Context<ManageScr>,
    amount: u64,
    interest_rate: u128,
    adjustment: i64,
) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool_ledger;

    pool.unlock_scr(amount, interest_rate, adjustment, clock.unix_timestamp)?;

    emit!(ScrUnlocked {
        pool: pool.key(),
        borrower: ctx.accounts.borrower.key(),
        amount,
        interest_rate,
        adjustment,
        scr_amount: pool.scr_amount()?,
        token_interest_rate: pool.token_interest_rate,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

// =============================================================================
// EARNINGS SNAPSHOT
// =============================================================================

/// Permissionless: anyone may fold accrued earnings into the scale
#[derive(Accounts)]
pub struct RecordEarnings<'info> {
    #[account(
        mut,
        seeds = [
            PoolLedger::SEED_PREFIX,
            pool_ledger.currency_mint.as_ref(),
            &pool_ledger.pool_id.to_le_bytes()
        ],
        bump = pool_ledger.bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,
}

pub fn record_earnings(ctx: Context<RecordEarnings>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let pool = &mut ctx.accounts.pool_ledger;

    pool.record_earnings(now)?;

    emit!(PoolSnapshot {
        pool: pool.key(),
        total_supply: pool.total_supply(now)?,
        scale: pool.current_scale(now)?.wad(),
        scr_amount: pool.scr_amount()?,
        scr_interest_rate: pool.scr.interest_rate,
        token_interest_rate: pool.token_interest_rate,
        utilization_rate: pool.utilization_rate(now)?,
        timestamp: now,
    });

    Ok(())
}
