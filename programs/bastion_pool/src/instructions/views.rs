// programs/bastion_pool/src/instructions/views.rs

use anchor_lang::prelude::*;
use crate::state::{LpPosition, PoolLedger};

/// Ledger figures projected to the current slot
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolStatus {
    pub total_supply: u64,
    pub scale: u128,
    pub scr_amount: u64,
    pub scr_interest_rate: u128,
    pub token_interest_rate: u128,
    pub utilization_rate: u128,
    pub funds_available: u64,
    pub funds_available_to_lock: u64,
    pub total_withdrawable: u64,
    pub max_negative_adjustment: u64,
    pub total_defaulted_debt: u64,
}

impl PoolStatus {
    pub fn of(pool: &PoolLedger, now: i64) -> Result<Self> {
        Ok(Self {
            total_supply: pool.total_supply(now)?,
            scale: pool.current_scale(now)?.wad(),
            scr_amount: pool.scr_amount()?,
            scr_interest_rate: pool.scr.interest_rate,
            token_interest_rate: pool.token_interest_rate,
            utilization_rate: pool.utilization_rate(now)?,
            funds_available: pool.funds_available(now)?,
            funds_available_to_lock: pool.funds_available_to_lock(now)?,
            total_withdrawable: pool.total_withdrawable(now)?,
            max_negative_adjustment: pool.max_negative_adjustment(now)?,
            total_defaulted_debt: pool.total_defaulted_debt,
        })
    }
}

#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [
            PoolLedger::SEED_PREFIX,
            pool_ledger.currency_mint.as_ref(),
            &pool_ledger.pool_id.to_le_bytes()
        ],
        bump = pool_ledger.bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,
}

pub fn pool_status(ctx: Context<PoolView>) -> Result<PoolStatus> {
    let clock = Clock::get()?;
    PoolStatus::of(&ctx.accounts.pool_ledger, clock.unix_timestamp)
}

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct LpBalanceView<'info> {
    #[account(
        seeds = [
            PoolLedger::SEED_PREFIX,
            pool_ledger.currency_mint.as_ref(),
            &pool_ledger.pool_id.to_le_bytes()
        ],
        bump = pool_ledger.bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    #[account(
        seeds = [LpPosition::SEED_PREFIX, pool_ledger.key().as_ref(), owner.as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, LpPosition>,
}

pub fn lp_balance(ctx: Context<LpBalanceView>, _owner: Pubkey) -> Result<u64> {
    let clock = Clock::get()?;
    ctx.accounts
        .pool_ledger
        .balance_of(ctx.accounts.position.principal, clock.unix_timestamp)
}
