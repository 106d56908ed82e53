// programs/bastion_pool/src/instructions/initialize.rs
//
// Pool Setup and Administration
// =============================
// Creates a pool ledger for a currency mint and lets the authority tune its
// parameters and whitelist afterwards.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint as MintInterface;
use bastion_core::ScaledAmount;
use bastion_core::Scr;
use crate::errors::PoolError;
use crate::events::{PoolInitialized, PoolParamUpdated, WhitelistChanged};
use crate::state::{PoolLedger, PoolParam};

// =============================================================================
// INITIALIZE POOL
// =============================================================================

#[derive(Accounts)]
#[instruction(params: InitializePoolParams)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + PoolLedger::INIT_SPACE,
        seeds = [
            PoolLedger::SEED_PREFIX,
            currency_mint.key().as_ref(),
            &params.pool_id.to_le_bytes()
        ],
        bump
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    /// Reference currency (SPL Token or Token-2022)
    pub currency_mint: InterfaceAccount<'info, MintInterface>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializePoolParams {
    pub pool_id: u64,
    pub orchestrator: Pubkey,
    pub whitelist: Option<Pubkey>,
    pub liquidity_requirement: Option<u128>,
    pub max_utilization_rate: Option<u128>,
    pub min_utilization_rate: Option<u128>,
    pub internal_loan_interest_rate: Option<u128>,
}

pub fn handler(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
    let clock = Clock::get()?;

    let liquidity_requirement = params
        .liquidity_requirement
        .unwrap_or(PoolLedger::DEFAULT_LIQUIDITY_REQUIREMENT);
    let max_utilization_rate = params
        .max_utilization_rate
        .unwrap_or(PoolLedger::DEFAULT_MAX_UTILIZATION_RATE);
    let min_utilization_rate = params
        .min_utilization_rate
        .unwrap_or(PoolLedger::DEFAULT_MIN_UTILIZATION_RATE);
    let internal_loan_interest_rate = params
        .internal_loan_interest_rate
        .unwrap_or(PoolLedger::DEFAULT_INTERNAL_LOAN_INTEREST_RATE);

    PoolParam::LiquidityRequirement.validate(liquidity_requirement)?;
    PoolParam::MaxUtilizationRate.validate(max_utilization_rate)?;
    PoolParam::MinUtilizationRate.validate(min_utilization_rate)?;
    PoolParam::InternalLoanInterestRate.validate(internal_loan_interest_rate)?;

    let pool = &mut ctx.accounts.pool_ledger;
    pool.authority = ctx.accounts.authority.key();
    pool.orchestrator = params.orchestrator;
    pool.currency_mint = ctx.accounts.currency_mint.key();
    pool.currency_decimals = ctx.accounts.currency_mint.decimals;
    pool.pool_id = params.pool_id;
    pool.whitelist = params.whitelist.unwrap_or_default();
    pool.supply = ScaledAmount::new(clock.unix_timestamp);
    pool.scr = Scr::default();
    pool.token_interest_rate = 0;
    pool.internal_loan_interest_rate = internal_loan_interest_rate;
    pool.liquidity_requirement = liquidity_requirement;
    pool.max_utilization_rate = max_utilization_rate;
    pool.min_utilization_rate = min_utilization_rate;
    pool.borrower_count = 0;
    pool.total_defaulted_debt = 0;
    pool.bump = ctx.bumps.pool_ledger;

    emit!(PoolInitialized {
        pool: pool.key(),
        authority: pool.authority,
        orchestrator: pool.orchestrator,
        currency_mint: pool.currency_mint,
        currency_decimals: pool.currency_decimals,
        pool_id: pool.pool_id,
        whitelist: pool.whitelist,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Pool {} initialized for mint {}",
        pool.pool_id,
        pool.currency_mint
    );

    Ok(())
}

// =============================================================================
// ADMINISTRATION
// =============================================================================

#[derive(Accounts)]
pub struct UpdatePool<'info> {
    #[account(
        mut,
        seeds = [
            PoolLedger::SEED_PREFIX,
            pool_ledger.currency_mint.as_ref(),
            &pool_ledger.pool_id.to_le_bytes()
        ],
        bump = pool_ledger.bump,
        has_one = authority @ PoolError::Unauthorized
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    pub authority: Signer<'info>,
}

pub fn set_pool_param(ctx: Context<UpdatePool>, param: PoolParam, value: u128) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool_ledger;

    let old_value = pool.set_param(param, value)?;

    emit!(PoolParamUpdated {
        pool: pool.key(),
        param,
        old_value,
        new_value: value,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// `None` opens the pool to everyone
pub fn set_whitelist(ctx: Context<UpdatePool>, whitelist: Option<Pubkey>) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool_ledger;

    let old_whitelist = pool.whitelist;
    pool.whitelist = whitelist.unwrap_or_default();

    emit!(WhitelistChanged {
        pool: pool.key(),
        old_whitelist,
        new_whitelist: pool.whitelist,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
