// programs/bastion_pool/src/instructions/liquidity.rs
//
// LP Deposits, Withdrawals and Transfers
// ======================================
// The orchestrator moves the currency itself; these instructions only keep
// the LP ledger in step with it. Every provider touched is checked against
// the pool's whitelist.

use anchor_lang::prelude::*;
use bastion_whitelist::state::{LpAction, Whitelist};
use crate::access;
use crate::errors::PoolError;
use crate::events::{Deposited, LpTransferred, Withdrawn};
use crate::state::{LpPosition, PoolLedger};

// =============================================================================
// DEPOSIT
// =============================================================================

#[derive(Accounts)]
#[instruction(amount: u64, receiver: Pubkey)]
pub struct Deposit<'info> {
    #[account(
        mut,
        seeds = [
            PoolLedger::SEED_PREFIX,
            pool_ledger.currency_mint.as_ref(),
            &pool_ledger.pool_id.to_le_bytes()
        ],
        bump = pool_ledger.bump,
        has_one = orchestrator @ PoolError::Unauthorized
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    #[account(
        init_if_needed,
        payer = orchestrator,
        space = 8 + LpPosition::INIT_SPACE,
        seeds = [LpPosition::SEED_PREFIX, pool_ledger.key().as_ref(), receiver.as_ref()],
        bump
    )]
    pub receiver_position: Account<'info, LpPosition>,

    pub whitelist: Option<Account<'info, Whitelist>>,

    /// CHECK: must sit at the receiver's canonical entry address, checked in `access`
    pub receiver_access: Option<UncheckedAccount<'info>>,

    #[account(mut)]
    pub orchestrator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn deposit(ctx: Context<Deposit>, amount: u64, receiver: Pubkey) -> Result<()> {
    let clock = Clock::get()?;

    access::authorize(
        &ctx.accounts.pool_ledger.whitelist,
        ctx.accounts.whitelist.as_ref(),
        ctx.accounts.receiver_access.as_ref(),
        &receiver,
        LpAction::Deposit,
    )?;

    let pool = &mut ctx.accounts.pool_ledger;
    let position = &mut ctx.accounts.receiver_position;
    if position.owner == Pubkey::default() {
        position.pool = pool.key();
        position.owner = receiver;
        position.principal = 0;
        position.bump = ctx.bumps.receiver_position;
    }

    let principal_minted = pool.deposit(&mut position.principal, amount, clock.unix_timestamp)?;

    emit!(Deposited {
        pool: pool.key(),
        receiver,
        amount,
        principal_minted,
        total_supply: pool.total_supply(clock.unix_timestamp)?,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

// =============================================================================
// WITHDRAW
// =============================================================================

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [
            PoolLedger::SEED_PREFIX,
            pool_ledger.currency_mint.as_ref(),
            &pool_ledger.pool_id.to_le_bytes()
        ],
        bump = pool_ledger.bump,
        has_one = orchestrator @ PoolError::Unauthorized
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    #[account(
        mut,
        seeds = [LpPosition::SEED_PREFIX, pool_ledger.key().as_ref(), owner.key().as_ref()],
        bump = owner_position.bump,
        has_one = owner @ PoolError::Unauthorized
    )]
    pub owner_position: Account<'info, LpPosition>,

    pub whitelist: Option<Account<'info, Whitelist>>,

    /// CHECK: must sit at the owner's canonical entry address, checked in `access`
    pub owner_access: Option<UncheckedAccount<'info>>,

    pub owner: Signer<'info>,

    pub orchestrator: Signer<'info>,
}

/// Returns the amount the orchestrator must pay to `receiver`
pub fn withdraw(ctx: Context<Withdraw>, amount: Option<u64>, receiver: Pubkey) -> Result<u64> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();

    access::authorize(
        &ctx.accounts.pool_ledger.whitelist,
        ctx.accounts.whitelist.as_ref(),
        ctx.accounts.owner_access.as_ref(),
        &owner,
        LpAction::Withdraw,
    )?;

    let pool = &mut ctx.accounts.pool_ledger;
    let position = &mut ctx.accounts.owner_position;
    let withdrawn = pool.withdraw(&mut position.principal, amount, clock.unix_timestamp)?;

    if withdrawn == 0 {
        msg!("Nothing withdrawable for {}", owner);
        return Ok(0);
    }

    emit!(Withdrawn {
        pool: pool.key(),
        owner,
        receiver,
        amount: withdrawn,
        total_supply: pool.total_supply(clock.unix_timestamp)?,
        timestamp: clock.unix_timestamp,
    });

    Ok(withdrawn)
}

// =============================================================================
// TRANSFER
// =============================================================================

#[derive(Accounts)]
#[instruction(amount: u64, receiver: Pubkey)]
pub struct TransferLp<'info> {
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
        mut,
        seeds = [LpPosition::SEED_PREFIX, pool_ledger.key().as_ref(), owner.key().as_ref()],
        bump = from_position.bump,
        has_one = owner @ PoolError::Unauthorized
    )]
    pub from_position: Account<'info, LpPosition>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + LpPosition::INIT_SPACE,
        seeds = [LpPosition::SEED_PREFIX, pool_ledger.key().as_ref(), receiver.as_ref()],
        bump,
        constraint = receiver != owner.key() @ PoolError::SelfTransfer
    )]
    pub to_position: Account<'info, LpPosition>,

    pub whitelist: Option<Account<'info, Whitelist>>,

    /// CHECK: must sit at the sender's canonical entry address, checked in `access`
    pub sender_access: Option<UncheckedAccount<'info>>,

    /// CHECK: must sit at the receiver's canonical entry address, checked in `access`
    pub receiver_access: Option<UncheckedAccount<'info>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn transfer(ctx: Context<TransferLp>, amount: u64, receiver: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();
    let configured = ctx.accounts.pool_ledger.whitelist;

    access::authorize(
        &configured,
        ctx.accounts.whitelist.as_ref(),
        ctx.accounts.sender_access.as_ref(),
        &owner,
        LpAction::SendTransfer,
    )?;
    access::authorize(
        &configured,
        ctx.accounts.whitelist.as_ref(),
        ctx.accounts.receiver_access.as_ref(),
        &receiver,
        LpAction::ReceiveTransfer,
    )?;

    let pool = &ctx.accounts.pool_ledger;
    let to_position = &mut ctx.accounts.to_position;
    if to_position.owner == Pubkey::default() {
        to_position.pool = pool.key();
        to_position.owner = receiver;
        to_position.principal = 0;
        to_position.bump = ctx.bumps.to_position;
    }

    let principal_moved = pool.transfer(
        &mut ctx.accounts.from_position.principal,
        &mut to_position.principal,
        amount,
        clock.unix_timestamp,
    )?;

    emit!(LpTransferred {
        pool: pool.key(),
        from: owner,
        to: receiver,
        amount,
        principal_moved,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
