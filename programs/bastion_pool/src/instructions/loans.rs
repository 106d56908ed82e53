// programs/bastion_pool/src/instructions/loans.rs
//
// Internal Borrowers
// ==================
// The authority grants borrowers a loan account; its existence is what
// authorizes them to lock SCR and borrow. Loans are funded by a loss on the
// pool supply and returned as a gain when repaid.

use anchor_lang::prelude::*;
use bastion_core::ScaledAmount;
use crate::errors::PoolError;
use crate::events::{BorrowerAdded, BorrowerRemoved, InternalLoanRepaid, InternalLoanTaken};
use crate::state::{BorrowerLoan, PoolLedger};

// =============================================================================
// BORROWER MANAGEMENT
// =============================================================================

#[derive(Accounts)]
#[instruction(borrower: Pubkey)]
pub struct AddBorrower<'info> {
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

    #[account(
        init,
        payer = authority,
        space = 8 + BorrowerLoan::INIT_SPACE,
        seeds = [BorrowerLoan::SEED_PREFIX, pool_ledger.key().as_ref(), borrower.as_ref()],
        bump
    )]
    pub borrower_loan: Account<'info, BorrowerLoan>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn add_borrower(ctx: Context<AddBorrower>, borrower: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool_ledger;
    let loan = &mut ctx.accounts.borrower_loan;

    loan.pool = pool.key();
    loan.borrower = borrower;
    loan.loan = ScaledAmount::new(clock.unix_timestamp);
    loan.authorized_at = clock.unix_timestamp;
    loan.bump = ctx.bumps.borrower_loan;

    pool.borrower_count = pool.borrower_count.saturating_add(1);

    emit!(BorrowerAdded {
        pool: pool.key(),
        borrower,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(borrower: Pubkey)]
pub struct RemoveBorrower<'info> {
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

    #[account(
        mut,
        close = authority,
        seeds = [BorrowerLoan::SEED_PREFIX, pool_ledger.key().as_ref(), borrower.as_ref()],
        bump = borrower_loan.bump
    )]
    pub borrower_loan: Account<'info, BorrowerLoan>,

    #[account(mut)]
    pub authority: Signer<'info>,
}

/// Revoke a borrower. Any outstanding debt is written off as defaulted.
pub fn remove_borrower(ctx: Context<RemoveBorrower>, borrower: Pubkey) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool_ledger;
    let loan = &ctx.accounts.borrower_loan;

    let defaulted_debt = pool.remove_borrower(&loan.loan, clock.unix_timestamp)?;

    if defaulted_debt > 0 {
        msg!(
            "Borrower {} removed with {} outstanding",
            borrower,
            defaulted_debt
        );
    }

    emit!(BorrowerRemoved {
        pool: pool.key(),
        borrower,
        defaulted_debt,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

// =============================================================================
// LENDING
// =============================================================================

#[derive(Accounts)]
pub struct InternalLoan<'info> {
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

    #[account(
        mut,
        seeds = [BorrowerLoan::SEED_PREFIX, pool_ledger.key().as_ref(), borrower.key().as_ref()],
        bump = borrower_loan.bump,
        has_one = borrower @ PoolError::BorrowerMismatch
    )]
    pub borrower_loan: Account<'info, BorrowerLoan>,

    pub borrower: Signer<'info>,
}

/// Returns the amount actually lent, which may be less than requested
pub fn internal_loan(ctx: Context<InternalLoan>, amount: u64, receiver: Pubkey) -> Result<u64> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let pool = &mut ctx.accounts.pool_ledger;
    let loan = &mut ctx.accounts.borrower_loan;

    let lent = pool.internal_loan(&mut loan.loan, amount, now)?;
    if lent < amount {
        msg!("Loan capped: requested {}, lent {}", amount, lent);
    }

    emit!(InternalLoanTaken {
        pool: pool.key(),
        borrower: loan.borrower,
        receiver,
        requested: amount,
        lent,
        debt: pool.loan_debt(&loan.loan, now)?,
        timestamp: now,
    });

    Ok(lent)
}

#[derive(Accounts)]
#[instruction(amount: u64, on_behalf_of: Pubkey)]
pub struct RepayLoan<'info> {
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

    #[account(
        mut,
        seeds = [BorrowerLoan::SEED_PREFIX, pool_ledger.key().as_ref(), on_behalf_of.as_ref()],
        bump = borrower_loan.bump
    )]
    pub borrower_loan: Account<'info, BorrowerLoan>,

    /// Anyone may repay on a borrower's behalf
    pub payer: Signer<'info>,
}

pub fn repay_loan(ctx: Context<RepayLoan>, amount: u64, on_behalf_of: Pubkey) -> Result<u64> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let pool = &mut ctx.accounts.pool_ledger;
    let loan = &mut ctx.accounts.borrower_loan;

    let repaid = pool.repay_loan(&mut loan.loan, amount, now)?;

    emit!(InternalLoanRepaid {
        pool: pool.key(),
        borrower: on_behalf_of,
        payer: ctx.accounts.payer.key(),
        amount: repaid,
        debt: pool.loan_debt(&loan.loan, now)?,
        timestamp: now,
    });

    Ok(repaid)
}

// =============================================================================
// VIEWS
// =============================================================================

#[derive(Accounts)]
#[instruction(borrower: Pubkey)]
pub struct LoanView<'info> {
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
        seeds = [BorrowerLoan::SEED_PREFIX, pool_ledger.key().as_ref(), borrower.as_ref()],
        bump = borrower_loan.bump
    )]
    pub borrower_loan: Account<'info, BorrowerLoan>,
}

/// Debt `borrower` owes right now, rounded up
pub fn outstanding_debt(ctx: Context<LoanView>, _borrower: Pubkey) -> Result<u64> {
    let clock = Clock::get()?;
    ctx.accounts
        .pool_ledger
        .loan_debt(&ctx.accounts.borrower_loan.loan, clock.unix_timestamp)
}
