// programs/bastion_pool/src/lib.rs
//
// Bastion Pool Program
// ====================
// Liquidity pool ledger for an insurance protocol:
// - LP positions tracked as principal against a shared accrual scale
// - Solvency capital (SCR) locked by authorized borrowers, earning a rate
//   that flows to every LP through the pool's token interest rate
// - Internal loans to borrowers, funded from and repaid into the pool
// - Optional whitelist gating deposits, withdrawals and transfers
//
// Currency settlement is left to the orchestrator; this program keeps the
// books.

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod access;
pub mod instructions;

use instructions::*;
use state::PoolParam;

declare_id!("BastPoo1111111111111111111111111111111111111");

#[program]
pub mod bastion_pool {
    use super::*;

    // ==================== ADMINISTRATION ====================

    /// Create a pool ledger for a currency
    pub fn initialize_pool(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Update one pool parameter
    pub fn set_pool_param(ctx: Context<UpdatePool>, param: PoolParam, value: u128) -> Result<()> {
        instructions::initialize::set_pool_param(ctx, param, value)
    }

    /// Replace the whitelist (`None` opens the pool)
    pub fn set_whitelist(ctx: Context<UpdatePool>, whitelist: Option<Pubkey>) -> Result<()> {
        instructions::initialize::set_whitelist(ctx, whitelist)
    }

    // ==================== LIQUIDITY ====================

    /// Credit a deposit the orchestrator has received
    pub fn deposit(ctx: Context<Deposit>, amount: u64, receiver: Pubkey) -> Result<()> {
        instructions::liquidity::deposit(ctx, amount, receiver)
    }

    /// Debit an LP position; `None` withdraws everything available
    pub fn withdraw(ctx: Context<Withdraw>, amount: Option<u64>, receiver: Pubkey) -> Result<u64> {
        instructions::liquidity::withdraw(ctx, amount, receiver)
    }

    /// Move LP value between providers
    pub fn transfer(ctx: Context<TransferLp>, amount: u64, receiver: Pubkey) -> Result<()> {
        instructions::liquidity::transfer(ctx, amount, receiver)
    }

    // ==================== SCR ====================

    pub fn lock_scr(ctx: Context<ManageScr>, amount: u64, interest_rate: u128) -> Result<()> {
        instructions::reservation::lock_scr(ctx, amount, interest_rate)
    }

    pub fn unlock_scr(
        ctx: Context<ManageScr>,
        amount: u64,
        interest_rate: u128,
        adjustment: i64,
    ) -> Result<()> {
        instructions::reservation::unlock_scr(ctx, amount, interest_rate, adjustment)
    }

    /// Fold accrued SCR earnings into the scale and emit a snapshot
    pub fn record_earnings(ctx: Context<RecordEarnings>) -> Result<()> {
        instructions::reservation::record_earnings(ctx)
    }

    // ==================== INTERNAL LOANS ====================

    pub fn add_borrower(ctx: Context<AddBorrower>, borrower: Pubkey) -> Result<()> {
        instructions::loans::add_borrower(ctx, borrower)
    }

    /// Revoke a borrower, writing off what it still owes
    pub fn remove_borrower(ctx: Context<RemoveBorrower>, borrower: Pubkey) -> Result<()> {
        instructions::loans::remove_borrower(ctx, borrower)
    }

    pub fn internal_loan(ctx: Context<InternalLoan>, amount: u64, receiver: Pubkey) -> Result<u64> {
        instructions::loans::internal_loan(ctx, amount, receiver)
    }

    pub fn repay_loan(ctx: Context<RepayLoan>, amount: u64, on_behalf_of: Pubkey) -> Result<u64> {
        instructions::loans::repay_loan(ctx, amount, on_behalf_of)
    }

    pub fn outstanding_debt(ctx: Context<LoanView>, borrower: Pubkey) -> Result<u64> {
        instructions::loans::outstanding_debt(ctx, borrower)
    }

    // ==================== VIEWS ====================

    /// Ledger figures as of this slot
    pub fn pool_status(ctx: Context<PoolView>) -> Result<PoolStatus> {
        instructions::views::pool_status(ctx)
    }

    /// Current value of an LP position
    pub fn lp_balance(ctx: Context<LpBalanceView>, owner: Pubkey) -> Result<u64> {
        instructions::views::lp_balance(ctx, owner)
    }
}
