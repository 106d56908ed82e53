// programs/bastion_pool/src/events.rs

use anchor_lang::prelude::*;

use crate::state::PoolParam;

/// Emitted when a pool ledger is created
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub orchestrator: Pubkey,
    pub currency_mint: Pubkey,
    pub currency_decimals: u8,
    pub pool_id: u64,
    pub whitelist: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a pool parameter changes
#[event]
pub struct PoolParamUpdated {
    pub pool: Pubkey,
    pub param: PoolParam,
    pub old_value: u128,
    pub new_value: u128,
    pub timestamp: i64,
}

/// Emitted when the pool's whitelist is replaced or removed
#[event]
pub struct WhitelistChanged {
    pub pool: Pubkey,
    pub old_whitelist: Pubkey,
    pub new_whitelist: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a deposit is credited to an LP position
#[event]
pub struct Deposited {
    pub pool: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
    pub principal_minted: u128,
    pub total_supply: u64,
    pub timestamp: i64,
}

/// Emitted when an LP position is debited for a withdrawal
#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
    pub total_supply: u64,
    pub timestamp: i64,
}

/// Emitted when LP value moves between providers
#[event]
pub struct LpTransferred {
    pub pool: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
    pub principal_moved: u128,
    pub timestamp: i64,
}

/// Emitted when capital is reserved for a policy
#[event]
pub struct ScrLocked {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub amount: u64,
    pub interest_rate: u128,
    pub scr_amount: u64,
    pub token_interest_rate: u128,
    pub timestamp: i64,
}

/// Emitted when reserved capital is released
#[event]
pub struct ScrUnlocked {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub amount: u64,
    pub interest_rate: u128,
    pub adjustment: i64,
    pub scr_amount: u64,
    pub token_interest_rate: u128,
    pub timestamp: i64,
}

/// Point-in-time view of the ledger
#[event]
pub struct PoolSnapshot {
    pub pool: Pubkey,
    pub total_supply: u64,
    pub scale: u128,
    pub scr_amount: u64,
    pub scr_interest_rate: u128,
    pub token_interest_rate: u128,
    pub utilization_rate: u128,
    pub timestamp: i64,
}

/// Emitted when a borrower is authorized
#[event]
pub struct BorrowerAdded {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a borrower is removed; remaining debt is written off
#[event]
pub struct BorrowerRemoved {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub defaulted_debt: u64,
    pub timestamp: i64,
}

/// Emitted when a borrower draws an internal loan
#[event]
pub struct InternalLoanTaken {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub receiver: Pubkey,
    pub requested: u64,
    pub lent: u64,
    pub debt: u64,
    pub timestamp: i64,
}

/// Emitted when an internal loan is (partly) repaid
#[event]
pub struct InternalLoanRepaid {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub payer: Pubkey,
    pub amount: u64,
    pub debt: u64,
    pub timestamp: i64,
}
