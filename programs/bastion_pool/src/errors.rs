// programs/bastion_pool/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    #[msg("Unauthorized: caller lacks permission")]
    Unauthorized,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Parameter value out of range")]
    InvalidParameter,

    #[msg("Not enough funds available to lock")]
    NotEnoughFundsToLock,

    #[msg("Amount exceeds what can be withdrawn")]
    ExceedsWithdrawable,

    #[msg("Insufficient LP balance")]
    InsufficientBalance,

    #[msg("Repayment exceeds outstanding debt")]
    RepayExceedsDebt,

    #[msg("Utilization rate would fall below its minimum")]
    UtilizationTooLow,

    #[msg("Whitelist denies this action")]
    AccessDenied,

    #[msg("Pool requires its whitelist account")]
    WhitelistRequired,

    #[msg("Whitelist account does not match the pool")]
    WhitelistMismatch,

    #[msg("Provider access account does not match the provider")]
    ProviderAccessMismatch,

    #[msg("Loan account belongs to another borrower")]
    BorrowerMismatch,

    #[msg("Cannot transfer to the same position")]
    SelfTransfer,
}
