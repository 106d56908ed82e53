// programs/bastion_whitelist/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum WhitelistError {
    #[msg("Unauthorized: caller is not the whitelist authority")]
    Unauthorized,

    #[msg("Default policy must resolve every action (no Undefined status)")]
    IncompleteDefaults,

    #[msg("Provider access entry belongs to another whitelist")]
    WhitelistMismatch,
}
