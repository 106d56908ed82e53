// programs/bastion_whitelist/src/events.rs

use anchor_lang::prelude::*;
use crate::state::AccessPolicy;

/// Emitted when a whitelist is created
#[event]
pub struct WhitelistInitialized {
    pub whitelist: Pubkey,
    pub authority: Pubkey,
    pub defaults: AccessPolicy,
    pub timestamp: i64,
}

/// Emitted when the default policy changes
#[event]
pub struct DefaultPolicyUpdated {
    pub whitelist: Pubkey,
    pub old_defaults: AccessPolicy,
    pub new_defaults: AccessPolicy,
    pub timestamp: i64,
}

/// Emitted when a provider's policy is set or changed
#[event]
pub struct ProviderAccessUpdated {
    pub whitelist: Pubkey,
    pub provider: Pubkey,
    pub policy: AccessPolicy,
    pub timestamp: i64,
}

/// Emitted when a provider falls back to the defaults
#[event]
pub struct ProviderAccessRemoved {
    pub whitelist: Pubkey,
    pub provider: Pubkey,
    pub timestamp: i64,
}
