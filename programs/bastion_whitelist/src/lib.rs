// programs/bastion_whitelist/src/lib.rs
//
// Bastion Whitelist Program
// =========================
// Per-provider access policies for pool deposits, withdrawals and
// transfers. Pools read these accounts inline; this program only
// maintains them.

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::AccessPolicy;

declare_id!("BastWhtL1st11111111111111111111111111111111");

#[program]
pub mod bastion_whitelist {
    use super::*;

    /// Create a whitelist owned by the signer
    pub fn initialize_whitelist(
        ctx: Context<InitializeWhitelist>,
        params: InitializeWhitelistParams,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Replace the default policy
    pub fn set_default_policy(ctx: Context<SetDefaultPolicy>, defaults: AccessPolicy) -> Result<()> {
        instructions::initialize::set_default_policy(ctx, defaults)
    }

    /// Set a provider's explicit policy
    pub fn set_provider_access(
        ctx: Context<SetProviderAccess>,
        provider: Pubkey,
        policy: AccessPolicy,
    ) -> Result<()> {
        instructions::providers::set_provider_access(ctx, provider, policy)
    }

    /// Remove a provider's explicit policy
    pub fn remove_provider_access(ctx: Context<RemoveProviderAccess>) -> Result<()> {
        instructions::providers::remove_provider_access(ctx)
    }
}

