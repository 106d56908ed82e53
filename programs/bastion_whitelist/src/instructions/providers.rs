// programs/bastion_whitelist/src/instructions/providers.rs

use anchor_lang::prelude::*;
use crate::errors::WhitelistError;
use crate::events::{ProviderAccessRemoved, ProviderAccessUpdated};
use crate::state::{AccessPolicy, ProviderAccess, Whitelist};

/// Create or update a provider's explicit policy
#[derive(Accounts)]
#[instruction(provider: Pubkey)]
pub struct SetProviderAccess<'info> {
    #[account(
        mut,
        seeds = [Whitelist::SEED_PREFIX, authority.key().as_ref()],
        bump = whitelist.bump,
        has_one = authority @ WhitelistError::Unauthorized
    )]
    pub whitelist: Account<'info, Whitelist>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + ProviderAccess::INIT_SPACE,
        seeds = [ProviderAccess::SEED_PREFIX, whitelist.key().as_ref(), provider.as_ref()],
        bump
    )]
    pub provider_access: Account<'info, ProviderAccess>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn set_provider_access(
    ctx: Context<SetProviderAccess>,
    provider: Pubkey,
    policy: AccessPolicy,
) -> Result<()> {
    let clock = Clock::get()?;
    let whitelist = &mut ctx.accounts.whitelist;
    let entry = &mut ctx.accounts.provider_access;

    if entry.provider == Pubkey::default() {
        entry.whitelist = whitelist.key();
        entry.provider = provider;
        entry.bump = ctx.bumps.provider_access;
        whitelist.provider_count = whitelist.provider_count.saturating_add(1);
    }
    entry.policy = policy;
    entry.updated_at = clock.unix_timestamp;

    emit!(ProviderAccessUpdated {
        whitelist: whitelist.key(),
        provider,
        policy,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Drop a provider's entry so the defaults apply again
#[derive(Accounts)]
pub struct RemoveProviderAccess<'info> {
    #[account(
        mut,
        seeds = [Whitelist::SEED_PREFIX, authority.key().as_ref()],
        bump = whitelist.bump,
        has_one = authority @ WhitelistError::Unauthorized
    )]
    pub whitelist: Account<'info, Whitelist>,

    #[account(
        mut,
        close = authority,
        seeds = [
            ProviderAccess::SEED_PREFIX,
            whitelist.key().as_ref(),
            provider_access.provider.as_ref()
        ],
        bump = provider_access.bump,
        constraint = provider_access.whitelist == whitelist.key() @ WhitelistError::WhitelistMismatch
    )]
    pub provider_access: Account<'info, ProviderAccess>,

    #[account(mut)]
    pub authority: Signer<'info>,
}

pub fn remove_provider_access(ctx: Context<RemoveProviderAccess>) -> Result<()> {
    let clock = Clock::get()?;
    let whitelist = &mut ctx.accounts.whitelist;
    whitelist.provider_count = whitelist.provider_count.saturating_sub(1);

    emit!(ProviderAccessRemoved {
        whitelist: whitelist.key(),
        provider: ctx.accounts.provider_access.provider,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
