// programs/bastion_whitelist/src/instructions/initialize.rs

use anchor_lang::prelude::*;
use crate::errors::WhitelistError;
use crate::events::{DefaultPolicyUpdated, WhitelistInitialized};
use crate::state::{AccessPolicy, Whitelist};

#[derive(Accounts)]
pub struct InitializeWhitelist<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Whitelist::INIT_SPACE,
        seeds = [Whitelist::SEED_PREFIX, authority.key().as_ref()],
        bump
    )]
    pub whitelist: Account<'info, Whitelist>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeWhitelistParams {
    /// Verdicts for providers without an entry; `AccessPolicy::DEFAULT_POLICY` if omitted
    pub defaults: Option<AccessPolicy>,
}

pub fn handler(ctx: Context<InitializeWhitelist>, params: InitializeWhitelistParams) -> Result<()> {
    let clock = Clock::get()?;
    let defaults = params.defaults.unwrap_or(AccessPolicy::DEFAULT_POLICY);
    require!(defaults.is_complete(), WhitelistError::IncompleteDefaults);

    let whitelist = &mut ctx.accounts.whitelist;
    whitelist.authority = ctx.accounts.authority.key();
    whitelist.defaults = defaults;
    whitelist.provider_count = 0;
    whitelist.bump = ctx.bumps.whitelist;

    emit!(WhitelistInitialized {
        whitelist: whitelist.key(),
        authority: whitelist.authority,
        defaults,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetDefaultPolicy<'info> {
    #[account(
        mut,
        seeds = [Whitelist::SEED_PREFIX, authority.key().as_ref()],
        bump = whitelist.bump,
        has_one = authority @ WhitelistError::Unauthorized
    )]
    pub whitelist: Account<'info, Whitelist>,

    pub authority: Signer<'info>,
}

pub fn set_default_policy(ctx: Context<SetDefaultPolicy>, defaults: AccessPolicy) -> Result<()> {
    require!(defaults.is_complete(), WhitelistError::IncompleteDefaults);
    let clock = Clock::get()?;

    let whitelist = &mut ctx.accounts.whitelist;
    let old_defaults = whitelist.defaults;
    whitelist.defaults = defaults;

    emit!(DefaultPolicyUpdated {
        whitelist: whitelist.key(),
        old_defaults,
        new_defaults: defaults,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
