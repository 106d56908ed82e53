// programs/bastion_pool/src/access.rs
//
// Whitelist Gate
// ==============
// Pools read bastion_whitelist accounts directly. The provider's entry is
// always passed at its canonical address so that leaving it out cannot
// silently fall back to the defaults; an empty account there means the
// provider has no entry.

use anchor_lang::prelude::*;
use bastion_whitelist::state::{LpAction, ProviderAccess, Whitelist};

use crate::errors::PoolError;

/// Check `provider` may perform `action` on a pool configured with
/// `configured` as its whitelist
pub fn authorize<'info>(
    configured: &Pubkey,
    whitelist: Option<&Account<'info, Whitelist>>,
    provider_access: Option<&UncheckedAccount<'info>>,
    provider: &Pubkey,
    action: LpAction,
) -> Result<()> {
    if *configured == Pubkey::default() {
        return Ok(());
    }
    let whitelist = whitelist.ok_or_else(|| error!(PoolError::WhitelistRequired))?;
    require_keys_eq!(whitelist.key(), *configured, PoolError::WhitelistMismatch);

    let info = provider_access.ok_or_else(|| error!(PoolError::ProviderAccessMismatch))?;
    let entry = load_provider_access(info, &whitelist.key(), provider)?;
    check(whitelist, entry.as_ref(), action)
}

/// Read the entry stored at the canonical provider access address, if any
pub fn load_provider_access(
    info: &AccountInfo,
    whitelist: &Pubkey,
    provider: &Pubkey,
) -> Result<Option<ProviderAccess>> {
    require_keys_eq!(
        info.key(),
        ProviderAccess::address(whitelist, provider),
        PoolError::ProviderAccessMismatch
    );
    if info.owner != &bastion_whitelist::ID || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    let entry = ProviderAccess::try_deserialize(&mut &data[..])?;
    require_keys_eq!(entry.whitelist, *whitelist, PoolError::ProviderAccessMismatch);
    require_keys_eq!(entry.provider, *provider, PoolError::ProviderAccessMismatch);
    Ok(Some(entry))
}

fn check(whitelist: &Whitelist, entry: Option<&ProviderAccess>, action: LpAction) -> Result<()> {
    require!(whitelist.allows(entry, action), PoolError::AccessDenied);
    Ok(())
}
