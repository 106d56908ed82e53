// programs/bastion_whitelist/src/state.rs

use anchor_lang::prelude::*;

/// Verdict for one action. `Undefined` defers to the whitelist defaults.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum AccessStatus {
    #[default]
    Undefined,
    Whitelisted,
    Blacklisted,
}

/// Pool operations gated by the whitelist
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LpAction {
    Deposit,
    Withdraw,
    SendTransfer,
    ReceiveTransfer,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct AccessPolicy {
    pub deposit: AccessStatus,
    pub withdraw: AccessStatus,
    pub send_transfer: AccessStatus,
    pub receive_transfer: AccessStatus,
}

impl AccessPolicy {
    /// Deposits and transfers need explicit approval; exits are always open
    pub const DEFAULT_POLICY: AccessPolicy = AccessPolicy {
        deposit: AccessStatus::Blacklisted,
        withdraw: AccessStatus::Whitelisted,
        send_transfer: AccessStatus::Blacklisted,
        receive_transfer: AccessStatus::Blacklisted,
    };

    pub fn status(&self, action: LpAction) -> AccessStatus {
        match action {
            LpAction::Deposit => self.deposit,
            LpAction::Withdraw => self.withdraw,
            LpAction::SendTransfer => self.send_transfer,
            LpAction::ReceiveTransfer => self.receive_transfer,
        }
    }

    /// True when no action is left Undefined (required for defaults)
    pub fn is_complete(&self) -> bool {
        [
            self.deposit,
            self.withdraw,
            self.send_transfer,
            self.receive_transfer,
        ]
        .iter()
        .all(|status| *status != AccessStatus::Undefined)
    }
}

/// Access list consulted by pools
/// PDA seeds: ["whitelist", authority]
#[account]
#[derive(InitSpace)]
pub struct Whitelist {
    /// Authority allowed to edit policies
    pub authority: Pubkey,

    /// Verdicts for providers without an explicit entry
    pub defaults: AccessPolicy,

    /// Providers with an explicit entry
    pub provider_count: u64,

    /// Bump seed
    pub bump: u8,
}

impl Whitelist {
    pub const SEED_PREFIX: &'static [u8] = b"whitelist";

    /// Resolve an action for a provider. `entry` must already be verified to
    /// belong to this whitelist and provider.
    pub fn allows(&self, entry: Option<&ProviderAccess>, action: LpAction) -> bool {
        let explicit = entry
            .map(|e| e.policy.status(action))
            .unwrap_or(AccessStatus::Undefined);
        let resolved = match explicit {
            AccessStatus::Undefined => self.defaults.status(action),
            status => status,
        };
        resolved == AccessStatus::Whitelisted
    }
}

/// Per-provider override
/// PDA seeds: ["provider_access", whitelist, provider]
#[account]
#[derive(InitSpace)]
pub struct ProviderAccess {
    pub whitelist: Pubkey,
    pub provider: Pubkey,
    pub policy: AccessPolicy,
    pub updated_at: i64,
    pub bump: u8,
}

impl ProviderAccess {
    pub const SEED_PREFIX: &'static [u8] = b"provider_access";

    /// Canonical entry address for `provider` under `whitelist`
    pub fn address(whitelist: &Pubkey, provider: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(
            &[Self::SEED_PREFIX, whitelist.as_ref(), provider.as_ref()],
            &crate::ID,
        )
        .0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whitelist() -> Whitelist {
        Whitelist {
            authority: Pubkey::default(),
            defaults: AccessPolicy::DEFAULT_POLICY,
            provider_count: 0,
            bump: 255,
        }
    }

    fn entry(policy: AccessPolicy) -> ProviderAccess {
        ProviderAccess {
            whitelist: Pubkey::default(),
            provider: Pubkey::new_unique(),
            policy,
            updated_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_defaults_apply_without_entry() {
        let wl = whitelist();
        assert!(!wl.allows(None, LpAction::Deposit));
        assert!(wl.allows(None, LpAction::Withdraw));
        assert!(!wl.allows(None, LpAction::SendTransfer));
        assert!(!wl.allows(None, LpAction::ReceiveTransfer));
    }

    #[test]
    fn test_undefined_entry_falls_back_to_defaults() {
        let wl = whitelist();
        let e = entry(AccessPolicy::default());
        assert!(!wl.allows(Some(&e), LpAction::Deposit));
        assert!(wl.allows(Some(&e), LpAction::Withdraw));
    }

    #[test]
    fn test_entry_overrides_defaults() {
        let wl = whitelist();
        let e = entry(AccessPolicy {
            deposit: AccessStatus::Whitelisted,
            withdraw: AccessStatus::Blacklisted,
            ..AccessPolicy::default()
        });
        assert!(wl.allows(Some(&e), LpAction::Deposit));
        assert!(!wl.allows(Some(&e), LpAction::Withdraw));
        assert!(!wl.allows(Some(&e), LpAction::SendTransfer));
    }

    #[test]
    fn test_policy_completeness() {
        assert!(AccessPolicy::DEFAULT_POLICY.is_complete());
        assert!(!AccessPolicy::default().is_complete());
        let partial = AccessPolicy {
            deposit: AccessStatus::Whitelisted,
            withdraw: AccessStatus::Whitelisted,
            send_transfer: AccessStatus::Whitelisted,
            receive_transfer: AccessStatus::Undefined,
        };
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_seed_prefixes() {
        assert_eq!(Whitelist::SEED_PREFIX, b"whitelist");
        assert_eq!(ProviderAccess::SEED_PREFIX, b"provider_access");
    }
}
