// programs/bastion_pool/src/state.rs

use anchor_lang::prelude::*;
use bastion_core::wad::{self, to_u64, WAD};
use bastion_core::{Scale, ScaledAmount, Scr};

use crate::errors::PoolError;

/// Pool ledger: LP supply, locked SCR and the policies applied to both
/// PDA seeds: ["pool_ledger", currency_mint, pool_id]
#[account]
#[derive(InitSpace)]
pub struct PoolLedger {
    /// Authority for parameters and borrower management
    pub authority: Pubkey,

    /// Orchestrator that settles currency for deposits and withdrawals
    pub orchestrator: Pubkey,

    /// Reference currency mint
    pub currency_mint: Pubkey,

    /// Decimals of the reference currency
    pub currency_decimals: u8,

    /// Distinguishes pools sharing a currency
    pub pool_id: u64,

    /// Access whitelist (default pubkey = open pool)
    pub whitelist: Pubkey,

    /// Total LP supply; the sum of every LpPosition principal
    pub supply: ScaledAmount,

    /// Locked solvency capital
    pub scr: Scr,

    /// Rate LPs earn: scr rate weighted by utilization (WAD)
    pub token_interest_rate: u128,

    /// Rate charged on internal loans (WAD)
    pub internal_loan_interest_rate: u128,

    /// Multiple of locked SCR that cannot be withdrawn (WAD)
    pub liquidity_requirement: u128,

    /// Ceiling on locked / supply when locking (WAD)
    pub max_utilization_rate: u128,

    /// Floor on locked / supply after a deposit (WAD)
    pub min_utilization_rate: u128,

    /// Authorized internal borrowers
    pub borrower_count: u32,

    /// Debt written off when borrowers were removed
    pub total_defaulted_debt: u64,

    /// Bump seed
    pub bump: u8,
}

/// Tunable pool parameters
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolParam {
    LiquidityRequirement,
    MaxUtilizationRate,
    MinUtilizationRate,
    InternalLoanInterestRate,
}

impl PoolParam {
    pub fn validate(&self, value: u128) -> Result<()> {
        let valid = match self {
            PoolParam::LiquidityRequirement => (PoolLedger::MIN_LIQUIDITY_REQUIREMENT
                ..=PoolLedger::MAX_LIQUIDITY_REQUIREMENT)
                .contains(&value),
            PoolParam::MaxUtilizationRate | PoolParam::MinUtilizationRate => value <= WAD,
            PoolParam::InternalLoanInterestRate => {
                value <= PoolLedger::MAX_INTERNAL_LOAN_INTEREST_RATE
            }
        };
        require!(valid, PoolError::InvalidParameter);
        Ok(())
    }
}

impl PoolLedger {
    pub const SEED_PREFIX: &'static [u8] = b"pool_ledger";

    pub const DEFAULT_LIQUIDITY_REQUIREMENT: u128 = WAD; // 100%
    pub const MIN_LIQUIDITY_REQUIREMENT: u128 = WAD * 8 / 10; // 80%
    pub const MAX_LIQUIDITY_REQUIREMENT: u128 = WAD * 13 / 10; // 130%
    pub const DEFAULT_MAX_UTILIZATION_RATE: u128 = WAD; // 100%
    pub const DEFAULT_MIN_UTILIZATION_RATE: u128 = 0;
    pub const DEFAULT_INTERNAL_LOAN_INTEREST_RATE: u128 = WAD / 20; // 5%
    pub const MAX_INTERNAL_LOAN_INTEREST_RATE: u128 = WAD / 2; // 50%

    // ==================== VIEWS ====================

    pub fn current_scale(&self, now: i64) -> Result<Scale> {
        self.supply.projected_scale(self.token_interest_rate, now)
    }

    pub fn total_supply(&self, now: i64) -> Result<u64> {
        to_u64(self.supply.current(self.token_interest_rate, now)?)
    }

    /// Current value of an LP position's principal
    pub fn balance_of(&self, principal: u128, now: i64) -> Result<u64> {
        to_u64(self.current_scale(now)?.to_current_floor(principal)?)
    }

    pub fn scr_amount(&self) -> Result<u64> {
        to_u64(self.scr.locked)
    }

    /// locked / supply in WAD, zero for an empty pool
    pub fn utilization_rate(&self, now: i64) -> Result<u128> {
        let supply = self.supply.current(self.token_interest_rate, now)?;
        if supply == 0 {
            return Ok(0);
        }
        wad::wad_div(self.scr.locked, supply)
    }

    /// Supply not backing locked SCR
    pub fn funds_available(&self, now: i64) -> Result<u64> {
        let supply = self.supply.current(self.token_interest_rate, now)?;
        to_u64(supply.saturating_sub(self.scr.locked))
    }

    /// Headroom for new SCR under the max utilization rate
    pub fn funds_available_to_lock(&self, now: i64) -> Result<u64> {
        let supply = self.supply.current(self.token_interest_rate, now)?;
        let ceiling = wad::wad_mul(supply, self.max_utilization_rate)?;
        to_u64(ceiling.saturating_sub(self.scr.locked))
    }

    /// Supply LPs may take out while locked SCR stays covered by the
    /// liquidity requirement. Never less than the locked amount itself stays.
    pub fn total_withdrawable(&self, now: i64) -> Result<u64> {
        let supply = self.supply.current(self.token_interest_rate, now)?;
        let required = wad::mul_div_ceil(self.scr.locked, self.liquidity_requirement, WAD)?
            .max(self.scr.locked);
        to_u64(supply.saturating_sub(required))
    }

    /// Largest loss the supply can absorb before its scale hits the floor
    pub fn max_negative_adjustment(&self, now: i64) -> Result<u64> {
        to_u64(self.supply.max_negative_adjustment(&self.scr, now)?)
    }

    /// What a borrower owes now, rounded up
    pub fn loan_debt(&self, loan: &ScaledAmount, now: i64) -> Result<u64> {
        to_u64(loan.debt(self.internal_loan_interest_rate, now)?)
    }

    // ==================== LIQUIDITY ====================

    /// Credit `amount` to a position. Returns the principal minted.
    pub fn deposit(&mut self, receiver_principal: &mut u128, amount: u64, now: i64) -> Result<u128> {
        require!(amount > 0, PoolError::ZeroAmount);

        let mut supply = self.supply;
        let minted = supply.add(amount as u128, self.token_interest_rate, now)?;
        let credited = wad::checked_add(*receiver_principal, minted)?;

        let total = supply.current(self.token_interest_rate, now)?;
        let utilization = if total == 0 { 0 } else { wad::wad_div(self.scr.locked, total)? };
        require!(
            utilization >= self.min_utilization_rate,
            PoolError::UtilizationTooLow
        );

        self.supply = supply;
        *receiver_principal = credited;
        self.update_token_interest_rate(now)?;
        Ok(minted)
    }

    /// Debit a position. `None` takes everything currently withdrawable.
    /// Returns the amount the caller must pay out.
    pub fn withdraw(&mut self, owner_principal: &mut u128, amount: Option<u64>, now: i64) -> Result<u64> {
        let balance = self.balance_of(*owner_principal, now)?;
        let max_withdraw = balance.min(self.total_withdrawable(now)?);
        let amount = match amount {
            None => max_withdraw,
            Some(requested) => {
                require!(requested > 0, PoolError::ZeroAmount);
                require_gte!(max_withdraw, requested, PoolError::ExceedsWithdrawable);
                requested
            }
        };
        if amount == 0 {
            return Ok(0);
        }

        let mut supply = self.supply;
        let scale = supply.sync(self.token_interest_rate, now)?;
        let burned = scale.debit_principal(amount as u128, *owner_principal)?;
        supply.remove_principal(burned)?;

        self.supply = supply;
        *owner_principal -= burned;
        self.update_token_interest_rate(now)?;
        Ok(amount)
    }

    /// Move `amount` between positions. Supply is untouched.
    /// Returns the principal moved.
    pub fn transfer(&self, from: &mut u128, to: &mut u128, amount: u64, now: i64) -> Result<u128> {
        require!(amount > 0, PoolError::ZeroAmount);
        let balance = self.balance_of(*from, now)?;
        require_gte!(balance, amount, PoolError::InsufficientBalance);

        let moved = self
            .current_scale(now)?
            .debit_principal(amount as u128, *from)?;
        let credited = wad::checked_add(*to, moved)?;

        *from -= moved;
        *to = credited;
        Ok(moved)
    }

    // ==================== SCR ====================

    /// Reserve `amount` of pool capital earning `rate`
    pub fn lock_scr(&mut self, amount: u64, rate: u128, now: i64) -> Result<()> {
        require!(amount > 0, PoolError::ZeroAmount);
        let available = self.funds_available_to_lock(now)?;
        require_gte!(available, amount, PoolError::NotEnoughFundsToLock);

        let mut supply = self.supply;
        supply.discrete_change(0, &self.scr, now)?;
        let mut scr = self.scr;
        scr.lock(amount as u128, rate)?;

        self.supply = supply;
        self.scr = scr;
        self.update_token_interest_rate(now)
    }

    /// Release `amount` locked at `rate` and book `adjustment`, the difference
    /// between interest accrued and interest actually charged
    pub fn unlock_scr(&mut self, amount: u64, rate: u128, adjustment: i64, now: i64) -> Result<()> {
        let mut supply = self.supply;
        supply.discrete_change(adjustment as i128, &self.scr, now)?;
        let mut scr = self.scr;
        scr.unlock(amount as u128, rate)?;

        self.supply = supply;
        self.scr = scr;
        self.update_token_interest_rate(now)
    }

    /// Fold accrued SCR earnings into the scale
    pub fn record_earnings(&mut self, now: i64) -> Result<()> {
        self.supply.discrete_change(0, &self.scr, now)?;
        self.update_token_interest_rate(now)
    }

    // ==================== INTERNAL LOANS ====================

    /// Lend up to `amount` out of pool capital. Returns the amount lent,
    /// which is capped by what the supply can lose.
    pub fn internal_loan(&mut self, loan: &mut ScaledAmount, amount: u64, now: i64) -> Result<u64> {
        require!(amount > 0, PoolError::ZeroAmount);
        let lent = amount.min(self.max_negative_adjustment(now)?);
        if lent == 0 {
            return Ok(0);
        }

        let mut supply = self.supply;
        supply.discrete_change(-(lent as i128), &self.scr, now)?;
        let mut borrowed = *loan;
        borrowed.add(lent as u128, self.internal_loan_interest_rate, now)?;

        self.supply = supply;
        *loan = borrowed;
        self.update_token_interest_rate(now)?;
        Ok(lent)
    }

    /// Pay back `amount` of a loan into pool capital
    pub fn repay_loan(&mut self, loan: &mut ScaledAmount, amount: u64, now: i64) -> Result<u64> {
        require!(amount > 0, PoolError::ZeroAmount);
        let debt = self.loan_debt(loan, now)?;
        require_gte!(debt, amount, PoolError::RepayExceedsDebt);

        let mut repaid = *loan;
        repaid.subtract(amount as u128, self.internal_loan_interest_rate, now)?;
        let mut supply = self.supply;
        supply.discrete_change(amount as i128, &self.scr, now)?;

        self.supply = supply;
        *loan = repaid;
        self.update_token_interest_rate(now)?;
        Ok(amount)
    }

    /// Write off a revoked borrower's loan. Returns the defaulted debt.
    pub fn remove_borrower(&mut self, loan: &ScaledAmount, now: i64) -> Result<u64> {
        let defaulted = self.loan_debt(loan, now)?;
        let total = to_u64(wad::checked_add(
            self.total_defaulted_debt as u128,
            defaulted as u128,
        )?)?;

        self.total_defaulted_debt = total;
        self.borrower_count = self.borrower_count.saturating_sub(1);
        Ok(defaulted)
    }

    // ==================== PARAMETERS ====================

    pub fn set_param(&mut self, param: PoolParam, value: u128) -> Result<u128> {
        param.validate(value)?;
        let slot = match param {
            PoolParam::LiquidityRequirement => &mut self.liquidity_requirement,
            PoolParam::MaxUtilizationRate => &mut self.max_utilization_rate,
            PoolParam::MinUtilizationRate => &mut self.min_utilization_rate,
            PoolParam::InternalLoanInterestRate => &mut self.internal_loan_interest_rate,
        };
        let old = *slot;
        *slot = value;
        Ok(old)
    }

    /// Re-derive the LP rate from the reservation: scr_rate * locked / supply
    fn update_token_interest_rate(&mut self, now: i64) -> Result<()> {
        let supply = self.supply.current(self.token_interest_rate, now)?;
        self.token_interest_rate = if supply == 0 {
            0
        } else {
            wad::mul_div_floor(self.scr.interest_rate, self.scr.locked, supply)?
        };
        Ok(())
    }
}

/// A liquidity provider's share of the pool
/// PDA seeds: ["lp_position", pool_ledger, owner]
#[account]
#[derive(InitSpace)]
pub struct LpPosition {
    pub pool: Pubkey,
    pub owner: Pubkey,
    /// Scale-independent units; value = principal * pool scale
    pub principal: u128,
    pub bump: u8,
}

impl LpPosition {
    pub const SEED_PREFIX: &'static [u8] = b"lp_position";
}

/// Internal credit line of an authorized borrower
/// PDA seeds: ["borrower_loan", pool_ledger, borrower]
#[account]
#[derive(InitSpace)]
pub struct BorrowerLoan {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    /// Outstanding loan at the pool's internal loan rate
    pub loan: ScaledAmount,
    pub authorized_at: i64,
    pub bump: u8,
}

impl BorrowerLoan {
    pub const SEED_PREFIX: &'static [u8] = b"borrower_loan";
}

// ==================== UNIT TESTS ====================
