//! Reward accrual over explicit ledger objects.
//!
//! [`PoolState`] carries the global accumulator and is the only place that
//! advances it. Per-account entitlement lives in [`AccountState`] and is
//! brought up to date with [`PoolState::settle_account`] before the account's
//! stake changes.

use soroban_sdk::{contracttype, Env, I256};

use crate::{rewards, ContractError};

/// Global ledger state, one per contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Sum of every account's `staked`.
    pub total_staked: i128,
    /// Reward tokens emitted per second across all stakers.
    pub reward_rate: i128,
    /// Cumulative reward per staked unit, scaled by [`rewards::PRECISION`].
    pub reward_per_token_stored: I256,
    pub last_update_time: u64,
}

/// Per-account stake and reward record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountState {
    pub staked: i128,
    /// Accumulator value at the account's last settlement.
    pub reward_per_token_paid: I256,
    /// Settled but unclaimed rewards.
    pub rewards: i128,
}

impl AccountState {
    /// An account that has never staked.
    pub fn new(env: &Env) -> Self {
        Self {
            staked: 0,
            reward_per_token_paid: I256::from_i128(env, 0),
            rewards: 0,
        }
    }
}

impl PoolState {
    pub fn new(env: &Env, reward_rate: i128, now: u64) -> Self {
        Self {
            total_staked: 0,
            reward_rate,
            reward_per_token_stored: I256::from_i128(env, 0),
            last_update_time: now,
        }
    }

    /// Accumulator value as of `now`, without mutating anything.
    pub fn reward_per_token_at(&self, env: &Env, now: u64) -> I256 {
        let elapsed = now.saturating_sub(self.last_update_time);
        rewards::compute_reward_per_token(
            env,
            &self.reward_per_token_stored,
            self.reward_rate,
            elapsed,
            self.total_staked,
        )
    }

    /// Advance the accumulator to `now` at the current rate.
    ///
    /// With nothing staked only the timestamp moves. The timestamp never moves
    /// backwards. Cannot fail, so rate changes and withdrawals are never held
    /// up by the size of the accumulator.
    pub fn settle(&mut self, env: &Env, now: u64) {
        self.reward_per_token_stored = self.reward_per_token_at(env, now);
        self.last_update_time = self.last_update_time.max(now);
    }

    /// Settle the pool, then credit `account` with everything it earned since
    /// its last snapshot and move the snapshot forward.
    ///
    /// Returns the amount newly credited.
    pub fn settle_account(
        &mut self,
        env: &Env,
        account: &mut AccountState,
        now: u64,
    ) -> Result<i128, ContractError> {
        self.settle(env, now);

        let owed = rewards::earned(
            env,
            account.staked,
            &self.reward_per_token_stored,
            &account.reward_per_token_paid,
            account.rewards,
        )
        .ok_or(ContractError::ArithmeticOverflow)?;

        let credited = owed
            .checked_sub(account.rewards)
            .ok_or(ContractError::ArithmeticOverflow)?;
        account.rewards = owed;
        account.reward_per_token_paid = self.reward_per_token_stored.clone();
        Ok(credited)
    }

    /// What `account` would be owed if settled at `now`.
    pub fn earned(
        &self,
        env: &Env,
        account: &AccountState,
        now: u64,
    ) -> Result<i128, ContractError> {
        rewards::earned(
            env,
            account.staked,
            &self.reward_per_token_at(env, now),
            &account.reward_per_token_paid,
            account.rewards,
        )
        .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Replace the emission rate. Time already elapsed is settled at the old
    /// rate first.
    pub fn set_reward_rate(&mut self, env: &Env, new_rate: i128, now: u64) {
        self.settle(env, now);
        self.reward_rate = new_rate;
    }
}
