#![no_std]

pub mod accrual;
pub mod events;
pub mod gateway;
pub mod ledger;
pub mod rewards;

use common::{ownership, reentrancy, OwnershipError};
use soroban_sdk::{contract, contractimpl, contracttype, log, Address, Env, I256};

use accrual::PoolState;
use gateway::{Asset, TokenGateway};
use ledger::FarmConfig;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientStake = 5,
    TransferFailed = 6,
    TokensIdentical = 7,
    Reentrancy = 8,
    ArithmeticOverflow = 9,
    NoPendingAdmin = 10,
    InvalidRate = 11,
}

impl From<OwnershipError> for ContractError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NoAdmin => ContractError::NotInitialized,
            OwnershipError::NoPendingAdmin => ContractError::NoPendingAdmin,
            OwnershipError::NotAdmin | OwnershipError::NotPendingAdmin => {
                ContractError::Unauthorized
            }
        }
    }
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of an account's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub earned: i128,
}

/// What `exit` moved back to the caller.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExitReceipt {
    pub withdrawn: i128,
    pub reward: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TokenFarmContract;

#[contractimpl]
impl TokenFarmContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `stake_token`  – SAC address of the token users stake.
    /// * `reward_token` – SAC address of the token paid out as rewards. The
    ///   farm should be its admin so that shortfalls in the pool can be
    ///   minted.
    /// * `reward_rate`  – tokens emitted **per second** across all stakers.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        if ledger::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_rate < 0 {
            return Err(ContractError::InvalidRate);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        let now = env.ledger().timestamp();

        ledger::save_config(
            &env,
            &FarmConfig {
                stake_token: stake_token.clone(),
                reward_token: reward_token.clone(),
            },
        );
        ledger::save_pool(&env, &PoolState::new(&env, reward_rate, now));
        ownership::set_admin(&env, &admin);

        events::publish_initialized(&env, admin, stake_token, reward_token, reward_rate);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// The caller's rewards are settled against their old stake before the
    /// deposit is recorded, so the new tokens never earn retroactively.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            Self::stake_inner(&env, &staker, amount)
        })
    }

    /// Return `amount` staked tokens to the caller.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            Self::withdraw_inner(&env, &staker, amount)
        })
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `staker` is owed and return the amount.
    ///
    /// Returns 0 without reverting when nothing is owed.
    pub fn get_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            Self::get_reward_inner(&env, &staker)
        })
    }

    /// Withdraw the full stake and claim all rewards in one call.
    ///
    /// Fails with `InvalidAmount` when nothing is staked, like a zero
    /// withdrawal would.
    pub fn exit(env: Env, staker: Address) -> Result<ExitReceipt, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            let withdrawn = ledger::load_account(&env, &staker).staked;
            Self::withdraw_inner(&env, &staker, withdrawn)?;
            let reward = Self::get_reward_inner(&env, &staker)?;
            Ok(ExitReceipt { withdrawn, reward })
        })
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the account's current staked balance.
    pub fn staked_balance(env: Env, account: Address) -> i128 {
        ledger::load_account(&env, &account).staked
    }

    /// Return the sum of all currently staked tokens.
    pub fn total_staked(env: Env) -> i128 {
        ledger::load_pool(&env).map_or(0, |pool| pool.total_staked)
    }

    /// Return the current global reward rate (tokens per second).
    pub fn reward_rate(env: Env) -> i128 {
        ledger::load_pool(&env).map_or(0, |pool| pool.reward_rate)
    }

    /// Return the timestamp the accumulator was last advanced to.
    pub fn last_update_time(env: Env) -> u64 {
        ledger::load_pool(&env).map_or(0, |pool| pool.last_update_time)
    }

    /// Return the accumulator projected to the current ledger time, scaled by
    /// [`rewards::PRECISION`].
    pub fn reward_per_token(env: Env) -> Result<I256, ContractError> {
        Ok(ledger::load_pool(&env)?.reward_per_token_at(&env, env.ledger().timestamp()))
    }

    /// Return real-time owed rewards for an account without mutating state.
    pub fn earned(env: Env, account: Address) -> Result<i128, ContractError> {
        let pool = ledger::load_pool(&env)?;
        pool.earned(
            &env,
            &ledger::load_account(&env, &account),
            env.ledger().timestamp(),
        )
    }

    /// Return the combined position for an account.
    pub fn get_staker_info(env: Env, account: Address) -> Result<StakerInfo, ContractError> {
        let pool = ledger::load_pool(&env)?;
        let state = ledger::load_account(&env, &account);
        Ok(StakerInfo {
            staked: state.staked,
            earned: pool.earned(&env, &state, env.ledger().timestamp())?,
        })
    }

    /// Return the reward tokens the contract currently holds for payouts.
    pub fn reward_pool(env: Env) -> Result<i128, ContractError> {
        let config = ledger::load_config(&env)?;
        Ok(TokenGateway::new(&env, &config)
            .balance_of(Asset::Reward, &env.current_contract_address()))
    }

    /// Return the address of the token users stake.
    pub fn stake_token(env: Env) -> Result<Address, ContractError> {
        Ok(ledger::load_config(&env)?.stake_token)
    }

    /// Return the address of the token rewards are paid in.
    pub fn reward_token(env: Env) -> Result<Address, ContractError> {
        Ok(ledger::load_config(&env)?.reward_token)
    }

    /// Check if the contract has been initialized.
    pub fn is_initialized(env: Env) -> bool {
        ledger::is_initialized(&env)
    }

    /// Get the current admin address.
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        ownership::get_admin(&env).ok_or(ContractError::NotInitialized)
    }

    /// Get the pending admin address, if any.
    pub fn get_pending_admin(env: Env) -> Option<Address> {
        ownership::get_pending_admin(&env)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            ownership::propose(&env, &current_admin, &new_admin)
                .map_err(|err| Self::refused(&env, &current_admin, err))?;
            events::publish_admin_transfer_proposed(&env, current_admin.clone(), new_admin.clone());
            Ok(())
        })
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            let old_admin = ownership::accept(&env, &new_admin)
                .map_err(|err| Self::refused(&env, &new_admin, err))?;
            events::publish_admin_transfer_accepted(&env, old_admin, new_admin.clone());
            Ok(())
        })
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            let pending = ownership::cancel(&env, &current_admin)
                .map_err(|err| Self::refused(&env, &current_admin, err))?;
            events::publish_admin_transfer_cancelled(&env, current_admin.clone(), pending);
            Ok(())
        })
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Update the reward emission rate.
    ///
    /// The global accumulator is flushed at the current rate *before* the
    /// rate changes, so existing stakers never lose or gain rewards
    /// retroactively.
    pub fn set_reward_rate(env: Env, caller: Address, new_rate: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidRate);
        }

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            let mut pool = ledger::load_pool(&env)?;
            pool.set_reward_rate(&env, new_rate, env.ledger().timestamp());
            ledger::save_pool(&env, &pool);

            events::publish_reward_rate_updated(&env, new_rate);
            Ok(())
        })
    }

    /// Move `amount` reward tokens from the admin into the payout pool.
    ///
    /// Accrual is driven by the rate alone; funding only makes sure claims
    /// can be paid without minting.
    pub fn add_rewards(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        ledger::require_positive(amount)?;

        reentrancy::guarded(&env, ContractError::Reentrancy, || {
            let config = ledger::load_config(&env)?;
            TokenGateway::new(&env, &config).transfer_from(Asset::Reward, &caller, amount)?;

            events::publish_rewards_added(&env, caller.clone(), amount);
            Ok(())
        })
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !ledger::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        ownership::require_admin(env, caller).map_err(|err| Self::refused(env, caller, err))
    }

    fn refused(env: &Env, caller: &Address, err: OwnershipError) -> ContractError {
        log!(env, "admin operation refused", caller.clone());
        err.into()
    }

    /// Settle → record deposit → pull tokens.
    fn stake_inner(env: &Env, staker: &Address, amount: i128) -> Result<(), ContractError> {
        ledger::require_positive(amount)?;

        let config = ledger::load_config(env)?;
        let mut pool = ledger::load_pool(env)?;
        let mut account = ledger::load_account(env, staker);

        pool.settle_account(env, &mut account, env.ledger().timestamp())?;
        ledger::credit(&mut pool, &mut account, amount)?;
        ledger::save_pool(env, &pool);
        ledger::save_account(env, staker, &account);

        TokenGateway::new(env, &config).transfer_from(Asset::Stake, staker, amount)?;

        events::publish_staked(env, staker.clone(), amount, pool.total_staked);
        Ok(())
    }

    /// Settle → record withdrawal → return tokens.
    fn withdraw_inner(env: &Env, staker: &Address, amount: i128) -> Result<(), ContractError> {
        ledger::require_positive(amount)?;

        let config = ledger::load_config(env)?;
        let mut pool = ledger::load_pool(env)?;
        let mut account = ledger::load_account(env, staker);

        pool.settle_account(env, &mut account, env.ledger().timestamp())?;
        ledger::debit(&mut pool, &mut account, amount).inspect_err(|_| {
            log!(env, "withdrawal exceeds stake", staker.clone(), amount);
        })?;
        ledger::save_pool(env, &pool);
        ledger::save_account(env, staker, &account);

        TokenGateway::new(env, &config).transfer(Asset::Stake, staker, amount)?;

        events::publish_withdrawn(env, staker.clone(), amount, pool.total_staked);
        Ok(())
    }

    /// Settle → zero the owed balance → pay from the pool, minting any
    /// shortfall.
    fn get_reward_inner(env: &Env, staker: &Address) -> Result<i128, ContractError> {
        let config = ledger::load_config(env)?;
        let mut pool = ledger::load_pool(env)?;
        let mut account = ledger::load_account(env, staker);

        pool.settle_account(env, &mut account, env.ledger().timestamp())?;
        let owed = account.rewards;
        account.rewards = 0;
        ledger::save_pool(env, &pool);
        ledger::save_account(env, staker, &account);

        if owed <= 0 {
            return Ok(0);
        }

        let gateway = TokenGateway::new(env, &config);
        let available = gateway
            .balance_of(Asset::Reward, &env.current_contract_address())
            .max(0);
        let from_pool = owed.min(available);
        let issued = owed - from_pool;

        if from_pool > 0 {
            gateway.transfer(Asset::Reward, staker, from_pool)?;
        }
        if issued > 0 {
            gateway.issue(staker, issued)?;
        }

        events::publish_reward_paid(env, staker.clone(), owed, issued);
        Ok(owed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
