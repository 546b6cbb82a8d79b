use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::accrual::{AccountState, PoolState};
use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");

// Per-account persistent storage uses tuple keys:  (prefix, account_address)
const ACCOUNT: Symbol = symbol_short!("ACCT");

const DAY_IN_LEDGERS: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;
const TTL_THRESHOLD: u32 = TTL_EXTEND_TO - DAY_IN_LEDGERS;

/// Token wiring fixed at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmConfig {
    pub stake_token: Address,
    pub reward_token: Address,
}

fn account_key(account: &Address) -> (Symbol, Address) {
    (ACCOUNT, account.clone())
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Global records ───────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn save_config(env: &Env, config: &FarmConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance_ttl(env);
}

pub fn load_config(env: &Env) -> Result<FarmConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_pool(env: &Env, pool: &PoolState) {
    env.storage().instance().set(&POOL, pool);
    extend_instance_ttl(env);
}

pub fn load_pool(env: &Env) -> Result<PoolState, ContractError> {
    env.storage()
        .instance()
        .get(&POOL)
        .ok_or(ContractError::NotInitialized)
}

// ── Account records ──────────────────────────────────────────────────────────

/// Load an account's record; accounts that never staked read as all-zero.
pub fn load_account(env: &Env, account: &Address) -> AccountState {
    env.storage()
        .persistent()
        .get(&account_key(account))
        .unwrap_or_else(|| AccountState::new(env))
}

pub fn save_account(env: &Env, account: &Address, state: &AccountState) {
    let key = account_key(account);
    env.storage().persistent().set(&key, state);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Balance mutations ────────────────────────────────────────────────────────

/// Guard: every stake, withdrawal and funding amount must be positive.
pub fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// Add `amount` to both the account and the pool total.
///
/// The account must already be settled.
pub fn credit(
    pool: &mut PoolState,
    account: &mut AccountState,
    amount: i128,
) -> Result<(), ContractError> {
    require_positive(amount)?;
    let staked = account
        .staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let total = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    account.staked = staked;
    pool.total_staked = total;
    Ok(())
}

/// Remove `amount` from both the account and the pool total.
///
/// Fails with `InsufficientStake` when the account holds less than `amount`;
/// nothing is modified in that case.
pub fn debit(
    pool: &mut PoolState,
    account: &mut AccountState,
    amount: i128,
) -> Result<(), ContractError> {
    require_positive(amount)?;
    if amount > account.staked {
        return Err(ContractError::InsufficientStake);
    }
    let total = pool
        .total_staked
        .checked_sub(amount)
        .filter(|total| *total >= 0)
        .ok_or(ContractError::ArithmeticOverflow)?;

    account.staked -= amount;
    pool.total_staked = total;
    Ok(())
}
