use soroban_sdk::{Env, I256};

/// Fixed-point scaling factor.
///
/// Reward-per-token values are stored multiplied by this constant so that
/// `rate × elapsed / total_staked` keeps eighteen decimal places. Every
/// division rounds toward zero, so stakers are never credited more than was
/// emitted.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// [`PRECISION`] as a 256-bit host value.
pub fn precision(env: &Env) -> I256 {
    I256::from_i128(env, PRECISION)
}

// ── Core reward engine ──────────────────────────────────────────────────────

/// Recompute the global `reward_per_token_stored` value.
///
/// ```text
/// Δrpt = reward_rate × elapsed_seconds × PRECISION / total_staked
/// new_rpt = stored_rpt + Δrpt
/// ```
///
/// When `total_staked` is zero `stored` is returned unchanged: nobody is
/// staked, so nothing is distributed for the interval.
///
/// The accumulator is kept in 256 bits. A single interval contributes at most
/// `i128::MAX × u64::MAX × PRECISION` (about 3.1e75), and the elapsed times
/// of all intervals sum to at most `u64::MAX`, so the running total stays
/// below `I256::MAX` (about 5.8e76) for any non-negative rate.
///
/// # Arguments
/// * `stored`       – current `reward_per_token_stored` (scaled by PRECISION)
/// * `reward_rate`  – tokens emitted per second across *all* stakers
/// * `elapsed`      – seconds since the last update
/// * `total_staked` – sum of all active stakes
pub fn compute_reward_per_token(
    env: &Env,
    stored: &I256,
    reward_rate: i128,
    elapsed: u64,
    total_staked: i128,
) -> I256 {
    if total_staked <= 0 || elapsed == 0 || reward_rate <= 0 {
        return stored.clone();
    }

    let delta = I256::from_i128(env, reward_rate)
        .mul(&I256::from_i128(env, i128::from(elapsed)))
        .mul(&precision(env))
        .div(&I256::from_i128(env, total_staked));

    stored.add(&delta)
}

/// Calculate the total rewards owed to a single staker.
///
/// ```text
/// earned = staked × (current_rpt − user_rpt_paid) / PRECISION + user_earned
/// ```
///
/// Only the accumulation since the user's last snapshot is counted, so
/// earlier intervals are never paid twice. The product is formed in 256 bits
/// and only the final amount is narrowed.
///
/// Returns `None` if the amount owed does not fit in `i128`.
pub fn earned(
    env: &Env,
    staked: i128,
    current_rpt: &I256,
    user_rpt_paid: &I256,
    user_earned: i128,
) -> Option<i128> {
    if staked <= 0 {
        return Some(user_earned);
    }

    let new_rewards = I256::from_i128(env, staked)
        .mul(&current_rpt.sub(user_rpt_paid))
        .div(&precision(env))
        .to_i128()?;

    user_earned.checked_add(new_rewards)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
