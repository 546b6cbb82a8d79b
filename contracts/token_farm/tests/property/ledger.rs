#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for stake bookkeeping.
//!
//! Invariants tested:
//! - `total_staked` always equals the sum of every account's stake
//! - The contract's stake-token balance always equals `total_staked`
//! - A rejected stake or withdrawal leaves every ledger field untouched
//! - Zero or negative amounts are always rejected with `InvalidAmount`

use proptest::prelude::*;
use token_farm::ContractError;

use crate::harness::{op_strategy, Farm, Op, STARTING_BALANCE};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// For any sequence of operations, totals stay in step with the accounts
    /// and with the tokens the contract actually holds.
    #[test]
    fn prop_total_staked_is_sum_of_stakes(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut farm = Farm::new(10);

        for op in ops {
            match op {
                Op::Stake(who, amount) => {
                    let _ = farm.client.try_stake(&farm.stakers[who], &amount);
                }
                Op::Withdraw(who, amount) => {
                    let _ = farm.client.try_withdraw(&farm.stakers[who], &amount);
                }
                Op::Claim(who) => {
                    farm.client.get_reward(&farm.stakers[who]);
                }
                Op::Exit(who) => {
                    let _ = farm.client.try_exit(&farm.stakers[who]);
                }
                Op::Advance(seconds) => farm.advance(seconds),
            }

            let total = farm.client.total_staked();
            prop_assert_eq!(total, farm.staked_sum());
            prop_assert_eq!(total, farm.stake_balance(&farm.client.address));
            for staker in farm.stakers.iter() {
                prop_assert_eq!(
                    farm.stake_balance(staker) + farm.client.staked_balance(staker),
                    STARTING_BALANCE
                );
            }
        }
    }

    /// Withdrawing more than is staked fails with `InsufficientStake` and
    /// changes nothing.
    #[test]
    fn prop_overdraw_is_rejected_without_side_effects(
        staked in 1i128..=10_000,
        excess in 1i128..=10_000,
        wait in 0u64..=10_000,
    ) {
        let mut farm = Farm::new(10);
        let who = farm.stakers[0].clone();
        farm.client.stake(&who, &staked);
        farm.advance(wait);

        let before = farm.snapshot(&who);
        let last_update = farm.client.last_update_time();
        let result = farm.client.try_withdraw(&who, &(staked + excess));

        prop_assert!(matches!(result, Err(Ok(ContractError::InsufficientStake))));
        prop_assert_eq!(farm.snapshot(&who), before);
        prop_assert_eq!(farm.client.last_update_time(), last_update);
    }

    /// Non-positive stake amounts are always rejected and never mutate state.
    #[test]
    fn prop_non_positive_stake_rejected(amount in i128::MIN..=0i128, wait in 0u64..=1_000) {
        let mut farm = Farm::new(10);
        let who = farm.stakers[1].clone();
        farm.client.stake(&who, &100);
        farm.advance(wait);

        let before = farm.snapshot(&who);
        let result = farm.client.try_stake(&who, &amount);

        prop_assert!(matches!(result, Err(Ok(ContractError::InvalidAmount))));
        prop_assert_eq!(farm.snapshot(&who), before);
    }
}
