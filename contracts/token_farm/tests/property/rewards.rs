#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for reward accrual.
//!
//! Invariants tested:
//! - Rewards paid plus rewards owed never exceed `rate × time with stakers`
//! - `earned` is non-decreasing in time for a fixed stake and rate
//! - `reward_per_token` never decreases
//! - A claim pays exactly what was owed and leaves nothing owed

use proptest::prelude::*;

use crate::harness::{op_strategy, Farm, Op};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Rounding only ever goes against the stakers: the farm never hands out
    /// more than it emitted.
    #[test]
    fn prop_distribution_never_exceeds_emission(
        rate in 0i128..=1_000,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut farm = Farm::new(rate);
        let mut emitted: i128 = 0;
        let mut last_rpt = farm.client.reward_per_token();

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
                Op::Advance(seconds) => {
                    if farm.client.total_staked() > 0 {
                        emitted += rate * i128::from(seconds);
                    }
                    farm.advance(seconds);
                }
            }

            let rpt = farm.client.reward_per_token();
            prop_assert!(rpt >= last_rpt, "accumulator went backwards");
            last_rpt = rpt;

            let distributed: i128 = farm
                .stakers
                .iter()
                .map(|s| farm.reward_balance(s) + farm.client.earned(s))
                .sum();
            prop_assert!(distributed <= emitted, "{} > {}", distributed, emitted);
        }
    }

    /// With stake and rate fixed, `earned` never decreases as time passes.
    #[test]
    fn prop_earned_monotonic_in_time(
        rate in 0i128..=1_000,
        mine in 1i128..=100_000,
        others in 0i128..=100_000,
        steps in prop::collection::vec(1u64..=86_400, 1..20),
    ) {
        let mut farm = Farm::new(rate);
        let me = farm.stakers[0].clone();
        farm.client.stake(&me, &mine);
        if others > 0 {
            farm.client.stake(&farm.stakers[1].clone(), &others);
        }

        let mut last = farm.client.earned(&me);
        for step in steps {
            farm.advance(step);
            let now = farm.client.earned(&me);
            prop_assert!(now >= last, "{} -> {}", last, now);
            last = now;
        }
    }

    /// A claim moves exactly the owed amount and zeroes the balance.
    #[test]
    fn prop_claim_pays_exactly_owed(
        rate in 1i128..=1_000,
        amount in 1i128..=100_000,
        wait in 1u64..=100_000,
    ) {
        let mut farm = Farm::new(rate);
        let me = farm.stakers[2].clone();
        farm.client.stake(&me, &amount);
        farm.advance(wait);

        let owed = farm.client.earned(&me);
        let paid = farm.client.get_reward(&me);

        prop_assert_eq!(paid, owed);
        prop_assert_eq!(farm.reward_balance(&me), owed);
        prop_assert_eq!(farm.client.earned(&me), 0);
    }
}
