#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, I256,
};
use token_farm::{TokenFarmContract, TokenFarmContractClient};

const STARTING_BALANCE: i128 = 1_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { who: u8, amount: u32 },
    Withdraw { who: u8, amount: u32 },
    Claim { who: u8 },
    Exit { who: u8 },
    SetRate { rate: u16 },
    Advance { seconds: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(TokenFarmContract, ());
    let client = TokenFarmContractClient::new(&env, &contract_id);
    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(contract_id.clone())
        .address();

    let admin = Address::generate(&env);
    client.initialize(&admin, &stake_token, &reward_token, &1_000i128);

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &STARTING_BALANCE);
        users.push(user);
    }
    let stake = TokenClient::new(&env, &stake_token);

    let mut now = 0u64;
    let mut last_rpt = I256::from_i128(&env, 0);

    // Errors are expected for bad inputs; what must never happen is a trap or
    // a broken invariant.
    for action in actions {
        match action {
            FuzzAction::Stake { who, amount } => {
                let user = &users[who as usize % users.len()];
                let _ = client.try_stake(user, &i128::from(amount));
            }
            FuzzAction::Withdraw { who, amount } => {
                let user = &users[who as usize % users.len()];
                let _ = client.try_withdraw(user, &i128::from(amount));
            }
            FuzzAction::Claim { who } => {
                let user = &users[who as usize % users.len()];
                assert!(client.try_get_reward(user).is_ok());
            }
            FuzzAction::Exit { who } => {
                let user = &users[who as usize % users.len()];
                let _ = client.try_exit(user);
            }
            FuzzAction::SetRate { rate } => {
                client.set_reward_rate(&admin, &i128::from(rate));
            }
            FuzzAction::Advance { seconds } => {
                now += u64::from(seconds);
                env.ledger().set_timestamp(now);
            }
        }

        let total = client.total_staked();
        let sum: i128 = users.iter().map(|u| client.staked_balance(u)).sum();
        assert_eq!(total, sum);
        assert_eq!(total, stake.balance(&contract_id));

        let rpt = client.reward_per_token();
        assert!(rpt >= last_rpt);
        last_rpt = rpt;
    }
});
