use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env, I256};
use token_farm::{TokenFarmContract, TokenFarmContractClient};

pub const STAKERS: usize = 3;
pub const STARTING_BALANCE: i128 = 1_000_000;

pub struct Farm {
    pub env: Env,
    pub client: TokenFarmContractClient<'static>,
    pub stake_token: Address,
    pub reward_token: Address,
    pub stakers: [Address; STAKERS],
    pub now: u64,
}

impl Farm {
    /// Deploys the farm with both tokens and funds every staker.
    pub fn new(reward_rate: i128) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(0);

        let contract_id = env.register(TokenFarmContract, ());
        let client = TokenFarmContractClient::new(&env, &contract_id);
        let stake_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let reward_token = env
            .register_stellar_asset_contract_v2(contract_id.clone())
            .address();

        let admin = Address::generate(&env);
        client.initialize(&admin, &stake_token, &reward_token, &reward_rate);

        let stakers = [
            Address::generate(&env),
            Address::generate(&env),
            Address::generate(&env),
        ];
        for staker in stakers.iter() {
            StellarAssetClient::new(&env, &stake_token).mint(staker, &STARTING_BALANCE);
        }

        Farm {
            env,
            client,
            stake_token,
            reward_token,
            stakers,
            now: 0,
        }
    }

    pub fn advance(&mut self, seconds: u64) {
        self.now += seconds;
        self.env.ledger().set_timestamp(self.now);
    }

    pub fn stake_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.stake_token).balance(who)
    }

    pub fn reward_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(who)
    }

    pub fn staked_sum(&self) -> i128 {
        self.stakers
            .iter()
            .map(|s| self.client.staked_balance(s))
            .sum()
    }

    /// Everything the ledger can see for one account.
    pub fn snapshot(&self, who: &Address) -> (i128, i128, i128, I256) {
        (
            self.client.staked_balance(who),
            self.client.total_staked(),
            self.client.earned(who),
            self.client.reward_per_token(),
        )
    }
}

#[derive(Clone, Debug)]
pub enum Op {
    Stake(usize, i128),
    Withdraw(usize, i128),
    Claim(usize),
    Exit(usize),
    Advance(u64),
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..STAKERS, 1i128..=5_000).prop_map(|(who, amount)| Op::Stake(who, amount)),
        2 => (0..STAKERS, 1i128..=6_000).prop_map(|(who, amount)| Op::Withdraw(who, amount)),
        1 => (0..STAKERS).prop_map(Op::Claim),
        1 => (0..STAKERS).prop_map(Op::Exit),
        3 => (1u64..=3_600).prop_map(Op::Advance),
    ]
}
