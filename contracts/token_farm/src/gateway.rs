//! Capability over the two external token contracts.
//!
//! Every call goes through the generated `try_*` client methods so a refusal
//! by the token (missing authorisation, short balance, no mint rights) comes
//! back as [`ContractError::TransferFailed`] instead of trapping.

use soroban_sdk::{log, token, Address, Env};

use crate::ledger::FarmConfig;
use crate::ContractError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Asset {
    Stake,
    Reward,
}

pub struct TokenGateway<'a> {
    env: &'a Env,
    config: &'a FarmConfig,
}

impl<'a> TokenGateway<'a> {
    pub fn new(env: &'a Env, config: &'a FarmConfig) -> Self {
        Self { env, config }
    }

    fn address(&self, asset: Asset) -> &Address {
        match asset {
            Asset::Stake => &self.config.stake_token,
            Asset::Reward => &self.config.reward_token,
        }
    }

    pub fn balance_of(&self, asset: Asset, account: &Address) -> i128 {
        token::Client::new(self.env, self.address(asset)).balance(account)
    }

    /// Pull `amount` of `asset` from `from` into this contract.
    ///
    /// `from` must have authorised the movement.
    pub fn transfer_from(
        &self,
        asset: Asset,
        from: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let this = self.env.current_contract_address();
        match token::Client::new(self.env, self.address(asset)).try_transfer(from, &this, &amount)
        {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "token pull refused", from.clone(), amount);
                Err(ContractError::TransferFailed)
            }
        }
    }

    /// Send `amount` of `asset` held by this contract to `to`.
    pub fn transfer(&self, asset: Asset, to: &Address, amount: i128) -> Result<(), ContractError> {
        let this = self.env.current_contract_address();
        match token::Client::new(self.env, self.address(asset)).try_transfer(&this, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "token payout refused", to.clone(), amount);
                Err(ContractError::TransferFailed)
            }
        }
    }

    /// Mint fresh reward tokens to `to`. Requires this contract to hold the
    /// reward token's issuance rights.
    pub fn issue(&self, to: &Address, amount: i128) -> Result<(), ContractError> {
        match token::StellarAssetClient::new(self.env, &self.config.reward_token)
            .try_mint(to, &amount)
        {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "reward issuance refused", to.clone(), amount);
                Err(ContractError::TransferFailed)
            }
        }
    }
}
