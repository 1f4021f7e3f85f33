use cosmwasm_std::{Decimal, Uint128};
use cw20::Cw20ReceiveMsg;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ## InstantiateMsg
/// This structure describes the basic settings for creating a contract.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// contract/multisig address that allowed to control settings
    pub owner: String,
    /// bro token address
    pub bro_token: String,
    /// rewards pool address
    pub rewards_pool_contract: String,
    /// bbro minter address
    pub bbro_minter_contract: String,
    /// epoch manager contract address
    pub epoch_manager_contract: String,
    /// community bonding address,
    /// staking from the community bonding contract is disabled while unset
    pub community_bonding_contract: Option<String>,
    /// vesting period for withdrawal
    pub unstake_period_blocks: u64,
    /// minimum staking amount
    pub min_staking_amount: Uint128,
    /// min lockup period
    pub min_lockup_period_epochs: u64,
    /// max lockup period
    pub max_lockup_period_epochs: u64,
    /// base rate for bbro premium reward calculation
    pub base_rate: Decimal,
    /// linear growth for bbro premium reward calculation
    pub linear_growth: Decimal,
    /// exponential growth for bbro premium reward calculation
    pub exponential_growth: Decimal,
}

/// ## ExecuteMsg
/// Only the owner related part of the interface is listed with docs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    Receive(Cw20ReceiveMsg),
    LockupStaked {
        amount: Uint128,
        epochs_locked: u64,
    },
    Unstake {
        amount: Uint128,
    },
    Withdraw {},
    ClaimBroRewards {},
    ClaimBbroRewards {},
    /// ## Executor
    /// Only owner can execute this function
    UpdateConfig {
        paused: Option<bool>,
        unstake_period_blocks: Option<u64>,
        min_staking_amount: Option<Uint128>,
        min_lockup_period_epochs: Option<u64>,
        max_lockup_period_epochs: Option<u64>,
        base_rate: Option<Decimal>,
        linear_growth: Option<Decimal>,
        exponential_growth: Option<Decimal>,
        community_bonding_contract: Option<String>,
    },
    /// ## Executor
    /// Only owner can execute this function
    ProposeNewOwner {
        new_owner: String,
        expires_in_blocks: u64,
    },
    DropOwnershipProposal {},
    /// ## Executor
    /// Only address proposed as a new owner can execute this function
    ClaimOwnership {},
}

impl ExecuteMsg {
    /// `UpdateConfig` touching only the community bonding address.
    pub fn set_community_bonding(contract: String) -> Self {
        ExecuteMsg::UpdateConfig {
            paused: None,
            unstake_period_blocks: None,
            min_staking_amount: None,
            min_lockup_period_epochs: None,
            max_lockup_period_epochs: None,
            base_rate: None,
            linear_growth: None,
            exponential_growth: None,
            community_bonding_contract: Some(contract),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    State {},
    OwnershipProposal {},
}
