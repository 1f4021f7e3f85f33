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
    /// treasury contract address
    pub treasury_contract: String,
    /// astroport factory contract address
    pub astroport_factory: String,
    /// price oracle contract address
    pub oracle_contract: String,
    /// discount percentage for ust bonding
    pub ust_bonding_discount: Decimal,
    /// minimum amount of bro to receive via bonding
    pub min_bro_payout: Uint128,
    /// bonding mode
    pub bonding_mode: BondingModeMsg,
}

/// ## BondingModeMsg
/// This structure describes the bonding contract mode.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BondingModeMsg {
    /// Enables both ust and lp bonding option.
    /// Exchanged bro tokens will become claimable after vesting period.
    Normal {
        /// distributed reward percentage for ust bonding balance
        ust_bonding_reward_ratio: Decimal,
        /// bro/ust lp token address
        lp_token: String,
        /// discount percentage for lp bonding
        lp_bonding_discount: Decimal,
        /// vesting period for withdrawal
        vesting_period_blocks: u64,
    },
    /// Enables only ust bonding option.
    /// Exchanged bro tokens will be locked in staking contract for configured amount of epochs
    /// and then claimable with extra bro/bbro reward from it.
    Community {
        /// staking contract address
        staking_contract: String,
        /// how many epochs specified amount will be locked
        epochs_locked: u64,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    Receive(Cw20ReceiveMsg),
    UstBond {},
    Claim {},
    ProposeNewOwner {
        new_owner: String,
        expires_in_blocks: u64,
    },
    DropOwnershipProposal {},
    ClaimOwnership {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    State {},
    OwnershipProposal {},
}
