use cosmwasm_std::Uint128;
use cw20::Cw20ReceiveMsg;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// contract/multisig address that allowed to control settings
    pub owner: String,
    /// bro token address
    pub bro_token: String,
    /// bro amount per uusd
    pub bro_amount_per_uusd: Uint128,
    /// bro amount for purchase per nft
    pub bro_amount_per_nft: Uint128,
    /// address for sending received ust
    pub ust_receiver: String,
    /// rewards pool address
    pub rewards_pool_contract: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct WhitelistedAccountInfo {
    pub address: String,
    pub owned_nfts_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    Receive(Cw20ReceiveMsg),
    RegisterAccounts {
        accounts: Vec<WhitelistedAccountInfo>,
    },
    Purchase {},
    WithdrawRemainingBalance {},
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
