use cosmwasm_std::Uint128;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    pub owner: String,
    /// block height distributions start from
    pub distribution_genesis_block: u64,
    pub epoch_manager_contract: String,
    pub rewards_contract: String,
    pub staking_contract: String,
    /// bro amount sent to staking per epoch
    pub staking_distribution_amount: Uint128,
    pub bonding_contract: String,
    /// bro amount sent to bonding per epoch
    pub bonding_distribution_amount: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    Distribute {},
    UpdateConfig {
        owner: Option<String>,
        epoch_manager_contract: Option<String>,
        rewards_contract: Option<String>,
        staking_contract: Option<String>,
        staking_distribution_amount: Option<Uint128>,
        bonding_contract: Option<String>,
        bonding_distribution_amount: Option<Uint128>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    LastDistribution {},
}
