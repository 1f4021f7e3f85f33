use cosmwasm_std::{Binary, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    pub gov_contract: String,
    pub bro_token: String,
    /// max amount of bro a single distribution can spend
    pub spend_limit: Uint128,
    /// addresses allowed to call DistributeRewards
    pub whitelist: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Only gov contract. `new_gov_contract` takes effect immediately.
    UpdateConfig {
        new_gov_contract: Option<String>,
        bro_token: Option<String>,
        spend_limit: Option<Uint128>,
    },
    AddDistributor {
        distributor: String,
    },
    RemoveDistributor {
        distributor: String,
    },
    DistributeRewards {
        distributions: Vec<DistributeRewardMsg>,
    },
}

impl ExecuteMsg {
    pub fn update_gov_contract(new_gov_contract: String) -> Self {
        ExecuteMsg::UpdateConfig {
            new_gov_contract: Some(new_gov_contract),
            bro_token: None,
            spend_limit: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct DistributeRewardMsg {
    pub contract: String,
    pub amount: Uint128,
    pub msg: Binary,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigResponse {
    pub gov_contract: String,
    pub bro_token: String,
    pub spend_limit: Uint128,
    pub whitelist: Vec<String>,
}
