use cosmwasm_std::Uint128;
use cw20_base::msg::InstantiateMsg as TokenInstantiateMsg;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ## InstantiateMsg
/// bbro-minter starts without a token: `bbro_token` is set through
/// [`ExecuteMsg::UpdateConfig`] once the token contract exists, so
/// `gov_contract` has to be an address able to sign that call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// contract/multisig address that allowed to control settings
    pub gov_contract: String,
    /// list of whitelisted addresses allowed to execute mint/burn functions
    pub whitelist: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// ## Executor
    /// Only gov contract can execute this function
    InstantiateToken {
        code_id: u64,
        token_instantiate_msg: TokenInstantiateMsg,
    },
    /// ## Description
    /// Updates settings. Setting `new_gov_contract` hands control over
    /// immediately, there is no claim step.
    /// ## Executor
    /// Only gov contract can execute this function
    UpdateConfig {
        new_gov_contract: Option<String>,
        bbro_token: Option<String>,
    },
    /// ## Executor
    /// Only gov contract can execute this function
    AddMinter {
        minter: String,
    },
    /// ## Executor
    /// Only gov contract can execute this function
    RemoveMinter {
        minter: String,
    },
    Mint {
        recipient: String,
        amount: Uint128,
    },
    Burn {
        owner: String,
        amount: Uint128,
    },
}

impl ExecuteMsg {
    /// `UpdateConfig` touching only the gov contract.
    pub fn update_gov_contract(new_gov_contract: String) -> Self {
        ExecuteMsg::UpdateConfig {
            new_gov_contract: Some(new_gov_contract),
            bbro_token: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigResponse {
    /// contract/multisig address that allowed to control settings
    pub gov_contract: String,
    pub bbro_token: String,
    pub whitelist: Vec<String>,
}
