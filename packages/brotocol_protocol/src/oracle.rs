use astroport::asset::AssetInfo;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ## InstantiateMsg
/// This structure describes the basic settings for creating a contract.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// contract/multisig address that allowed to control settings
    pub owner: String,
    /// factory contract address
    pub factory_contract: String,
    /// assets in the pool
    pub asset_infos: [AssetInfo; 2],
    /// time interval for updating prices
    pub price_update_interval: u64,
    /// time frame for how long a price is valid after update
    pub price_validity_period: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    UpdateConfig {
        price_update_interval: Option<u64>,
        price_validity_period: Option<u64>,
    },
    /// Updates cumulative prices
    UpdatePrice {},
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
    OwnershipProposal {},
}
