mod oracle;
mod rewards;
mod staking;
mod token;
mod treasury;

pub use oracle::{BroUstPair, Oracle};
pub use rewards::{BbroMinter, Distributor, EpochManager, RewardsPool};
pub use staking::{Bonding, Staking, WhitelistSale};
pub use token::{Airdrop, BbroToken, BroToken, Vesting, INITIAL_BRO_BALANCE};
pub use treasury::{TokenPool, Treasury};

use brotocol_protocol::{
    airdrop, bbro_minter, bonding, distributor, epoch_manager, oracle as oracle_msg,
    rewards as rewards_msg, staking as staking_msg, token_pool, treasury as treasury_msg, vesting,
    whitelist_sale,
};
use cosmwasm_std::{to_json_binary, Binary};

use crate::artifact::{Artifact, ArtifactKey};
use crate::error::DeployError;

/// A deployable contract kind.
///
/// A descriptor knows its bytecode, the artifact keys its instantiation reads
/// and the single key it writes.
pub trait Descriptor: Send + Sync {
    fn key(&self) -> ArtifactKey;

    fn wasm(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn reads(&self) -> Vec<ArtifactKey>;

    /// Configured owner of a contract that is instantiated with the deployer
    /// as owner and handed off at the end of the run.
    fn bootstrap_owner(&self) -> Option<&str> {
        None
    }

    fn instantiate_msg(&self, artifact: &Artifact, deployer: &str)
        -> Result<InstantiateMsg, DeployError>;
}

/// Every instantiation message the deployer can send.
#[derive(Clone, Debug, PartialEq)]
pub enum InstantiateMsg {
    Cw20(cw20_base::msg::InstantiateMsg),
    Airdrop(airdrop::InstantiateMsg),
    Vesting(vesting::InstantiateMsg),
    BbroMinter(bbro_minter::InstantiateMsg),
    RewardsPool(rewards_msg::InstantiateMsg),
    Treasury(treasury_msg::InstantiateMsg),
    TokenPool(token_pool::InstantiateMsg),
    EpochManager(epoch_manager::InstantiateMsg),
    Staking(staking_msg::InstantiateMsg),
    Bonding(bonding::InstantiateMsg),
    WhitelistSale(whitelist_sale::InstantiateMsg),
    Distributor(distributor::InstantiateMsg),
    Oracle(oracle_msg::InstantiateMsg),
}

impl InstantiateMsg {
    pub fn to_binary(&self) -> Result<Binary, DeployError> {
        let res = match self {
            InstantiateMsg::Cw20(msg) => to_json_binary(msg),
            InstantiateMsg::Airdrop(msg) => to_json_binary(msg),
            InstantiateMsg::Vesting(msg) => to_json_binary(msg),
            InstantiateMsg::BbroMinter(msg) => to_json_binary(msg),
            InstantiateMsg::RewardsPool(msg) => to_json_binary(msg),
            InstantiateMsg::Treasury(msg) => to_json_binary(msg),
            InstantiateMsg::TokenPool(msg) => to_json_binary(msg),
            InstantiateMsg::EpochManager(msg) => to_json_binary(msg),
            InstantiateMsg::Staking(msg) => to_json_binary(msg),
            InstantiateMsg::Bonding(msg) => to_json_binary(msg),
            InstantiateMsg::WhitelistSale(msg) => to_json_binary(msg),
            InstantiateMsg::Distributor(msg) => to_json_binary(msg),
            InstantiateMsg::Oracle(msg) => to_json_binary(msg),
        };

        res.map_err(|source| DeployError::InvalidMessage {
            contract: self.contract().to_string(),
            source,
        })
    }

    pub fn contract(&self) -> &'static str {
        match self {
            InstantiateMsg::Cw20(_) => "cw20",
            InstantiateMsg::Airdrop(_) => "airdrop",
            InstantiateMsg::Vesting(_) => "vesting",
            InstantiateMsg::BbroMinter(_) => "bbro minter",
            InstantiateMsg::RewardsPool(_) => "rewards pool",
            InstantiateMsg::Treasury(_) => "treasury",
            InstantiateMsg::TokenPool(_) => "token pool",
            InstantiateMsg::EpochManager(_) => "epoch manager",
            InstantiateMsg::Staking(_) => "staking",
            InstantiateMsg::Bonding(_) => "bonding",
            InstantiateMsg::WhitelistSale(_) => "whitelist sale",
            InstantiateMsg::Distributor(_) => "distributor",
            InstantiateMsg::Oracle(_) => "oracle",
        }
    }
}
