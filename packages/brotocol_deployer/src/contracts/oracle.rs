use astroport::asset::AssetInfo;
use astroport::factory::{ExecuteMsg as FactoryExecuteMsg, PairType};
use astroport::pair::QueryMsg as PairQueryMsg;
use brotocol_protocol::oracle;
use cosmwasm_std::{to_json_binary, Addr, Binary};

use super::{Descriptor, InstantiateMsg};
use crate::artifact::{Artifact, ArtifactKey};
use crate::config::OracleConfig;
use crate::error::DeployError;

pub const UST_DENOM: &str = "uusd";

/// Assets of the BRO/UST pool, BRO first.
pub fn bro_ust_asset_infos(bro_token: &str) -> [AssetInfo; 2] {
    [
        AssetInfo::Token {
            contract_addr: Addr::unchecked(bro_token),
        },
        AssetInfo::NativeToken {
            denom: UST_DENOM.to_string(),
        },
    ]
}

/// Price oracle of the BRO/UST pool.
pub struct Oracle {
    config: OracleConfig,
    factory: String,
}

impl Oracle {
    pub fn new(config: OracleConfig, factory: &str) -> Self {
        Oracle {
            config,
            factory: factory.to_string(),
        }
    }
}

impl Descriptor for Oracle {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::Oracle
    }

    fn wasm(&self) -> &'static str {
        "brotocol_oracle.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol oracle"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![ArtifactKey::BroToken]
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        let bro_token = artifact.require(ArtifactKey::BroToken, self.label())?;
        Ok(InstantiateMsg::Oracle(oracle::InstantiateMsg {
            owner: self.config.owner.clone(),
            factory_contract: self.factory.clone(),
            asset_infos: bro_ust_asset_infos(&bro_token),
            price_update_interval: self.config.price_update_interval,
            price_validity_period: self.config.price_validity_period,
        }))
    }
}

/// The BRO/UST xyk pair, created through the astroport factory rather than deployed.
#[derive(Clone, Debug, PartialEq)]
pub struct BroUstPair {
    pub factory: String,
}

impl BroUstPair {
    pub const LABEL: &'static str = "bro/ust pair";

    pub fn new(factory: &str) -> Self {
        BroUstPair {
            factory: factory.to_string(),
        }
    }

    pub fn reads(&self) -> Vec<ArtifactKey> {
        vec![ArtifactKey::BroToken]
    }

    pub fn writes(&self) -> Vec<ArtifactKey> {
        vec![ArtifactKey::BroUstPair, ArtifactKey::BroUstLpToken]
    }

    pub fn create_pair_msg(&self, artifact: &Artifact) -> Result<Binary, DeployError> {
        let bro_token = artifact.require(ArtifactKey::BroToken, Self::LABEL)?;
        to_json_binary(&FactoryExecuteMsg::CreatePair {
            pair_type: PairType::Xyk {},
            asset_infos: bro_ust_asset_infos(&bro_token),
            init_params: None,
        })
        .map_err(|source| DeployError::InvalidMessage {
            contract: Self::LABEL.to_string(),
            source,
        })
    }

    pub fn pair_query_msg(&self) -> PairQueryMsg {
        PairQueryMsg::Pair {}
    }
}
