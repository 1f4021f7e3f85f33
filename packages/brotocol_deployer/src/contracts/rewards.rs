use brotocol_protocol::{bbro_minter, distributor, epoch_manager, rewards};

use super::{Descriptor, InstantiateMsg};
use crate::artifact::{Artifact, ArtifactKey};
use crate::config::{BbroMinterConfig, DistributorConfig, EpochManagerConfig, RewardsPoolConfig};
use crate::error::DeployError;

/// Governed by the deployer until the bbro token and the staking minter are set.
pub struct BbroMinter {
    config: BbroMinterConfig,
}

impl BbroMinter {
    pub fn new(config: BbroMinterConfig) -> Self {
        BbroMinter { config }
    }
}

impl Descriptor for BbroMinter {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::BbroMinter
    }

    fn wasm(&self) -> &'static str {
        "brotocol_bbro_minter.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol bbro minter"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![]
    }

    fn bootstrap_owner(&self) -> Option<&str> {
        Some(&self.config.owner)
    }

    fn instantiate_msg(
        &self,
        _artifact: &Artifact,
        deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::BbroMinter(bbro_minter::InstantiateMsg {
            gov_contract: deployer.to_string(),
            whitelist: self.config.whitelist.clone(),
        }))
    }
}

/// Governed by the deployer until the distributor is whitelisted.
pub struct RewardsPool {
    config: RewardsPoolConfig,
}

impl RewardsPool {
    pub fn new(config: RewardsPoolConfig) -> Self {
        RewardsPool { config }
    }
}

impl Descriptor for RewardsPool {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::RewardsPool
    }

    fn wasm(&self) -> &'static str {
        "brotocol_rewards_pool.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol rewards pool"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![ArtifactKey::BroToken]
    }

    fn bootstrap_owner(&self) -> Option<&str> {
        Some(&self.config.owner)
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::RewardsPool(rewards::InstantiateMsg {
            gov_contract: deployer.to_string(),
            bro_token: artifact.require(ArtifactKey::BroToken, self.label())?,
            spend_limit: self.config.spend_limit,
            whitelist: self.config.whitelist.clone(),
        }))
    }
}

pub struct EpochManager {
    config: EpochManagerConfig,
}

impl EpochManager {
    pub fn new(config: EpochManagerConfig) -> Self {
        EpochManager { config }
    }
}

impl Descriptor for EpochManager {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::EpochManager
    }

    fn wasm(&self) -> &'static str {
        "brotocol_epoch_manager.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol epoch manager"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![]
    }

    fn instantiate_msg(
        &self,
        _artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::EpochManager(epoch_manager::InstantiateMsg {
            owner: self.config.owner.clone(),
            epoch: self.config.epoch,
            blocks_per_year: self.config.blocks_per_year,
            bbro_emission_rate: self.config.bbro_emission_rate,
        }))
    }
}

pub struct Distributor {
    config: DistributorConfig,
}

impl Distributor {
    pub fn new(config: DistributorConfig) -> Self {
        Distributor { config }
    }
}

impl Descriptor for Distributor {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::Distributor
    }

    fn wasm(&self) -> &'static str {
        "brotocol_distributor_v1.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol distributor"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![
            ArtifactKey::EpochManager,
            ArtifactKey::RewardsPool,
            ArtifactKey::Staking,
            ArtifactKey::Bonding,
        ]
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        let label = self.label();
        Ok(InstantiateMsg::Distributor(distributor::InstantiateMsg {
            owner: self.config.owner.clone(),
            distribution_genesis_block: self.config.distribution_genesis_block,
            epoch_manager_contract: artifact.require(ArtifactKey::EpochManager, label)?,
            rewards_contract: artifact.require(ArtifactKey::RewardsPool, label)?,
            staking_contract: artifact.require(ArtifactKey::Staking, label)?,
            staking_distribution_amount: self.config.staking_distribution_amount,
            bonding_contract: artifact.require(ArtifactKey::Bonding, label)?,
            bonding_distribution_amount: self.config.bonding_distribution_amount,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_address;
    use cosmwasm_std::Uint128;

    #[test]
    fn deployer_is_gov_contract_until_handoff() {
        let minter = BbroMinter::new(BbroMinterConfig {
            owner: mock_address(10),
            whitelist: vec![mock_address(30)],
        });
        assert_eq!(minter.bootstrap_owner(), Some(mock_address(10).as_str()));

        let artifact = Artifact::new("localterra");
        match minter.instantiate_msg(&artifact, "deployer").unwrap() {
            InstantiateMsg::BbroMinter(msg) => assert_eq!(
                msg,
                bbro_minter::InstantiateMsg {
                    gov_contract: "deployer".to_string(),
                    whitelist: vec![mock_address(30)],
                }
            ),
            msg => panic!("unexpected message: {:?}", msg),
        }

        let pool = RewardsPool::new(RewardsPoolConfig {
            owner: mock_address(10),
            spend_limit: Uint128::from(1_000_000u128),
            whitelist: vec![],
        });
        assert!(pool.instantiate_msg(&artifact, "deployer").is_err());

        let mut artifact = artifact;
        artifact.set(ArtifactKey::BroToken, mock_address(90));
        match pool.instantiate_msg(&artifact, "deployer").unwrap() {
            InstantiateMsg::RewardsPool(msg) => {
                assert_eq!(msg.gov_contract, "deployer");
                assert_eq!(msg.bro_token, mock_address(90));
                assert_eq!(msg.spend_limit, Uint128::from(1_000_000u128));
            }
            msg => panic!("unexpected message: {:?}", msg),
        }
    }
}
