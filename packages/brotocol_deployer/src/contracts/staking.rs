use brotocol_protocol::bonding::{self, BondingModeMsg};
use brotocol_protocol::{staking, whitelist_sale};

use super::{Descriptor, InstantiateMsg};
use crate::artifact::{Artifact, ArtifactKey};
use crate::config::{BondingConfig, BondingMode, StakingConfig, WhitelistSaleConfig};
use crate::error::DeployError;

/// In community bonding mode the deployer keeps ownership until the bonding
/// contract is registered through `update_config`.
pub struct Staking {
    config: StakingConfig,
    community_bonding: bool,
}

impl Staking {
    pub fn new(config: StakingConfig, community_bonding: bool) -> Self {
        Staking {
            config,
            community_bonding,
        }
    }
}

impl Descriptor for Staking {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::Staking
    }

    fn wasm(&self) -> &'static str {
        "brotocol_staking_v1.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol staking"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![
            ArtifactKey::BroToken,
            ArtifactKey::RewardsPool,
            ArtifactKey::BbroMinter,
            ArtifactKey::EpochManager,
        ]
    }

    fn bootstrap_owner(&self) -> Option<&str> {
        if self.community_bonding {
            Some(&self.config.owner)
        } else {
            None
        }
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        let label = self.label();
        let owner = match self.bootstrap_owner() {
            Some(_) => deployer.to_string(),
            None => self.config.owner.clone(),
        };

        Ok(InstantiateMsg::Staking(staking::InstantiateMsg {
            owner,
            bro_token: artifact.require(ArtifactKey::BroToken, label)?,
            rewards_pool_contract: artifact.require(ArtifactKey::RewardsPool, label)?,
            bbro_minter_contract: artifact.require(ArtifactKey::BbroMinter, label)?,
            epoch_manager_contract: artifact.require(ArtifactKey::EpochManager, label)?,
            // bonding is deployed after staking and registered afterwards
            community_bonding_contract: None,
            unstake_period_blocks: self.config.unstake_period_blocks,
            min_staking_amount: self.config.min_staking_amount,
            min_lockup_period_epochs: self.config.min_lockup_period_epochs,
            max_lockup_period_epochs: self.config.max_lockup_period_epochs,
            base_rate: self.config.base_rate,
            linear_growth: self.config.linear_growth,
            exponential_growth: self.config.exponential_growth,
        }))
    }
}

pub struct Bonding {
    config: BondingConfig,
}

impl Bonding {
    pub fn new(config: BondingConfig) -> Self {
        Bonding { config }
    }
}

impl Descriptor for Bonding {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::Bonding
    }

    fn wasm(&self) -> &'static str {
        "brotocol_bonding_v1.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol bonding"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        let mut reads = vec![
            ArtifactKey::BroToken,
            ArtifactKey::RewardsPool,
            ArtifactKey::MvpTreasury,
            ArtifactKey::Oracle,
        ];
        if self.config.bonding_mode.is_community() {
            reads.push(ArtifactKey::Staking);
        } else {
            reads.push(ArtifactKey::BroUstLpToken);
        }
        reads
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        let label = self.label();
        let bonding_mode = match self.config.bonding_mode.mode()? {
            BondingMode::Normal(normal) => BondingModeMsg::Normal {
                ust_bonding_reward_ratio: normal.ust_bonding_reward_ratio,
                lp_token: artifact.require(ArtifactKey::BroUstLpToken, label)?,
                lp_bonding_discount: normal.lp_bonding_discount,
                vesting_period_blocks: normal.vesting_period_blocks,
            },
            BondingMode::Community(community) => BondingModeMsg::Community {
                staking_contract: artifact.require(ArtifactKey::Staking, label)?,
                epochs_locked: community.epochs_locked,
            },
        };

        Ok(InstantiateMsg::Bonding(bonding::InstantiateMsg {
            owner: self.config.owner.clone(),
            bro_token: artifact.require(ArtifactKey::BroToken, label)?,
            rewards_pool_contract: artifact.require(ArtifactKey::RewardsPool, label)?,
            treasury_contract: artifact.require(ArtifactKey::MvpTreasury, label)?,
            astroport_factory: self.config.astroport_factory.clone(),
            oracle_contract: artifact.require(ArtifactKey::Oracle, label)?,
            ust_bonding_discount: self.config.ust_bonding_discount,
            min_bro_payout: self.config.min_bro_payout,
            bonding_mode,
        }))
    }
}

pub struct WhitelistSale {
    config: WhitelistSaleConfig,
}

impl WhitelistSale {
    pub fn new(config: WhitelistSaleConfig) -> Self {
        WhitelistSale { config }
    }
}

impl Descriptor for WhitelistSale {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::WhitelistSale
    }

    fn wasm(&self) -> &'static str {
        "brotocol_whitelist_sale.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol whitelist sale"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        let mut reads = vec![ArtifactKey::BroToken, ArtifactKey::RewardsPool];
        if self.config.ust_receiver.is_none() {
            reads.push(ArtifactKey::MvpTreasury);
        }
        reads
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        let label = self.label();
        let ust_receiver = match &self.config.ust_receiver {
            Some(receiver) => receiver.clone(),
            None => artifact.require(ArtifactKey::MvpTreasury, label)?,
        };

        Ok(InstantiateMsg::WhitelistSale(whitelist_sale::InstantiateMsg {
            owner: self.config.owner.clone(),
            bro_token: artifact.require(ArtifactKey::BroToken, label)?,
            bro_amount_per_uusd: self.config.bro_amount_per_uusd,
            bro_amount_per_nft: self.config.bro_amount_per_nft,
            ust_receiver,
            rewards_pool_contract: artifact.require(ArtifactKey::RewardsPool, label)?,
        }))
    }
}
