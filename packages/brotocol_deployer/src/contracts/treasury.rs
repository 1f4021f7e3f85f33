use brotocol_protocol::{token_pool, treasury};

use super::{Descriptor, InstantiateMsg};
use crate::artifact::{Artifact, ArtifactKey};
use crate::config::{TokenPoolConfig, TreasuryConfig};
use crate::error::DeployError;

/// One of the three treasuries. They share a single bytecode.
pub struct Treasury {
    key: ArtifactKey,
    config: TreasuryConfig,
}

impl Treasury {
    pub fn mvp(config: TreasuryConfig) -> Self {
        Treasury {
            key: ArtifactKey::MvpTreasury,
            config,
        }
    }

    pub fn ido(config: TreasuryConfig) -> Self {
        Treasury {
            key: ArtifactKey::IdoTreasury,
            config,
        }
    }

    pub fn op_reserve(config: TreasuryConfig) -> Self {
        Treasury {
            key: ArtifactKey::OpReserveTreasury,
            config,
        }
    }
}

impl Descriptor for Treasury {
    fn key(&self) -> ArtifactKey {
        self.key
    }

    fn wasm(&self) -> &'static str {
        "brotocol_mvp_treasury.wasm"
    }

    fn label(&self) -> &'static str {
        match self.key {
            ArtifactKey::IdoTreasury => "brotocol ido treasury",
            ArtifactKey::OpReserveTreasury => "brotocol op reserve treasury",
            _ => "brotocol mvp treasury",
        }
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![]
    }

    fn instantiate_msg(
        &self,
        _artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::Treasury(treasury::InstantiateMsg {
            owner: self.config.owner.clone(),
        }))
    }
}

pub struct TokenPool {
    config: TokenPoolConfig,
}

impl TokenPool {
    pub fn new(config: TokenPoolConfig) -> Self {
        TokenPool { config }
    }
}

impl Descriptor for TokenPool {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::TokenPool
    }

    fn wasm(&self) -> &'static str {
        "brotocol_token_pool.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol token pool"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![ArtifactKey::BroToken]
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::TokenPool(token_pool::InstantiateMsg {
            owner: self.config.owner.clone(),
            bro_token: artifact.require(ArtifactKey::BroToken, self.label())?,
        }))
    }
}
