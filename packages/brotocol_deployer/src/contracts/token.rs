use brotocol_protocol::{airdrop, vesting};
use cosmwasm_std::Uint128;
use cw20::{Cw20Coin, MinterResponse};

use super::{Descriptor, InstantiateMsg};
use crate::artifact::{Artifact, ArtifactKey};
use crate::config::{AirdropConfig, BbroTokenConfig, BroTokenConfig, VestingConfig};
use crate::error::DeployError;

/// 1 billion BRO with 6 decimals.
pub const INITIAL_BRO_BALANCE: u128 = 1_000_000_000_000000;

pub struct BroToken {
    config: BroTokenConfig,
    holder: String,
}

impl BroToken {
    pub fn new(config: BroTokenConfig, holder: &str) -> Self {
        BroToken {
            config,
            holder: holder.to_string(),
        }
    }
}

impl Descriptor for BroToken {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::BroToken
    }

    fn wasm(&self) -> &'static str {
        "cw20_base.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol bro token"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![]
    }

    fn instantiate_msg(
        &self,
        _artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::Cw20(cw20_base::msg::InstantiateMsg {
            name: self.config.name.clone(),
            symbol: self.config.symbol.clone(),
            decimals: self.config.decimals,
            initial_balances: vec![Cw20Coin {
                address: self.holder.clone(),
                amount: Uint128::from(INITIAL_BRO_BALANCE),
            }],
            mint: None,
            marketing: None,
        }))
    }
}

/// Minted by the bbro minter only.
pub struct BbroToken {
    config: BbroTokenConfig,
}

impl BbroToken {
    pub fn new(config: BbroTokenConfig) -> Self {
        BbroToken { config }
    }
}

impl Descriptor for BbroToken {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::BbroToken
    }

    fn wasm(&self) -> &'static str {
        "brotocol_bbro_token.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol bbro token"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![ArtifactKey::BbroMinter]
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::Cw20(cw20_base::msg::InstantiateMsg {
            name: self.config.name.clone(),
            symbol: self.config.symbol.clone(),
            decimals: self.config.decimals,
            initial_balances: vec![],
            mint: Some(MinterResponse {
                minter: artifact.require(ArtifactKey::BbroMinter, self.label())?,
                cap: None,
            }),
            marketing: None,
        }))
    }
}

pub struct Airdrop {
    config: AirdropConfig,
}

impl Airdrop {
    pub fn new(config: AirdropConfig) -> Self {
        Airdrop { config }
    }
}

impl Descriptor for Airdrop {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::Airdrop
    }

    fn wasm(&self) -> &'static str {
        "brotocol_airdrop.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol airdrop"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![ArtifactKey::BroToken]
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::Airdrop(airdrop::InstantiateMsg {
            owner: self.config.owner.clone(),
            bro_token: artifact.require(ArtifactKey::BroToken, self.label())?,
        }))
    }
}

pub struct Vesting {
    config: VestingConfig,
}

impl Vesting {
    pub fn new(config: VestingConfig) -> Self {
        Vesting { config }
    }
}

impl Descriptor for Vesting {
    fn key(&self) -> ArtifactKey {
        ArtifactKey::Vesting
    }

    fn wasm(&self) -> &'static str {
        "brotocol_vesting.wasm"
    }

    fn label(&self) -> &'static str {
        "brotocol vesting"
    }

    fn reads(&self) -> Vec<ArtifactKey> {
        vec![ArtifactKey::BroToken]
    }

    fn instantiate_msg(
        &self,
        artifact: &Artifact,
        _deployer: &str,
    ) -> Result<InstantiateMsg, DeployError> {
        Ok(InstantiateMsg::Vesting(vesting::InstantiateMsg {
            owner: self.config.owner.clone(),
            bro_token: artifact.require(ArtifactKey::BroToken, self.label())?,
            genesis_time: self.config.genesis_time,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_address;

    #[test]
    fn bro_token_seeds_holder() {
        let holder = mock_address(3);
        let token = BroToken::new(
            BroTokenConfig {
                name: "Brotocol Token".to_string(),
                symbol: "BRO".to_string(),
                decimals: 6,
            },
            &holder,
        );

        match token.instantiate_msg(&Artifact::new("localterra"), "deployer").unwrap() {
            InstantiateMsg::Cw20(msg) => {
                assert_eq!(
                    msg.initial_balances,
                    vec![Cw20Coin {
                        address: holder,
                        amount: Uint128::from(1_000_000_000_000000u128),
                    }]
                );
                assert_eq!(msg.mint, None);
            }
            m => panic!("unexpected message: {:?}", m),
        }
    }

    #[test]
    fn bbro_token_minted_by_minter() {
        let token = BbroToken::new(BbroTokenConfig {
            name: "bBRO Token".to_string(),
            symbol: "bBRO".to_string(),
            decimals: 6,
        });

        let mut artifact = Artifact::new("localterra");
        assert!(token.instantiate_msg(&artifact, "deployer").is_err());

        artifact.set(ArtifactKey::BbroMinter, mock_address(100));
        match token.instantiate_msg(&artifact, "deployer").unwrap() {
            InstantiateMsg::Cw20(msg) => {
                assert!(msg.initial_balances.is_empty());
                assert_eq!(msg.mint.unwrap().minter, mock_address(100));
            }
            m => panic!("unexpected message: {:?}", m),
        }
    }
}
