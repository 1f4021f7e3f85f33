use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use cosmrs::AccountId;
use cosmwasm_std::{Decimal, Uint128};
use serde::Deserialize;

use crate::error::ConfigError;

/// Default block window a proposed owner has to claim ownership.
pub const DEFAULT_OWNERSHIP_EXPIRY_BLOCKS: u64 = 100_000;

/// Instantiation parameters of one network.
///
/// Addresses of other Brotocol contracts never appear here, they are taken from
/// the artifact when the messages are built.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_true")]
    pub deploy_token: bool,
    #[serde(default)]
    pub initial_bro_balance_holder_address: Option<String>,
    pub bro_token: Option<BroTokenConfig>,
    pub airdrop: Option<AirdropConfig>,
    pub vesting: Option<VestingConfig>,
    pub bbro_minter: Option<BbroMinterConfig>,
    pub bbro_token: Option<BbroTokenConfig>,
    pub rewards_pool: Option<RewardsPoolConfig>,
    pub mvp_treasury: Option<TreasuryConfig>,
    pub ido_treasury: Option<TreasuryConfig>,
    pub op_reserve_treasury: Option<TreasuryConfig>,
    pub token_pool: Option<TokenPoolConfig>,
    pub epoch_manager: Option<EpochManagerConfig>,
    pub staking: Option<StakingConfig>,
    pub bonding: Option<BondingConfig>,
    pub whitelist_sale: Option<WhitelistSaleConfig>,
    pub distributor: Option<DistributorConfig>,
    pub oracle: Option<OracleConfig>,
    pub bro_ust_pair: Option<BroUstPairConfig>,
    pub bro_distributions: Option<BroDistributionsConfig>,
    pub ownership: Option<OwnershipConfig>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BroTokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AirdropConfig {
    pub owner: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VestingConfig {
    pub owner: String,
    pub genesis_time: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BbroMinterConfig {
    pub owner: String,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BbroTokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RewardsPoolConfig {
    pub owner: String,
    pub spend_limit: Uint128,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TreasuryConfig {
    pub owner: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TokenPoolConfig {
    pub owner: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EpochManagerConfig {
    pub owner: String,
    pub epoch: u64,
    pub blocks_per_year: u64,
    pub bbro_emission_rate: Decimal,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StakingConfig {
    pub owner: String,
    pub unstake_period_blocks: u64,
    pub min_staking_amount: Uint128,
    pub min_lockup_period_epochs: u64,
    pub max_lockup_period_epochs: u64,
    pub base_rate: Decimal,
    pub linear_growth: Decimal,
    pub exponential_growth: Decimal,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BondingConfig {
    pub owner: String,
    pub astroport_factory: String,
    pub ust_bonding_discount: Decimal,
    pub min_bro_payout: Uint128,
    pub bonding_mode: BondingModeConfig,
}

/// Raw bonding mode as written in the config file.
/// Exactly one of the keys has to be present, see [`BondingModeConfig::mode`].
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BondingModeConfig {
    pub normal: Option<NormalBondingConfig>,
    pub community: Option<CommunityBondingConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NormalBondingConfig {
    pub ust_bonding_reward_ratio: Decimal,
    pub lp_bonding_discount: Decimal,
    pub vesting_period_blocks: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommunityBondingConfig {
    pub epochs_locked: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BondingMode<'a> {
    Normal(&'a NormalBondingConfig),
    Community(&'a CommunityBondingConfig),
}

impl BondingModeConfig {
    pub fn mode(&self) -> Result<BondingMode<'_>, ConfigError> {
        match (&self.normal, &self.community) {
            (Some(normal), None) => Ok(BondingMode::Normal(normal)),
            (None, Some(community)) => Ok(BondingMode::Community(community)),
            (None, None) => Err(ConfigError::InvalidBondingMode(
                "expected one of `normal` or `community`, found neither".to_string(),
            )),
            (Some(_), Some(_)) => Err(ConfigError::InvalidBondingMode(
                "expected one of `normal` or `community`, found both".to_string(),
            )),
        }
    }

    pub fn is_community(&self) -> bool {
        matches!(self.mode(), Ok(BondingMode::Community(_)))
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WhitelistSaleConfig {
    pub owner: String,
    pub bro_amount_per_uusd: Uint128,
    pub bro_amount_per_nft: Uint128,
    /// falls back to the mvp treasury
    #[serde(default)]
    pub ust_receiver: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DistributorConfig {
    pub owner: String,
    pub distribution_genesis_block: u64,
    pub staking_distribution_amount: Uint128,
    pub bonding_distribution_amount: Uint128,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OracleConfig {
    pub owner: String,
    pub price_update_interval: u64,
    pub price_validity_period: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BroUstPairConfig {
    #[serde(default)]
    pub create_pair: bool,
    #[serde(default)]
    pub factory_address: String,
}

/// BRO sent from the deployer wallet right after the recipients are deployed.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BroDistributionsConfig {
    pub airdrop: Option<Uint128>,
    pub vesting: Option<Uint128>,
    pub rewards: Option<Uint128>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OwnershipConfig {
    pub expires_in_blocks: u64,
}

macro_rules! section {
    ($name:ident, $ty:ty) => {
        pub fn $name(&self) -> Result<&$ty, ConfigError> {
            self.$name
                .as_ref()
                .ok_or(ConfigError::MissingSection(stringify!($name)))
        }
    };
}

impl Config {
    section!(bro_token, BroTokenConfig);
    section!(airdrop, AirdropConfig);
    section!(vesting, VestingConfig);
    section!(bbro_minter, BbroMinterConfig);
    section!(bbro_token, BbroTokenConfig);
    section!(rewards_pool, RewardsPoolConfig);
    section!(mvp_treasury, TreasuryConfig);
    section!(ido_treasury, TreasuryConfig);
    section!(op_reserve_treasury, TreasuryConfig);
    section!(token_pool, TokenPoolConfig);
    section!(epoch_manager, EpochManagerConfig);
    section!(staking, StakingConfig);
    section!(bonding, BondingConfig);
    section!(whitelist_sale, WhitelistSaleConfig);
    section!(distributor, DistributorConfig);
    section!(oracle, OracleConfig);
    section!(bro_ust_pair, BroUstPairConfig);

    pub fn initial_bro_balance_holder_address(&self) -> Result<&str, ConfigError> {
        self.initial_bro_balance_holder_address
            .as_deref()
            .ok_or(ConfigError::MissingSection(
                "initial_bro_balance_holder_address",
            ))
    }

    pub fn ownership_expires_in_blocks(&self) -> u64 {
        self.ownership
            .as_ref()
            .map(|o| o.expires_in_blocks)
            .unwrap_or(DEFAULT_OWNERSHIP_EXPIRY_BLOCKS)
    }

    /// Checks every literal address and the bonding mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut addresses: Vec<(&'static str, String)> = vec![];
        let mut push =
            |field: &'static str, address: &str| addresses.push((field, address.to_string()));

        if let Some(holder) = &self.initial_bro_balance_holder_address {
            push("initial_bro_balance_holder_address", holder);
        }
        if let Some(c) = &self.airdrop {
            push("airdrop.owner", &c.owner);
        }
        if let Some(c) = &self.vesting {
            push("vesting.owner", &c.owner);
        }
        if let Some(c) = &self.bbro_minter {
            push("bbro_minter.owner", &c.owner);
            for a in c.whitelist.iter() {
                push("bbro_minter.whitelist", a);
            }
        }
        if let Some(c) = &self.rewards_pool {
            push("rewards_pool.owner", &c.owner);
            for a in c.whitelist.iter() {
                push("rewards_pool.whitelist", a);
            }
        }
        if let Some(c) = &self.mvp_treasury {
            push("mvp_treasury.owner", &c.owner);
        }
        if let Some(c) = &self.ido_treasury {
            push("ido_treasury.owner", &c.owner);
        }
        if let Some(c) = &self.op_reserve_treasury {
            push("op_reserve_treasury.owner", &c.owner);
        }
        if let Some(c) = &self.token_pool {
            push("token_pool.owner", &c.owner);
        }
        if let Some(c) = &self.epoch_manager {
            push("epoch_manager.owner", &c.owner);
        }
        if let Some(c) = &self.staking {
            push("staking.owner", &c.owner);
        }
        if let Some(c) = &self.bonding {
            push("bonding.owner", &c.owner);
            push("bonding.astroport_factory", &c.astroport_factory);
        }
        if let Some(c) = &self.whitelist_sale {
            push("whitelist_sale.owner", &c.owner);
            if let Some(receiver) = &c.ust_receiver {
                push("whitelist_sale.ust_receiver", receiver);
            }
        }
        if let Some(c) = &self.distributor {
            push("distributor.owner", &c.owner);
        }
        if let Some(c) = &self.oracle {
            push("oracle.owner", &c.owner);
        }
        if let Some(c) = &self.bro_ust_pair {
            if !c.factory_address.is_empty() {
                push("bro_ust_pair.factory_address", &c.factory_address);
            }
        }

        for (field, address) in addresses {
            validate_address(field, &address)?;
        }

        if let Some(bonding) = &self.bonding {
            bonding.bonding_mode.mode()?;
        }

        Ok(())
    }
}

pub fn validate_address(field: &str, address: &str) -> Result<(), ConfigError> {
    AccountId::from_str(address)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidAddress {
            field: field.to_string(),
            address: address.to_string(),
        })
}

/// Reads `<dir>/<network>.json`.
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ConfigLoader { dir: dir.into() }
    }

    pub fn path(&self, network: &str) -> PathBuf {
        self.dir.join(format!("{}.json", network))
    }

    pub fn load(&self, network: &str) -> Result<Config, ConfigError> {
        let path = self.path(network);
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }

        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate()?;

        Ok(config)
    }
}
