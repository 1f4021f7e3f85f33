use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ArtifactError, DeployError};

/// Contract names tracked in the artifact file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKey {
    BroToken,
    Airdrop,
    Vesting,
    BbroMinter,
    BbroToken,
    RewardsPool,
    MvpTreasury,
    IdoTreasury,
    OpReserveTreasury,
    TokenPool,
    EpochManager,
    Staking,
    Bonding,
    WhitelistSale,
    Distributor,
    Oracle,
    BroUstPair,
    BroUstLpToken,
}

impl ArtifactKey {
    pub const ALL: [ArtifactKey; 18] = [
        ArtifactKey::BroToken,
        ArtifactKey::Airdrop,
        ArtifactKey::Vesting,
        ArtifactKey::BbroMinter,
        ArtifactKey::BbroToken,
        ArtifactKey::RewardsPool,
        ArtifactKey::MvpTreasury,
        ArtifactKey::IdoTreasury,
        ArtifactKey::OpReserveTreasury,
        ArtifactKey::TokenPool,
        ArtifactKey::EpochManager,
        ArtifactKey::Staking,
        ArtifactKey::Bonding,
        ArtifactKey::WhitelistSale,
        ArtifactKey::Distributor,
        ArtifactKey::Oracle,
        ArtifactKey::BroUstPair,
        ArtifactKey::BroUstLpToken,
    ];

    /// Field name in the artifact json.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKey::BroToken => "bro_token",
            ArtifactKey::Airdrop => "airdrop",
            ArtifactKey::Vesting => "vesting",
            ArtifactKey::BbroMinter => "bbro_minter",
            ArtifactKey::BbroToken => "bbro_token",
            ArtifactKey::RewardsPool => "rewards_pool",
            ArtifactKey::MvpTreasury => "mvp_treasury",
            ArtifactKey::IdoTreasury => "ido_treasury",
            ArtifactKey::OpReserveTreasury => "op_reserve_treasury",
            ArtifactKey::TokenPool => "token_pool",
            ArtifactKey::EpochManager => "epoch_manager",
            ArtifactKey::Staking => "staking",
            ArtifactKey::Bonding => "bonding",
            ArtifactKey::WhitelistSale => "whitelist_sale",
            ArtifactKey::Distributor => "distributor",
            ArtifactKey::Oracle => "oracle",
            ArtifactKey::BroUstPair => "bro_ust_pair",
            ArtifactKey::BroUstLpToken => "bro_ust_lp_token",
        }
    }

    /// Remediation shown when the address is required but was never recorded.
    pub fn hint(&self) -> &'static str {
        match self {
            ArtifactKey::BroToken => "Deploy token first using the `token` plan.",
            ArtifactKey::Oracle | ArtifactKey::BroUstPair | ArtifactKey::BroUstLpToken => {
                "Deploy pair and oracle first using the `pair` plan."
            }
            _ => "Deploy it first using the `core` plan.",
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addresses of the contracts deployed on one network.
/// An empty string means the contract is not deployed yet.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Artifact {
    pub network: String,
    pub bro_token: String,
    pub airdrop: String,
    pub vesting: String,
    pub bbro_minter: String,
    pub bbro_token: String,
    pub rewards_pool: String,
    pub mvp_treasury: String,
    pub ido_treasury: String,
    pub op_reserve_treasury: String,
    pub token_pool: String,
    pub epoch_manager: String,
    pub staking: String,
    pub bonding: String,
    pub whitelist_sale: String,
    pub distributor: String,
    pub oracle: String,
    pub bro_ust_pair: String,
    pub bro_ust_lp_token: String,
    /// Names of the wiring calls already executed on this network.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wired: Vec<String>,
}

impl Artifact {
    pub fn new(network: &str) -> Self {
        Artifact {
            network: network.to_string(),
            ..Artifact::default()
        }
    }

    fn field(&self, key: ArtifactKey) -> &String {
        match key {
            ArtifactKey::BroToken => &self.bro_token,
            ArtifactKey::Airdrop => &self.airdrop,
            ArtifactKey::Vesting => &self.vesting,
            ArtifactKey::BbroMinter => &self.bbro_minter,
            ArtifactKey::BbroToken => &self.bbro_token,
            ArtifactKey::RewardsPool => &self.rewards_pool,
            ArtifactKey::MvpTreasury => &self.mvp_treasury,
            ArtifactKey::IdoTreasury => &self.ido_treasury,
            ArtifactKey::OpReserveTreasury => &self.op_reserve_treasury,
            ArtifactKey::TokenPool => &self.token_pool,
            ArtifactKey::EpochManager => &self.epoch_manager,
            ArtifactKey::Staking => &self.staking,
            ArtifactKey::Bonding => &self.bonding,
            ArtifactKey::WhitelistSale => &self.whitelist_sale,
            ArtifactKey::Distributor => &self.distributor,
            ArtifactKey::Oracle => &self.oracle,
            ArtifactKey::BroUstPair => &self.bro_ust_pair,
            ArtifactKey::BroUstLpToken => &self.bro_ust_lp_token,
        }
    }

    fn field_mut(&mut self, key: ArtifactKey) -> &mut String {
        match key {
            ArtifactKey::BroToken => &mut self.bro_token,
            ArtifactKey::Airdrop => &mut self.airdrop,
            ArtifactKey::Vesting => &mut self.vesting,
            ArtifactKey::BbroMinter => &mut self.bbro_minter,
            ArtifactKey::BbroToken => &mut self.bbro_token,
            ArtifactKey::RewardsPool => &mut self.rewards_pool,
            ArtifactKey::MvpTreasury => &mut self.mvp_treasury,
            ArtifactKey::IdoTreasury => &mut self.ido_treasury,
            ArtifactKey::OpReserveTreasury => &mut self.op_reserve_treasury,
            ArtifactKey::TokenPool => &mut self.token_pool,
            ArtifactKey::EpochManager => &mut self.epoch_manager,
            ArtifactKey::Staking => &mut self.staking,
            ArtifactKey::Bonding => &mut self.bonding,
            ArtifactKey::WhitelistSale => &mut self.whitelist_sale,
            ArtifactKey::Distributor => &mut self.distributor,
            ArtifactKey::Oracle => &mut self.oracle,
            ArtifactKey::BroUstPair => &mut self.bro_ust_pair,
            ArtifactKey::BroUstLpToken => &mut self.bro_ust_lp_token,
        }
    }

    pub fn get(&self, key: ArtifactKey) -> &str {
        self.field(key)
    }

    pub fn set(&mut self, key: ArtifactKey, address: impl Into<String>) {
        *self.field_mut(key) = address.into();
    }

    pub fn is_deployed(&self, key: ArtifactKey) -> bool {
        !self.field(key).is_empty()
    }

    /// Returns the recorded address, failing if `key` was never deployed.
    pub fn require(&self, key: ArtifactKey, required_by: &str) -> Result<String, DeployError> {
        let address = self.field(key);
        if address.is_empty() {
            return Err(DeployError::MissingDependency {
                key,
                required_by: required_by.to_string(),
                hint: key.hint().to_string(),
            });
        }

        Ok(address.clone())
    }

    pub fn is_wired(&self, name: &str) -> bool {
        self.wired.iter().any(|w| w == name)
    }

    pub fn mark_wired(&mut self, name: &str) {
        if !self.is_wired(name) {
            self.wired.push(name.to_string());
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (ArtifactKey, &str)> + '_ {
        ArtifactKey::ALL
            .iter()
            .map(move |key| (*key, self.field(*key).as_str()))
    }
}

/// Reads and writes `<dir>/<network>.json`.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ArtifactStore { dir: dir.into() }
    }

    pub fn path(&self, network: &str) -> PathBuf {
        self.dir.join(format!("{}.json", network))
    }

    /// Loads the artifact of `network`, or an empty one if nothing was written yet.
    pub fn load(&self, network: &str) -> Result<Artifact, ArtifactError> {
        let path = self.path(network);
        if !path.exists() {
            debug!(path = %path.display(), "No artifact found, starting empty");
            return Ok(Artifact::new(network));
        }

        let data = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        let mut artifact: Artifact =
            serde_json::from_str(&data).map_err(|source| ArtifactError::Parse { path, source })?;
        if artifact.network.is_empty() {
            artifact.network = network.to_string();
        }

        Ok(artifact)
    }

    /// Persists the full record. The file is replaced in one rename.
    pub fn write(&self, artifact: &Artifact, network: &str) -> Result<(), ArtifactError> {
        fs::create_dir_all(&self.dir).map_err(|source| ArtifactError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path(network);
        let data = serde_json::to_string_pretty(artifact).map_err(|source| ArtifactError::Parse {
            path: path.clone(),
            source,
        })?;

        let tmp = self.dir.join(format!(".{}.json.tmp", network));
        write_file(&tmp, data.as_bytes())?;
        fs::rename(&tmp, &path).map_err(|source| ArtifactError::Io { path, source })
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), ArtifactError> {
    fs::write(path, data).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}
