use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use url::Url;

use crate::artifact::ArtifactStore;
use crate::client::{LcdClient, LcdOptions, Wallet, DEFAULT_HD_PATH, LOCALTERRA_MNEMONIC};
use crate::config::ConfigLoader;
use crate::error::DeployError;
use crate::orchestrator::{log_status, Orchestrator};
use crate::plan::{self, PlanKind};

#[derive(Parser)]
#[command(name = "brotocol-deploy", about = "Deploys the Brotocol contracts")]
pub struct Cli {
    #[command(flatten)]
    pub options: DeployerOptions,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Deploy the protocol contracts. Token and oracle must already be deployed.
    Core,
    /// Deploy token, BRO/UST pair, oracle and the protocol contracts.
    Full,
    /// Deploy token, airdrop and vesting.
    Ido,
    /// Create the BRO/UST pair and deploy its oracle.
    Pair,
    /// Deploy the BRO token.
    Token,
    /// Print the addresses recorded in the artifact.
    Status,
}

impl Command {
    pub fn plan(&self) -> Option<PlanKind> {
        match self {
            Command::Core => Some(PlanKind::Core),
            Command::Full => Some(PlanKind::Full),
            Command::Ido => Some(PlanKind::Ido),
            Command::Pair => Some(PlanKind::Pair),
            Command::Token => Some(PlanKind::Token),
            Command::Status => None,
        }
    }
}

#[derive(Parser, Clone, Debug)]
pub struct DeployerOptions {
    #[arg(
        long,
        default_value = "localterra",
        value_name = "CHAIN_ID",
        env = "CHAINID",
        help_heading = "Network options",
        help = "Chain id. Also selects the config and artifact files."
    )]
    pub chain_id: String,
    #[arg(
        long,
        default_value = "http://localhost:1317",
        value_name = "URL",
        env = "LCD",
        help_heading = "Network options"
    )]
    pub lcd: Url,
    #[arg(
        long,
        value_name = "MNEMONIC",
        env = "MNEMONIC",
        hide_env_values = true,
        help_heading = "Deployer options",
        help = "Mnemonic of the deployer wallet. Falls back to the LocalTerra test1 account."
    )]
    pub mnemonic: Option<String>,
    #[arg(
        long,
        default_value = DEFAULT_HD_PATH,
        value_name = "PATH",
        help_heading = "Deployer options"
    )]
    pub hd_path: String,
    #[arg(
        long,
        default_value = "terra",
        value_name = "PREFIX",
        help_heading = "Deployer options"
    )]
    pub account_prefix: String,
    #[arg(
        long,
        value_name = "ADDRESS",
        env = "ADMIN_ADDRESS",
        help_heading = "Deployer options",
        help = "Migration admin of every instantiated contract."
    )]
    pub admin: String,
    #[arg(
        long,
        default_value = "config",
        value_name = "PATH",
        help_heading = "Deployer options"
    )]
    pub config_dir: PathBuf,
    #[arg(
        long,
        default_value = "artifacts",
        value_name = "PATH",
        help_heading = "Deployer options"
    )]
    pub artifacts_dir: PathBuf,
    #[arg(
        long,
        default_value = "../../artifacts",
        value_name = "PATH",
        help_heading = "Deployer options",
        help = "Directory holding the compiled wasm files."
    )]
    pub wasm_dir: PathBuf,
    #[arg(
        long,
        default_value = "0.15",
        value_name = "FLOAT",
        env = "GAS_PRICE",
        help_heading = "Gas options"
    )]
    pub gas_price: f64,
    #[arg(
        long,
        default_value = "uluna",
        value_name = "DENOM",
        env = "FEE_DENOM",
        help_heading = "Gas options"
    )]
    pub fee_denom: String,
    #[arg(
        long,
        default_value = "1.4",
        value_name = "FLOAT",
        env = "GAS_ADJUSTMENT",
        help_heading = "Gas options"
    )]
    pub gas_adjustment: f64,
    #[arg(
        long,
        default_value = "3000",
        value_name = "MILLISECONDS",
        help_heading = "Gas options",
        help = "Pause after every included transaction."
    )]
    pub settle_delay_ms: u64,
    #[arg(
        long,
        default_value = "1000",
        value_name = "MILLISECONDS",
        help_heading = "Gas options"
    )]
    pub poll_interval_ms: u64,
    #[arg(
        long,
        default_value = "60",
        value_name = "UINT32",
        help_heading = "Gas options"
    )]
    pub max_poll_attempts: u32,
}

impl DeployerOptions {
    pub fn lcd_options(&self) -> LcdOptions {
        LcdOptions {
            lcd: self.lcd.clone(),
            chain_id: self.chain_id.clone(),
            wasm_dir: self.wasm_dir.clone(),
            gas_price: self.gas_price,
            fee_denom: self.fee_denom.clone(),
            gas_adjustment: self.gas_adjustment,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_poll_attempts: self.max_poll_attempts,
        }
    }

    pub fn wallet(&self) -> Result<Wallet, DeployError> {
        let mnemonic = match &self.mnemonic {
            Some(mnemonic) => mnemonic.as_str(),
            None => {
                warn!("MNEMONIC is not set, using the LocalTerra test mnemonic");
                LOCALTERRA_MNEMONIC
            }
        };
        Ok(Wallet::from_mnemonic(
            mnemonic,
            &self.hd_path,
            &self.account_prefix,
        )?)
    }
}

/// Runs `command` against the configured network.
pub async fn run(options: DeployerOptions, command: Command) -> Result<(), DeployError> {
    let network = options.chain_id.clone();
    let store = ArtifactStore::new(&options.artifacts_dir);
    let mut artifact = store.load(&network)?;

    let kind = match command.plan() {
        Some(kind) => kind,
        None => {
            log_status(&artifact);
            return Ok(());
        }
    };

    let config = ConfigLoader::new(&options.config_dir).load(&network)?;
    let tasks = plan::build(kind, &config)?;
    if tasks.is_empty() {
        info!(plan = %kind, bro_token = %artifact.bro_token, "Nothing to deploy");
        return Ok(());
    }

    let wallet = options.wallet()?;
    info!(plan = %kind, network = %network, deployer = %wallet.account_id(), "Deploying");
    let client = LcdClient::new(options.lcd_options(), wallet);

    let mut orchestrator = Orchestrator::new(
        &client,
        &store,
        &network,
        &options.admin,
        config.ownership_expires_in_blocks(),
    );
    orchestrator.run(tasks, &mut artifact).await?;

    info!(
        path = %store.path(&network).display(),
        "You can find deployed contract addresses in the artifact file"
    );
    Ok(())
}
