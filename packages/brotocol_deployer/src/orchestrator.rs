use std::collections::HashMap;
use std::str::FromStr;

use astroport::asset::PairInfo;
use brotocol_protocol::{bbro_minter, rewards, staking};
use cosmrs::AccountId;
use tracing::{info, warn};

use crate::artifact::{Artifact, ArtifactKey, ArtifactStore};
use crate::client::{query_as, ChainClient};
use crate::contracts::{BroUstPair, Descriptor};
use crate::error::{ClientError, DeployError};
use crate::ownership::{handoff_msg, Handoff, OwnerResponse, OwnershipLedger, OwnershipState};
use crate::plan::{pending_wiring, schedule, Task, Wiring};

/// What a run did, in execution order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    pub deployed: Vec<ArtifactKey>,
    pub skipped: Vec<ArtifactKey>,
    pub wired: Vec<String>,
    pub handed_off: Vec<ArtifactKey>,
}

/// Executes deployment plans for one network.
pub struct Orchestrator<'a, C: ChainClient> {
    client: &'a C,
    store: &'a ArtifactStore,
    network: String,
    admin: String,
    expires_in_blocks: u64,
    code_ids: HashMap<&'static str, u64>,
    ownership: OwnershipLedger,
}

impl<'a, C: ChainClient> Orchestrator<'a, C> {
    pub fn new(
        client: &'a C,
        store: &'a ArtifactStore,
        network: &str,
        admin: &str,
        expires_in_blocks: u64,
    ) -> Self {
        Orchestrator {
            client,
            store,
            network: network.to_string(),
            admin: admin.to_string(),
            expires_in_blocks,
            code_ids: HashMap::new(),
            ownership: OwnershipLedger::new(),
        }
    }

    pub fn ownership(&self) -> &OwnershipLedger {
        &self.ownership
    }

    /// Schedules `tasks`, runs them in order and hands off provisional ownership.
    ///
    /// Nothing touches the chain if scheduling fails. Every recorded address is
    /// persisted before the next task starts.
    pub async fn run(
        &mut self,
        tasks: Vec<Task>,
        artifact: &mut Artifact,
    ) -> Result<RunReport, DeployError> {
        artifact.network = self.network.clone();
        let tasks = schedule(tasks, artifact)?;
        info!(network = %self.network, tasks = tasks.len(), "Starting deployment");

        let mut report = RunReport::default();
        for task in tasks.iter() {
            match task {
                Task::Deploy(descriptor) => {
                    self.deploy_contract(artifact, &**descriptor, &mut report)
                        .await?
                }
                Task::CreatePair(pair) => self.create_pair(artifact, pair, &mut report).await?,
                Task::Wire(wiring) => self.wire(artifact, wiring, &mut report).await?,
            }
        }

        self.hand_off(&tasks, artifact, &mut report).await?;
        self.ownership.ensure_handed_off()?;

        info!(
            deployed = report.deployed.len(),
            skipped = report.skipped.len(),
            "Deployment finished"
        );
        Ok(report)
    }

    async fn code_id(&mut self, wasm: &'static str) -> Result<u64, ClientError> {
        if let Some(code_id) = self.code_ids.get(wasm) {
            return Ok(*code_id);
        }

        info!(wasm, "Storing code");
        let code_id = self.client.store_code(wasm).await?;
        self.code_ids.insert(wasm, code_id);
        Ok(code_id)
    }

    fn record(
        &mut self,
        artifact: &mut Artifact,
        key: ArtifactKey,
        address: String,
    ) -> Result<(), DeployError> {
        if AccountId::from_str(&address).is_err() {
            return Err(DeployError::InvalidAddress { key, address });
        }

        artifact.set(key, address);
        self.store.write(artifact, &self.network)?;
        Ok(())
    }

    /// Store code, instantiate, record the address and persist the artifact.
    pub async fn deploy_contract(
        &mut self,
        artifact: &mut Artifact,
        descriptor: &dyn Descriptor,
        report: &mut RunReport,
    ) -> Result<(), DeployError> {
        let key = descriptor.key();
        let label = descriptor.label();
        let sender = self.client.sender();

        if artifact.is_deployed(key) {
            let address = artifact.get(key).to_string();
            info!(contract = label, %address, "Already deployed, skipping");
            if let Some(final_owner) = descriptor.bootstrap_owner() {
                self.resume_ownership(key, &address, final_owner, &sender)
                    .await?;
            }
            report.skipped.push(key);
            return Ok(());
        }

        let msg = descriptor.instantiate_msg(artifact, &sender)?.to_binary()?;
        let code_id = self.code_id(descriptor.wasm()).await?;
        let address = self
            .client
            .instantiate(Some(self.admin.as_str()), code_id, label, &msg, &[])
            .await?;
        info!(contract = label, code_id, %address, "Instantiated");

        self.record(artifact, key, address.clone())?;
        if let Some(final_owner) = descriptor.bootstrap_owner() {
            if final_owner != sender {
                self.ownership.register(key, &address, final_owner);
            }
        }
        report.deployed.push(key);
        Ok(())
    }

    /// A contract deployed by an interrupted run may still be controlled by the deployer.
    async fn resume_ownership(
        &mut self,
        key: ArtifactKey,
        address: &str,
        final_owner: &str,
        sender: &str,
    ) -> Result<(), DeployError> {
        if final_owner == sender {
            return Ok(());
        }

        let owner = match key {
            ArtifactKey::BbroMinter => {
                let res: bbro_minter::ConfigResponse =
                    query_as(self.client, address, &bbro_minter::QueryMsg::Config {}).await?;
                res.gov_contract
            }
            ArtifactKey::RewardsPool => {
                let res: rewards::ConfigResponse =
                    query_as(self.client, address, &rewards::QueryMsg::Config {}).await?;
                res.gov_contract
            }
            _ => {
                let res: OwnerResponse =
                    query_as(self.client, address, &staking::QueryMsg::Config {}).await?;
                res.owner
            }
        };

        if owner == sender {
            warn!(contract = %key, %address, "Contract is still controlled by the deployer");
            self.ownership.register(key, address, final_owner);
        }
        Ok(())
    }

    async fn create_pair(
        &mut self,
        artifact: &mut Artifact,
        pair: &BroUstPair,
        report: &mut RunReport,
    ) -> Result<(), DeployError> {
        if artifact.is_deployed(ArtifactKey::BroUstPair) {
            info!(pair = artifact.get(ArtifactKey::BroUstPair), "BRO/UST pair already exists");
            report.skipped.push(ArtifactKey::BroUstPair);
        } else {
            let msg = pair.create_pair_msg(artifact)?;
            let res = self.client.execute(&pair.factory, &msg, &[]).await?;
            let address = res
                .attribute(&[], "pair_contract_addr")
                .ok_or(ClientError::MissingEvent("pair_contract_addr"))?
                .to_string();
            info!(%address, "BRO/UST pair created");

            self.record(artifact, ArtifactKey::BroUstPair, address)?;
            report.deployed.push(ArtifactKey::BroUstPair);
        }

        if artifact.is_deployed(ArtifactKey::BroUstLpToken) {
            report.skipped.push(ArtifactKey::BroUstLpToken);
            return Ok(());
        }

        let pair_address = artifact.get(ArtifactKey::BroUstPair).to_string();
        let info: PairInfo = query_as(self.client, &pair_address, &pair.pair_query_msg()).await?;
        info!(lp_token = %info.liquidity_token, "BRO/UST lp token found");

        self.record(
            artifact,
            ArtifactKey::BroUstLpToken,
            info.liquidity_token.to_string(),
        )?;
        report.deployed.push(ArtifactKey::BroUstLpToken);
        Ok(())
    }

    /// Executes `wiring` unless the artifact records it as done, then records it.
    async fn wire(
        &mut self,
        artifact: &mut Artifact,
        wiring: &Wiring,
        report: &mut RunReport,
    ) -> Result<(), DeployError> {
        let name = wiring.name();
        if artifact.is_wired(&name) {
            info!(task = %name, "Already wired, skipping");
            return Ok(());
        }

        let contract = artifact.require(wiring.contract(), &name)?;
        let msg = wiring.msg(artifact)?;
        self.client.execute(&contract, &msg, &[]).await?;
        info!(task = %name, %contract, "Wiring done");

        artifact.mark_wired(&name);
        self.store.write(artifact, &self.network)?;
        report.wired.push(name);
        Ok(())
    }

    /// Hands every provisional contract to its final owner.
    ///
    /// A contract with wiring of `tasks` still unrecorded keeps the deployer
    /// in charge, the handoff is refused.
    async fn hand_off(
        &mut self,
        tasks: &[Task],
        artifact: &Artifact,
        report: &mut RunReport,
    ) -> Result<(), DeployError> {
        for entry in self.ownership.provisional() {
            let final_owner = match &entry.state {
                OwnershipState::Provisional { final_owner } => final_owner,
                _ => continue,
            };

            let pending = pending_wiring(tasks, artifact, entry.key);
            if !pending.is_empty() {
                return Err(DeployError::WiringPending {
                    contract: entry.key,
                    pending,
                });
            }

            let msg = handoff_msg(entry.key, final_owner, self.expires_in_blocks)?;
            self.client.execute(&entry.contract, &msg, &[]).await?;
            match entry.handoff() {
                Handoff::UpdateGov => info!(
                    contract = %entry.key,
                    new_gov_contract = %final_owner,
                    "Gov contract updated"
                ),
                Handoff::Propose => info!(
                    contract = %entry.key,
                    new_owner = %final_owner,
                    expires_in_blocks = self.expires_in_blocks,
                    "Ownership proposed, claim it from the owner address"
                ),
            }

            self.ownership.mark_handed_off(entry.key)?;
            report.handed_off.push(entry.key);
        }
        Ok(())
    }
}

/// Logs every recorded address of `artifact`.
pub fn log_status(artifact: &Artifact) {
    info!(network = %artifact.network, "Deployment status");
    for (key, address) in artifact.entries() {
        if address.is_empty() {
            warn!(contract = %key, "Not deployed");
        } else {
            info!(contract = %key, %address);
        }
    }
}
