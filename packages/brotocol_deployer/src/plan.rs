use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use brotocol_protocol::{bbro_minter, rewards, staking};
use cosmwasm_std::{to_json_binary, Binary, Uint128};
use cw20::Cw20ExecuteMsg;
use tracing::info;

use crate::artifact::{Artifact, ArtifactKey};
use crate::config::Config;
use crate::contracts::{
    Airdrop, BbroMinter, BbroToken, Bonding, BroToken, BroUstPair, Descriptor, Distributor,
    EpochManager, Oracle, RewardsPool, Staking, TokenPool, Treasury, Vesting, WhitelistSale,
};
use crate::error::{ConfigError, DeployError};

/// Predefined deployments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanKind {
    /// Protocol contracts, expects token and oracle to exist.
    Core,
    /// Token, pair, oracle and the core contracts.
    Full,
    /// Token, airdrop and vesting.
    Ido,
    /// BRO/UST pair and its oracle.
    Pair,
    Token,
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlanKind::Core => "core",
            PlanKind::Full => "full",
            PlanKind::Ido => "ido",
            PlanKind::Pair => "pair",
            PlanKind::Token => "token",
        };
        f.write_str(name)
    }
}

/// Admin call issued after the contracts it connects are deployed.
#[derive(Clone, Debug, PartialEq)]
pub enum Wiring {
    /// `update_config { bbro_token }` on the bbro minter.
    SetBbroToken,
    /// Whitelists staking as a bbro minter.
    AddMinter,
    /// Whitelists the distributor in the rewards pool.
    AddDistributor,
    /// Registers the community bonding contract in staking.
    SetCommunityBonding,
    /// BRO transfer from the deployer wallet.
    TransferBro {
        recipient: ArtifactKey,
        amount: Uint128,
    },
}

impl Wiring {
    pub fn name(&self) -> String {
        match self {
            Wiring::SetBbroToken => "set bbro token in bbro minter".to_string(),
            Wiring::AddMinter => "whitelist staking in bbro minter".to_string(),
            Wiring::AddDistributor => "whitelist distributor in rewards pool".to_string(),
            Wiring::SetCommunityBonding => "set community bonding in staking".to_string(),
            Wiring::TransferBro { recipient, .. } => format!("transfer bro to {}", recipient),
        }
    }

    /// Contract the message is executed on.
    pub fn contract(&self) -> ArtifactKey {
        match self {
            Wiring::SetBbroToken | Wiring::AddMinter => ArtifactKey::BbroMinter,
            Wiring::AddDistributor => ArtifactKey::RewardsPool,
            Wiring::SetCommunityBonding => ArtifactKey::Staking,
            Wiring::TransferBro { .. } => ArtifactKey::BroToken,
        }
    }

    /// Contract whose address the call carries.
    pub fn target(&self) -> ArtifactKey {
        match self {
            Wiring::SetBbroToken => ArtifactKey::BbroToken,
            Wiring::AddMinter => ArtifactKey::Staking,
            Wiring::AddDistributor => ArtifactKey::Distributor,
            Wiring::SetCommunityBonding => ArtifactKey::Bonding,
            Wiring::TransferBro { recipient, .. } => *recipient,
        }
    }

    pub fn reads(&self) -> Vec<ArtifactKey> {
        vec![self.contract(), self.target()]
    }

    pub fn msg(&self, artifact: &Artifact) -> Result<Binary, DeployError> {
        let name = self.name();
        let target = artifact.require(self.target(), &name)?;
        let res = match self {
            Wiring::SetBbroToken => to_json_binary(&bbro_minter::ExecuteMsg::UpdateConfig {
                new_gov_contract: None,
                bbro_token: Some(target),
            }),
            Wiring::AddMinter => {
                to_json_binary(&bbro_minter::ExecuteMsg::AddMinter { minter: target })
            }
            Wiring::AddDistributor => to_json_binary(&rewards::ExecuteMsg::AddDistributor {
                distributor: target,
            }),
            Wiring::SetCommunityBonding => {
                to_json_binary(&staking::ExecuteMsg::set_community_bonding(target))
            }
            Wiring::TransferBro { amount, .. } => to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: target,
                amount: *amount,
            }),
        };

        res.map_err(|source| DeployError::InvalidMessage {
            contract: name,
            source,
        })
    }
}

pub enum Task {
    Deploy(Box<dyn Descriptor>),
    CreatePair(BroUstPair),
    Wire(Wiring),
}

impl Task {
    fn deploy(descriptor: impl Descriptor + 'static) -> Self {
        Task::Deploy(Box::new(descriptor))
    }

    pub fn name(&self) -> String {
        match self {
            Task::Deploy(d) => d.label().to_string(),
            Task::CreatePair(_) => BroUstPair::LABEL.to_string(),
            Task::Wire(w) => w.name(),
        }
    }

    pub fn reads(&self) -> Vec<ArtifactKey> {
        match self {
            Task::Deploy(d) => d.reads(),
            Task::CreatePair(p) => p.reads(),
            Task::Wire(w) => w.reads(),
        }
    }

    pub fn writes(&self) -> Vec<ArtifactKey> {
        match self {
            Task::Deploy(d) => vec![d.key()],
            Task::CreatePair(p) => p.writes(),
            Task::Wire(_) => vec![],
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name())
            .field("reads", &self.reads())
            .field("writes", &self.writes())
            .finish()
    }
}

/// Tasks of `kind`, in declaration order. Fails on any missing config section.
pub fn build(kind: PlanKind, config: &Config) -> Result<Vec<Task>, DeployError> {
    let mut tasks = vec![];
    match kind {
        PlanKind::Token => token_tasks(config, &mut tasks)?,
        PlanKind::Pair => pair_tasks(config, &mut tasks)?,
        PlanKind::Ido => {
            token_tasks(config, &mut tasks)?;
            tasks.push(Task::deploy(Airdrop::new(config.airdrop()?.clone())));
            tasks.push(Task::deploy(Vesting::new(config.vesting()?.clone())));
            transfer_tasks(config, &[ArtifactKey::Airdrop, ArtifactKey::Vesting], &mut tasks);
        }
        PlanKind::Core => core_tasks(config, &mut tasks)?,
        PlanKind::Full => {
            token_tasks(config, &mut tasks)?;
            pair_tasks(config, &mut tasks)?;
            core_tasks(config, &mut tasks)?;
        }
    }
    Ok(tasks)
}

fn token_tasks(config: &Config, tasks: &mut Vec<Task>) -> Result<(), ConfigError> {
    if !config.deploy_token {
        info!("Token deployment is disabled");
        return Ok(());
    }

    tasks.push(Task::deploy(BroToken::new(
        config.bro_token()?.clone(),
        config.initial_bro_balance_holder_address()?,
    )));
    Ok(())
}

fn pair_tasks(config: &Config, tasks: &mut Vec<Task>) -> Result<(), ConfigError> {
    let pair = config.bro_ust_pair()?;
    if pair.factory_address.is_empty() {
        return Err(ConfigError::MissingSection("bro_ust_pair.factory_address"));
    }

    if pair.create_pair {
        tasks.push(Task::CreatePair(BroUstPair::new(&pair.factory_address)));
    } else {
        info!("BRO/UST pair creation is disabled");
    }
    tasks.push(Task::deploy(Oracle::new(
        config.oracle()?.clone(),
        &pair.factory_address,
    )));
    Ok(())
}

fn core_tasks(config: &Config, tasks: &mut Vec<Task>) -> Result<(), ConfigError> {
    let bonding = config.bonding()?;
    let community_bonding = bonding.bonding_mode.is_community();

    tasks.push(Task::deploy(Airdrop::new(config.airdrop()?.clone())));
    tasks.push(Task::deploy(Vesting::new(config.vesting()?.clone())));
    tasks.push(Task::deploy(BbroMinter::new(config.bbro_minter()?.clone())));
    tasks.push(Task::deploy(BbroToken::new(config.bbro_token()?.clone())));
    tasks.push(Task::Wire(Wiring::SetBbroToken));
    tasks.push(Task::deploy(RewardsPool::new(config.rewards_pool()?.clone())));
    tasks.push(Task::deploy(Treasury::mvp(config.mvp_treasury()?.clone())));
    tasks.push(Task::deploy(Treasury::ido(config.ido_treasury()?.clone())));
    tasks.push(Task::deploy(Treasury::op_reserve(
        config.op_reserve_treasury()?.clone(),
    )));
    tasks.push(Task::deploy(TokenPool::new(config.token_pool()?.clone())));
    tasks.push(Task::deploy(EpochManager::new(config.epoch_manager()?.clone())));
    tasks.push(Task::deploy(Staking::new(
        config.staking()?.clone(),
        community_bonding,
    )));
    tasks.push(Task::deploy(Bonding::new(bonding.clone())));
    if community_bonding {
        tasks.push(Task::Wire(Wiring::SetCommunityBonding));
    }
    tasks.push(Task::deploy(WhitelistSale::new(
        config.whitelist_sale()?.clone(),
    )));
    tasks.push(Task::deploy(Distributor::new(config.distributor()?.clone())));
    tasks.push(Task::Wire(Wiring::AddDistributor));
    tasks.push(Task::Wire(Wiring::AddMinter));
    transfer_tasks(
        config,
        &[
            ArtifactKey::Airdrop,
            ArtifactKey::Vesting,
            ArtifactKey::RewardsPool,
        ],
        tasks,
    );
    Ok(())
}

fn transfer_tasks(config: &Config, recipients: &[ArtifactKey], tasks: &mut Vec<Task>) {
    let distributions = match &config.bro_distributions {
        Some(d) => d,
        None => return,
    };

    for recipient in recipients {
        let amount = match recipient {
            ArtifactKey::Airdrop => distributions.airdrop,
            ArtifactKey::Vesting => distributions.vesting,
            ArtifactKey::RewardsPool => distributions.rewards,
            _ => None,
        };
        if let Some(amount) = amount.filter(|a| !a.is_zero()) {
            tasks.push(Task::Wire(Wiring::TransferBro {
                recipient: *recipient,
                amount,
            }));
        }
    }
}

/// Wiring of `tasks` executed on `contract` and not yet recorded in `artifact`.
pub fn pending_wiring(tasks: &[Task], artifact: &Artifact, contract: ArtifactKey) -> Vec<String> {
    tasks
        .iter()
        .filter_map(|task| match task {
            Task::Wire(wiring) if wiring.contract() == contract => Some(wiring.name()),
            _ => None,
        })
        .filter(|name| !artifact.is_wired(name))
        .collect()
}

/// Orders `tasks` so every task runs after the producers of the keys it reads.
///
/// Ties are broken by declaration order. Keys without a producer in the plan
/// must already be recorded in `artifact`.
pub fn schedule(tasks: Vec<Task>, artifact: &Artifact) -> Result<Vec<Task>, DeployError> {
    let mut producers: HashMap<ArtifactKey, usize> = HashMap::new();
    for (i, task) in tasks.iter().enumerate() {
        for key in task.writes() {
            if let Some(&first) = producers.get(&key) {
                return Err(DeployError::DuplicateProducer {
                    key,
                    first: tasks[first].name(),
                    second: task.name(),
                });
            }
            producers.insert(key, i);
        }
    }

    let mut dependents: Vec<Vec<usize>> = vec![vec![]; tasks.len()];
    let mut in_degree: Vec<usize> = vec![0; tasks.len()];
    for (i, task) in tasks.iter().enumerate() {
        for key in task.reads() {
            match producers.get(&key) {
                Some(&producer) if producer != i => {
                    dependents[producer].push(i);
                    in_degree[i] += 1;
                }
                Some(_) => {}
                None if artifact.is_deployed(key) => {}
                None => {
                    return Err(DeployError::MissingDependency {
                        key,
                        required_by: task.name(),
                        hint: key.hint().to_string(),
                    })
                }
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(i, _)| Reverse(i))
        .collect();
    let mut order: Vec<usize> = Vec::with_capacity(tasks.len());
    while let Some(Reverse(i)) = ready.pop() {
        order.push(i);
        for &dependent in dependents[i].iter() {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if order.len() != tasks.len() {
        let cycle = tasks
            .iter()
            .enumerate()
            .filter(|(i, _)| in_degree[*i] > 0)
            .map(|(_, task)| task.name())
            .collect();
        return Err(DeployError::DependencyCycle(cycle));
    }

    let mut slots: Vec<Option<Task>> = tasks.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::contracts::InstantiateMsg;
    use crate::testing::{mock_address, mock_config_json};

    fn load_config(value: serde_json::Value) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        std::fs::write(loader.path("localterra"), value.to_string()).unwrap();
        loader.load("localterra").unwrap()
    }

    fn names(tasks: &[Task]) -> Vec<String> {
        tasks.iter().map(Task::name).collect()
    }

    struct Fake {
        key: ArtifactKey,
        reads: Vec<ArtifactKey>,
        label: &'static str,
    }

    impl Descriptor for Fake {
        fn key(&self) -> ArtifactKey {
            self.key
        }

        fn wasm(&self) -> &'static str {
            "fake.wasm"
        }

        fn label(&self) -> &'static str {
            self.label
        }

        fn reads(&self) -> Vec<ArtifactKey> {
            self.reads.clone()
        }

        fn instantiate_msg(&self, _: &Artifact, _: &str) -> Result<InstantiateMsg, DeployError> {
            unimplemented!()
        }
    }

    fn fake(label: &'static str, key: ArtifactKey, reads: Vec<ArtifactKey>) -> Task {
        Task::deploy(Fake { key, reads, label })
    }

    #[test]
    fn core_plan_order() {
        let config = load_config(mock_config_json(false));
        let mut artifact = Artifact::new("localterra");
        artifact.set(ArtifactKey::BroToken, mock_address(90));
        artifact.set(ArtifactKey::Oracle, mock_address(91));
        artifact.set(ArtifactKey::BroUstLpToken, mock_address(92));

        let tasks = schedule(build(PlanKind::Core, &config).unwrap(), &artifact).unwrap();
        assert_eq!(
            names(&tasks),
            vec![
                "brotocol airdrop",
                "brotocol vesting",
                "brotocol bbro minter",
                "brotocol bbro token",
                "set bbro token in bbro minter",
                "brotocol rewards pool",
                "brotocol mvp treasury",
                "brotocol ido treasury",
                "brotocol op reserve treasury",
                "brotocol token pool",
                "brotocol epoch manager",
                "brotocol staking",
                "brotocol bonding",
                "brotocol whitelist sale",
                "brotocol distributor",
                "whitelist distributor in rewards pool",
                "whitelist staking in bbro minter",
                "transfer bro to airdrop",
                "transfer bro to vesting",
                "transfer bro to rewards_pool",
            ]
        );
    }

    #[test]
    fn community_plan_registers_bonding() {
        let config = load_config(mock_config_json(true));
        let tasks = build(PlanKind::Core, &config).unwrap();
        let names = names(&tasks);

        let bonding = names.iter().position(|n| n == "brotocol bonding").unwrap();
        assert_eq!(names[bonding + 1], "set community bonding in staking");
    }

    #[test]
    fn producers_run_first() {
        let tasks = vec![
            fake("distributor", ArtifactKey::Distributor, vec![ArtifactKey::Staking]),
            fake("staking", ArtifactKey::Staking, vec![ArtifactKey::EpochManager]),
            fake("airdrop", ArtifactKey::Airdrop, vec![]),
            fake("epoch manager", ArtifactKey::EpochManager, vec![]),
        ];

        let tasks = schedule(tasks, &Artifact::new("localterra")).unwrap();
        assert_eq!(
            names(&tasks),
            vec!["airdrop", "epoch manager", "staking", "distributor"]
        );
    }

    #[test]
    fn cycle_is_reported() {
        let tasks = vec![
            fake("airdrop", ArtifactKey::Airdrop, vec![]),
            fake("staking", ArtifactKey::Staking, vec![ArtifactKey::Bonding]),
            fake("bonding", ArtifactKey::Bonding, vec![ArtifactKey::Staking]),
        ];

        match schedule(tasks, &Artifact::new("localterra")) {
            Err(DeployError::DependencyCycle(cycle)) => {
                assert_eq!(cycle, vec!["staking", "bonding"])
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn duplicate_producer_is_reported() {
        let tasks = vec![
            fake("treasury", ArtifactKey::MvpTreasury, vec![]),
            fake("another treasury", ArtifactKey::MvpTreasury, vec![]),
        ];

        match schedule(tasks, &Artifact::new("localterra")) {
            Err(DeployError::DuplicateProducer { key, first, second }) => {
                assert_eq!(key, ArtifactKey::MvpTreasury);
                assert_eq!(first, "treasury");
                assert_eq!(second, "another treasury");
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn missing_producer_uses_artifact() {
        let tasks = || vec![fake("airdrop", ArtifactKey::Airdrop, vec![ArtifactKey::BroToken])];

        match schedule(tasks(), &Artifact::new("localterra")) {
            Err(e @ DeployError::MissingDependency { .. }) => {
                assert!(e.to_string().contains("Deploy token first"))
            }
            res => panic!("unexpected result: {:?}", res),
        }

        let mut artifact = Artifact::new("localterra");
        artifact.set(ArtifactKey::BroToken, mock_address(90));
        assert_eq!(schedule(tasks(), &artifact).unwrap().len(), 1);
    }

    #[test]
    fn token_plan_respects_flag() {
        let mut value = mock_config_json(false);
        value["deploy_token"] = serde_json::json!(false);
        let config = load_config(value);
        assert!(build(PlanKind::Token, &config).unwrap().is_empty());

        let config = load_config(mock_config_json(false));
        assert_eq!(names(&build(PlanKind::Token, &config).unwrap()), vec!["brotocol bro token"]);
    }

    #[test]
    fn pair_plan_requires_factory() {
        let mut value = mock_config_json(false);
        value["bro_ust_pair"]["factory_address"] = serde_json::json!("");
        let config = load_config(value);

        match build(PlanKind::Pair, &config) {
            Err(DeployError::Config(ConfigError::MissingSection(name))) => {
                assert_eq!(name, "bro_ust_pair.factory_address")
            }
            res => panic!("unexpected result: {:?}", res),
        }

        let mut value = mock_config_json(false);
        value["bro_ust_pair"]["create_pair"] = serde_json::json!(false);
        let config = load_config(value);
        assert_eq!(names(&build(PlanKind::Pair, &config).unwrap()), vec!["brotocol oracle"]);
    }

    #[test]
    fn missing_section_fails_build() {
        let mut value = mock_config_json(false);
        value.as_object_mut().unwrap().remove("distributor");
        let config = load_config(value);

        match build(PlanKind::Core, &config) {
            Err(DeployError::Config(ConfigError::MissingSection(name))) => {
                assert_eq!(name, "distributor")
            }
            res => panic!("unexpected result: {:?}", res),
        }
        assert_eq!(build(PlanKind::Ido, &config).unwrap().len(), 5);
    }

    #[test]
    fn wiring_messages() {
        let mut artifact = Artifact::new("localterra");
        artifact.set(ArtifactKey::Airdrop, mock_address(100));

        let transfer = Wiring::TransferBro {
            recipient: ArtifactKey::Airdrop,
            amount: Uint128::from(1000u128),
        };
        assert_eq!(transfer.contract(), ArtifactKey::BroToken);
        assert_eq!(
            cosmwasm_std::from_json::<Cw20ExecuteMsg>(&transfer.msg(&artifact).unwrap()).unwrap(),
            Cw20ExecuteMsg::Transfer {
                recipient: mock_address(100),
                amount: Uint128::from(1000u128),
            }
        );

        assert!(Wiring::AddDistributor.msg(&artifact).is_err());
    }

    #[test]
    fn set_bbro_token_keeps_gov_contract() {
        let mut artifact = Artifact::new("localterra");
        artifact.set(ArtifactKey::BbroToken, mock_address(101));

        let msg = Wiring::SetBbroToken.msg(&artifact).unwrap();
        assert_eq!(
            cosmwasm_std::from_json::<serde_json::Value>(&msg).unwrap(),
            serde_json::json!({
                "update_config": { "new_gov_contract": null, "bbro_token": mock_address(101) }
            })
        );
    }

    #[test]
    fn pending_wiring_per_contract() {
        let config = load_config(mock_config_json(false));
        let tasks = build(PlanKind::Core, &config).unwrap();
        let mut artifact = Artifact::new("localterra");

        assert_eq!(
            pending_wiring(&tasks, &artifact, ArtifactKey::BbroMinter),
            vec!["set bbro token in bbro minter", "whitelist staking in bbro minter"]
        );

        artifact.mark_wired("set bbro token in bbro minter");
        assert_eq!(
            pending_wiring(&tasks, &artifact, ArtifactKey::BbroMinter),
            vec!["whitelist staking in bbro minter"]
        );
        assert_eq!(
            pending_wiring(&tasks, &artifact, ArtifactKey::RewardsPool),
            vec!["whitelist distributor in rewards pool"]
        );
        assert!(pending_wiring(&tasks, &artifact, ArtifactKey::Staking).is_empty());
    }
}
