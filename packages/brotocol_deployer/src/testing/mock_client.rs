use std::collections::HashMap;
use std::sync::Mutex;

use astroport::asset::{AssetInfo, PairInfo};
use astroport::factory::PairType;
use async_trait::async_trait;
use cosmrs::AccountId;
use cosmwasm_std::{from_json, to_json_binary, Addr, Binary, Coin};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ChainClient, Event, TxResult};
use crate::error::ClientError;

/// Deterministic bech32 address for tests.
pub fn mock_address(seed: u8) -> String {
    AccountId::new("terra", &[seed; 20]).unwrap().to_string()
}

pub const MOCK_SENDER_SEED: u8 = 1;

#[derive(Clone, Debug, PartialEq)]
pub enum MockCall {
    StoreCode {
        wasm: String,
    },
    Instantiate {
        admin: Option<String>,
        code_id: u64,
        label: String,
        msg: Value,
    },
    Execute {
        contract: String,
        msg: Value,
    },
    Query {
        contract: String,
        msg: Value,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Pair {},
    Config {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    CreatePair { asset_infos: [AssetInfo; 2] },
    UpdateConfig(Map<String, Value>),
}

#[derive(Clone, Default)]
pub struct FactoryQuerier {
    // pair address -> pair info
    pairs: HashMap<String, PairInfo>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<MockCall>,
    next_code_id: u64,
    next_address: u8,
    // address -> config, starting from the instantiate msg
    contracts: HashMap<String, Value>,
    factory_querier: FactoryQuerier,
    fail_instantiate: Option<String>,
}

/// In-memory chain recording every call.
pub struct MockClient {
    sender: String,
    state: Mutex<MockState>,
}

impl MockClient {
    pub fn new() -> Self {
        MockClient {
            sender: mock_address(MOCK_SENDER_SEED),
            state: Mutex::new(MockState {
                next_code_id: 1,
                next_address: 100,
                ..MockState::default()
            }),
        }
    }

    /// Instantiating a contract with `label` fails with a chain error.
    pub fn fail_instantiate(&self, label: Option<&str>) {
        self.state.lock().unwrap().fail_instantiate = label.map(|l| l.to_string());
    }

    /// Simulates `claim_ownership` by `owner`.
    pub fn claim_ownership(&self, contract: &str, owner: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(msg) = state.contracts.get_mut(contract) {
            msg["owner"] = Value::String(owner.to_string());
        }
    }

    /// Current config of `contract`, as `config {}` returns it.
    pub fn config(&self, contract: &str) -> Value {
        self.state.lock().unwrap().contracts[contract].clone()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn stored(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::StoreCode { wasm } => Some(wasm),
                _ => None,
            })
            .collect()
    }

    pub fn instantiated(&self) -> Vec<(String, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Instantiate { label, msg, .. } => Some((label, msg)),
                _ => None,
            })
            .collect()
    }

    pub fn instantiated_labels(&self) -> Vec<String> {
        self.instantiated().into_iter().map(|(label, _)| label).collect()
    }

    pub fn instantiate_msg(&self, label: &str) -> Value {
        self.instantiated()
            .into_iter()
            .find(|(l, _)| l == label)
            .map(|(_, msg)| msg)
            .unwrap_or_else(|| panic!("{} was not instantiated", label))
    }

    pub fn executed(&self) -> Vec<(String, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Execute { contract, msg } => Some((contract, msg)),
                _ => None,
            })
            .collect()
    }

    fn json(msg: &Binary) -> Value {
        from_json(msg).unwrap()
    }
}

impl MockState {
    fn new_address(&mut self) -> String {
        let address = mock_address(self.next_address);
        self.next_address += 1;
        address
    }

    fn handle_execute(&mut self, contract: &str, msg: &Binary) -> Vec<Event> {
        match from_json(msg) {
            Ok(ExecuteMsg::CreatePair { asset_infos }) => {
                let pair = self.new_address();
                let lp_token = self.new_address();
                self.factory_querier.pairs.insert(
                    pair.clone(),
                    PairInfo {
                        asset_infos,
                        contract_addr: Addr::unchecked(&pair),
                        liquidity_token: Addr::unchecked(lp_token),
                        pair_type: PairType::Xyk {},
                    },
                );
                vec![Event::new(
                    "wasm",
                    &[("action", "create_pair"), ("pair_contract_addr", &pair)],
                )]
            }
            Ok(ExecuteMsg::UpdateConfig(update)) => {
                if let Some(config) = self.contracts.get_mut(contract) {
                    for (field, value) in update.into_iter().filter(|(_, v)| !v.is_null()) {
                        let field = match field.as_str() {
                            "new_gov_contract" => "gov_contract".to_string(),
                            _ => field,
                        };
                        config[field.as_str()] = value;
                    }
                }
                vec![Event::new("wasm", &[("action", "update_config")])]
            }
            Err(_) => vec![Event::new("wasm", &[])],
        }
    }

    fn handle_query(&self, contract: &str, msg: &Binary) -> Result<Binary, ClientError> {
        match from_json(msg)? {
            QueryMsg::Pair {} => match self.factory_querier.pairs.get(contract) {
                Some(info) => Ok(to_json_binary(info)?),
                None => Err(ClientError::Lcd {
                    status: 500,
                    body: "No pair info exists".to_string(),
                }),
            },
            QueryMsg::Config {} => match self.contracts.get(contract) {
                Some(config) => Ok(to_json_binary(config)?),
                None => Err(ClientError::Lcd {
                    status: 500,
                    body: format!("contract {} not found", contract),
                }),
            },
        }
    }
}

#[async_trait]
impl ChainClient for MockClient {
    fn sender(&self) -> String {
        self.sender.clone()
    }

    async fn store_code(&self, wasm_file: &str) -> Result<u64, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::StoreCode {
            wasm: wasm_file.to_string(),
        });

        let code_id = state.next_code_id;
        state.next_code_id += 1;
        Ok(code_id)
    }

    async fn instantiate(
        &self,
        admin: Option<&str>,
        code_id: u64,
        label: &str,
        msg: &Binary,
        _funds: &[Coin],
    ) -> Result<String, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::Instantiate {
            admin: admin.map(|a| a.to_string()),
            code_id,
            label: label.to_string(),
            msg: Self::json(msg),
        });

        if state.fail_instantiate.as_deref() == Some(label) {
            return Err(ClientError::Tx {
                code: 5,
                codespace: "wasm".to_string(),
                raw_log: "failed to execute message; message index: 0: \
                          instantiate wasm contract failed"
                    .to_string(),
            });
        }

        let address = state.new_address();
        let mut config = Self::json(msg);
        // bbro minter starts without a token
        if config.get("gov_contract").is_some() && config.get("bro_token").is_none() {
            config["bbro_token"] = Value::String(String::new());
        }
        state.contracts.insert(address.clone(), config);
        Ok(address)
    }

    async fn execute(
        &self,
        contract: &str,
        msg: &Binary,
        _funds: &[Coin],
    ) -> Result<TxResult, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::Execute {
            contract: contract.to_string(),
            msg: Self::json(msg),
        });

        let events = state.handle_execute(contract, msg);
        Ok(TxResult {
            txhash: format!("{:064X}", state.calls.len()),
            height: state.calls.len() as u64,
            events,
        })
    }

    async fn query(&self, contract: &str, msg: &Binary) -> Result<Binary, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall::Query {
            contract: contract.to_string(),
            msg: Self::json(msg),
        });
        state.handle_query(contract, msg)
    }
}
