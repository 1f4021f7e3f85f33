use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cosmrs::cosmwasm::{MsgExecuteContract, MsgInstantiateContract, MsgStoreCode};
use cosmrs::tendermint::chain::Id as ChainId;
use cosmrs::tx::{Body, Fee, Msg, SignDoc, SignerInfo};
use cosmrs::{AccountId, Any};
use cosmwasm_std::{Binary, Coin};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use super::wallet::Wallet;
use super::{ChainClient, Event, TxResult};
use crate::error::ClientError;

#[derive(Clone, Debug)]
pub struct LcdOptions {
    pub lcd: Url,
    pub chain_id: String,
    pub wasm_dir: PathBuf,
    pub gas_price: f64,
    pub fee_denom: String,
    pub gas_adjustment: f64,
    /// pause after every included transaction
    pub settle_delay: Duration,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

/// [`ChainClient`] talking to a node through its LCD REST api.
pub struct LcdClient {
    http: reqwest::Client,
    options: LcdOptions,
    wallet: Wallet,
}

#[derive(Deserialize)]
struct AccountResponse {
    account: BaseAccount,
}

#[derive(Deserialize)]
struct BaseAccount {
    account_number: String,
    sequence: String,
}

#[derive(Deserialize)]
struct SimulateResponse {
    gas_info: GasInfo,
}

#[derive(Deserialize)]
struct GasInfo {
    gas_used: String,
}

#[derive(Deserialize)]
struct TxEnvelope {
    tx_response: TxResponse,
}

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default)]
    height: String,
    txhash: String,
    #[serde(default)]
    code: u32,
    #[serde(default)]
    codespace: String,
    #[serde(default)]
    raw_log: String,
    #[serde(default)]
    logs: Vec<AbciLog>,
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct AbciLog {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct SmartQueryResponse {
    data: Value,
}

impl TxEnvelope {
    /// Included transaction as a [`TxResult`], or its failure.
    fn into_result(self) -> Result<TxResult, ClientError> {
        self.tx_response.check()?;
        Ok(self.tx_response.into_result())
    }
}

impl TxResponse {
    fn check(&self) -> Result<(), ClientError> {
        if self.code != 0 {
            return Err(ClientError::Tx {
                code: self.code,
                codespace: self.codespace.clone(),
                raw_log: self.raw_log.clone(),
            });
        }
        Ok(())
    }

    fn into_result(self) -> TxResult {
        let mut events: Vec<Event> = self.logs.into_iter().flat_map(|log| log.events).collect();
        if events.is_empty() {
            events = self.events;
        }

        TxResult {
            txhash: self.txhash,
            height: self.height.parse().unwrap_or_default(),
            events,
        }
    }
}

impl LcdClient {
    pub fn new(options: LcdOptions, wallet: Wallet) -> Self {
        LcdClient {
            http: reqwest::Client::new(),
            options,
            wallet,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.options.lcd.clone();
        url.path_segments_mut()
            .map_err(|_| {
                let msg = format!("{} cannot be a base url", self.options.lcd);
                ClientError::UnexpectedResponse(msg)
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Lcd {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.http.get(url).send().await?;
        Self::read(response).await
    }

    async fn post<T: DeserializeOwned>(&self, url: Url, body: &Value) -> Result<T, ClientError> {
        let response = self.http.post(url).json(body).send().await?;
        Self::read(response).await
    }

    async fn account(&self) -> Result<(u64, u64), ClientError> {
        let address = self.wallet.account_id().to_string();
        let url = self.endpoint(&["cosmos", "auth", "v1beta1", "accounts", &address])?;
        let res: AccountResponse = self.get(url).await?;

        let parse = |field: &str, value: &str| {
            value.parse::<u64>().map_err(|_| {
                ClientError::UnexpectedResponse(format!("invalid {} {}", field, value))
            })
        };
        Ok((
            parse("account number", &res.account.account_number)?,
            parse("sequence", &res.account.sequence)?,
        ))
    }

    fn sign(
        &self,
        msg: Any,
        account_number: u64,
        sequence: u64,
        fee: Fee,
    ) -> Result<Vec<u8>, ClientError> {
        let chain_id = ChainId::from_str(&self.options.chain_id).map_err(signing)?;
        let body = Body::new(vec![msg], "", 0u32);
        let auth_info =
            SignerInfo::single_direct(Some(self.wallet.public_key()), sequence).auth_info(fee);
        let sign_doc =
            SignDoc::new(&body, &auth_info, &chain_id, account_number).map_err(signing)?;
        let raw = sign_doc.sign(self.wallet.signing_key()).map_err(signing)?;
        raw.to_bytes().map_err(signing)
    }

    fn fee(&self, amount: u128, gas_limit: u64) -> Result<Fee, ClientError> {
        let coin = cosmrs::Coin::new(amount, &self.options.fee_denom).map_err(signing)?;
        Ok(Fee::from_amount_and_gas(coin, gas_limit))
    }

    async fn simulate(&self, tx_bytes: &[u8]) -> Result<u64, ClientError> {
        let url = self.endpoint(&["cosmos", "tx", "v1beta1", "simulate"])?;
        let res: SimulateResponse = self
            .post(url, &json!({ "tx_bytes": STANDARD.encode(tx_bytes) }))
            .await?;
        res.gas_info.gas_used.parse().map_err(|_| {
            ClientError::UnexpectedResponse(format!("invalid gas used {}", res.gas_info.gas_used))
        })
    }

    async fn wait_for_tx(&self, hash: &str) -> Result<TxResult, ClientError> {
        let url = self.endpoint(&["cosmos", "tx", "v1beta1", "txs", hash])?;
        for _ in 0..self.options.max_poll_attempts {
            let response = self.http.get(url.clone()).send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                tokio::time::sleep(self.options.poll_interval).await;
                continue;
            }

            let envelope: TxEnvelope = Self::read(response).await?;
            return envelope.into_result();
        }

        Err(ClientError::Timeout {
            hash: hash.to_string(),
            attempts: self.options.max_poll_attempts,
        })
    }

    /// Simulates, signs, broadcasts and waits for inclusion of a single message.
    async fn broadcast(&self, msg: Any) -> Result<TxResult, ClientError> {
        let (account_number, sequence) = self.account().await?;

        let simulation = self.sign(msg.clone(), account_number, sequence, self.fee(0, 0)?)?;
        let gas_used = self.simulate(&simulation).await?;
        let gas_limit = (gas_used as f64 * self.options.gas_adjustment).ceil() as u64;
        let amount = (gas_limit as f64 * self.options.gas_price).ceil() as u128;
        debug!(gas_used, gas_limit, amount, "Estimated fee");

        let tx_bytes = self.sign(msg, account_number, sequence, self.fee(amount, gas_limit)?)?;
        let url = self.endpoint(&["cosmos", "tx", "v1beta1", "txs"])?;
        let envelope: TxEnvelope = self
            .post(
                url,
                &json!({ "tx_bytes": STANDARD.encode(tx_bytes), "mode": "BROADCAST_MODE_SYNC" }),
            )
            .await?;
        envelope.tx_response.check()?;

        let hash = envelope.tx_response.txhash;
        debug!(%hash, "Transaction broadcast");
        let result = self.wait_for_tx(&hash).await?;
        info!(%hash, height = result.height, "Transaction included");

        tokio::time::sleep(self.options.settle_delay).await;
        Ok(result)
    }

    fn account_id(address: &str) -> Result<AccountId, ClientError> {
        AccountId::from_str(address)
            .map_err(|e| ClientError::Signing(format!("invalid address {}: {}", address, e)))
    }
}

fn signing(e: impl fmt::Display) -> ClientError {
    ClientError::Signing(e.to_string())
}

fn to_any(msg: impl Msg) -> Result<Any, ClientError> {
    msg.to_any().map_err(signing)
}

fn convert_funds(funds: &[Coin]) -> Result<Vec<cosmrs::Coin>, ClientError> {
    funds
        .iter()
        .map(|coin| {
            cosmrs::Coin::new(coin.amount.u128(), &coin.denom).map_err(signing)
        })
        .collect()
}

#[async_trait]
impl ChainClient for LcdClient {
    fn sender(&self) -> String {
        self.wallet.account_id().to_string()
    }

    async fn store_code(&self, wasm_file: &str) -> Result<u64, ClientError> {
        let path = self.options.wasm_dir.join(wasm_file);
        let wasm_byte_code = tokio::fs::read(&path)
            .await
            .map_err(|source| ClientError::Io { path, source })?;

        let msg = MsgStoreCode {
            sender: self.wallet.account_id().clone(),
            wasm_byte_code,
            instantiate_permission: None,
        };
        self.broadcast(to_any(msg)?).await?.code_id()
    }

    async fn instantiate(
        &self,
        admin: Option<&str>,
        code_id: u64,
        label: &str,
        msg: &Binary,
        funds: &[Coin],
    ) -> Result<String, ClientError> {
        let msg = MsgInstantiateContract {
            sender: self.wallet.account_id().clone(),
            admin: admin.map(Self::account_id).transpose()?,
            code_id,
            label: Some(label.to_string()),
            msg: msg.to_vec(),
            funds: convert_funds(funds)?,
        };
        self.broadcast(to_any(msg)?).await?.contract_address()
    }

    async fn execute(
        &self,
        contract: &str,
        msg: &Binary,
        funds: &[Coin],
    ) -> Result<TxResult, ClientError> {
        let msg = MsgExecuteContract {
            sender: self.wallet.account_id().clone(),
            contract: Self::account_id(contract)?,
            msg: msg.to_vec(),
            funds: convert_funds(funds)?,
        };
        self.broadcast(to_any(msg)?).await
    }

    /// Queries are not followed by the settle delay.
    async fn query(&self, contract: &str, msg: &Binary) -> Result<Binary, ClientError> {
        let encoded = STANDARD.encode(msg.as_slice());
        let url = self.endpoint(&[
            "cosmwasm", "wasm", "v1", "contract", contract, "smart", &encoded,
        ])?;
        let res: SmartQueryResponse = self.get(url).await?;
        Ok(Binary(serde_json::to_vec(&res.data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(value: Value) -> TxEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rejected_broadcast_is_an_error() {
        // sync broadcast answers with the CheckTx result only
        let res = envelope(json!({
            "tx_response": {
                "height": "0",
                "txhash": "6B1F0A9A3C2C41A49F1D2F8E2A4D5B1E9A8C7D6E5F4A3B2C1D0E9F8A7B6C5D4E",
                "codespace": "sdk",
                "code": 13,
                "raw_log": "insufficient fees; got: 1uluna required: 15000uluna: insufficient fee",
                "logs": [],
                "events": []
            }
        }))
        .into_result();

        match res {
            Err(ClientError::Tx {
                code,
                codespace,
                raw_log,
            }) => {
                assert_eq!(code, 13);
                assert_eq!(codespace, "sdk");
                assert!(raw_log.starts_with("insufficient fees"));
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn failed_delivery_is_an_error() {
        let res = envelope(json!({
            "tx_response": {
                "height": "1234",
                "txhash": "AB",
                "codespace": "wasm",
                "code": 5,
                "raw_log": "message index: 0: Unauthorized: execute wasm contract failed",
                "logs": [],
                "gas_wanted": "200000",
                "gas_used": "91234"
            }
        }))
        .into_result();

        match res {
            Err(ClientError::Tx {
                code,
                codespace,
                raw_log,
            }) => {
                assert_eq!(code, 5);
                assert_eq!(codespace, "wasm");
                assert!(raw_log.contains("Unauthorized"));
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn events_come_from_logs() {
        let tx = envelope(json!({
            "tx_response": {
                "height": "1235",
                "txhash": "CD",
                "code": 0,
                "logs": [{
                    "msg_index": 0,
                    "events": [
                        { "type": "store_code", "attributes": [{ "key": "code_id", "value": "7" }] }
                    ]
                }],
                "events": [
                    { "type": "tx", "attributes": [{ "key": "fee", "value": "4500uluna" }] }
                ]
            }
        }))
        .into_result()
        .unwrap();

        assert_eq!(tx.height, 1235);
        assert_eq!(tx.events.len(), 1);
        assert_eq!(tx.code_id().unwrap(), 7);
    }

    #[test]
    fn empty_logs_fall_back_to_events() {
        let tx = envelope(json!({
            "tx_response": {
                "height": "1236",
                "txhash": "EF",
                "logs": [],
                "events": [
                    { "type": "tx", "attributes": [{ "key": "fee", "value": "4500uluna" }] },
                    {
                        "type": "instantiate",
                        "attributes": [
                            { "key": "_contract_address", "value": "terra1contract" },
                            { "key": "code_id", "value": "7" }
                        ]
                    }
                ]
            }
        }))
        .into_result()
        .unwrap();

        assert_eq!(tx.txhash, "EF");
        assert_eq!(tx.events.len(), 2);
        assert_eq!(tx.contract_address().unwrap(), "terra1contract");
    }
}
