mod lcd;
mod wallet;

pub use lcd::{LcdClient, LcdOptions};
pub use wallet::{Wallet, DEFAULT_HD_PATH, LOCALTERRA_MNEMONIC};

use async_trait::async_trait;
use cosmwasm_std::{from_json, to_json_binary, Binary, Coin};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Chain operations needed by the deployer.
/// Every broadcasting call returns only once the transaction is included.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the signing wallet.
    fn sender(&self) -> String;

    /// Uploads `<wasm dir>/<wasm_file>` and returns its code id.
    async fn store_code(&self, wasm_file: &str) -> Result<u64, ClientError>;

    /// Instantiates `code_id` and returns the new contract address.
    async fn instantiate(
        &self,
        admin: Option<&str>,
        code_id: u64,
        label: &str,
        msg: &Binary,
        funds: &[Coin],
    ) -> Result<String, ClientError>;

    async fn execute(
        &self,
        contract: &str,
        msg: &Binary,
        funds: &[Coin],
    ) -> Result<TxResult, ClientError>;

    /// Smart query, returns the raw json response.
    async fn query(&self, contract: &str, msg: &Binary) -> Result<Binary, ClientError>;
}

/// Runs a smart query and decodes the response.
pub async fn query_as<C, Q, T>(client: &C, contract: &str, msg: &Q) -> Result<T, ClientError>
where
    C: ChainClient + ?Sized,
    Q: Serialize,
    T: DeserializeOwned,
{
    let data = client.query(contract, &to_json_binary(msg)?).await?;
    Ok(from_json(&data)?)
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TxResult {
    pub txhash: String,
    pub height: u64,
    pub events: Vec<Event>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Attribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Event {
    pub fn new(ty: &str, attributes: &[(&str, &str)]) -> Self {
        Event {
            ty: ty.to_string(),
            attributes: attributes
                .iter()
                .map(|(key, value)| Attribute {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

impl TxResult {
    /// First value of `key` among events of the given types; any type if `types` is empty.
    pub fn attribute(&self, types: &[&str], key: &str) -> Option<&str> {
        self.events
            .iter()
            .filter(|event| types.is_empty() || types.contains(&event.ty.as_str()))
            .flat_map(|event| event.attributes.iter())
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    pub fn code_id(&self) -> Result<u64, ClientError> {
        let value = self
            .attribute(&["store_code"], "code_id")
            .ok_or(ClientError::MissingEvent("code_id"))?;
        value
            .parse()
            .map_err(|_| ClientError::UnexpectedResponse(format!("invalid code id {}", value)))
    }

    pub fn contract_address(&self) -> Result<String, ClientError> {
        let types = ["instantiate", "instantiate_contract", "wasm"];
        self.attribute(&types, "_contract_address")
            .or_else(|| self.attribute(&types, "contract_address"))
            .map(|s| s.to_string())
            .ok_or(ClientError::MissingEvent("_contract_address"))
    }
}
