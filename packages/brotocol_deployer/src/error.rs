use std::path::PathBuf;

use cosmwasm_std::StdError;
use thiserror::Error;

use crate::artifact::ArtifactKey;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to access artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config section `{0}` is missing")]
    MissingSection(&'static str),

    #[error("Invalid bonding mode: {0}")]
    InvalidBondingMode(String),

    #[error("Invalid address in `{field}`: {address}")]
    InvalidAddress { field: String, address: String },
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transaction failed with code {code} ({codespace}): {raw_log}")]
    Tx {
        code: u32,
        codespace: String,
        raw_log: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LCD responded with status {status}: {body}")]
    Lcd { status: u16, body: String },

    #[error("Invalid LCD url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Attribute `{0}` not found in transaction events")]
    MissingEvent(&'static str),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Unexpected LCD response: {0}")]
    UnexpectedResponse(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Transaction {hash} was not included after {attempts} attempts")]
    Timeout { hash: String, attempts: u32 },
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{key} address must be stored in artifact before deploying {required_by}. {hint}")]
    MissingDependency {
        key: ArtifactKey,
        required_by: String,
        hint: String,
    },

    #[error("Dependency cycle between tasks: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),

    #[error("{key} is produced by both {first} and {second}")]
    DuplicateProducer {
        key: ArtifactKey,
        first: String,
        second: String,
    },

    #[error("Chain returned an invalid address for {key}: {address}")]
    InvalidAddress { key: ArtifactKey, address: String },

    #[error("Failed to build message for {contract}: {source}")]
    InvalidMessage {
        contract: String,
        #[source]
        source: StdError,
    },

    #[error("Ownership of {} was never handed off", .0.join(", "))]
    OwnershipNotHandedOff(Vec<String>),

    #[error("Refusing to hand off {contract}, wiring still pending: {}", .pending.join(", "))]
    WiringPending {
        contract: ArtifactKey,
        pending: Vec<String>,
    },
}
