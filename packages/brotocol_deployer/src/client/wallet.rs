use std::str::FromStr;

use bip32::{DerivationPath, Language, Mnemonic};
use cosmrs::crypto::secp256k1::SigningKey;
use cosmrs::crypto::PublicKey;
use cosmrs::AccountId;

use crate::error::ClientError;

/// Terra coin type.
pub const DEFAULT_HD_PATH: &str = "m/44'/330'/0'/0/0";

/// Mnemonic of the `test1` account funded on LocalTerra.
pub const LOCALTERRA_MNEMONIC: &str = "satisfy adjust timber high purchase tuition stool faith fine install that you unaware feed domain license impose boss human eager hat rent enjoy dawn";

/// Signing key derived from a BIP-39 mnemonic.
pub struct Wallet {
    key: SigningKey,
    account: AccountId,
}

impl Wallet {
    pub fn from_mnemonic(phrase: &str, hd_path: &str, prefix: &str) -> Result<Self, ClientError> {
        let mnemonic = Mnemonic::new(phrase.trim(), Language::English)
            .map_err(|e| ClientError::Signing(format!("invalid mnemonic: {}", e)))?;
        let path = DerivationPath::from_str(hd_path)
            .map_err(|e| ClientError::Signing(format!("invalid hd path {}: {}", hd_path, e)))?;
        let seed = mnemonic.to_seed("");

        let key = SigningKey::derive_from_path(seed.as_bytes(), &path)
            .map_err(|e| ClientError::Signing(e.to_string()))?;
        let account = key
            .public_key()
            .account_id(prefix)
            .map_err(|e| ClientError::Signing(e.to_string()))?;

        Ok(Wallet { key, account })
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }
}
