//! Serializable provider configuration.
//!
//! Key and IV are carried as standard Base64 so settings can live in JSON
//! alongside the rest of an application's configuration:
//!
//! ```json
//! { "key": "<base64>", "iv": "<base64>", "cipher": { "mode": "cbc", "padding": "pkcs7" } }
//! ```
//!
//! Omitting `iv` selects a random IV per encryption.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher::CipherConfig;
use crate::error::{CryptoError, CryptoResult};
use crate::key::{Iv, Key, KeyInfo};
use crate::provider::{AesProvider, IvPolicy};

/// Settings for building an [`AesProvider`].
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base64 key (16, 24 or 32 bytes once decoded).
    pub key: String,
    /// Base64 static IV. `None` selects random IVs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    #[serde(default)]
    pub cipher: CipherConfig,
}

impl ProviderSettings {
    /// Parses settings from JSON.
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CryptoError::Configuration(format!("invalid provider settings: {e}")))
    }

    /// Builds settings from generated key material.
    pub fn from_key_info(info: &KeyInfo, static_iv: bool, cipher: CipherConfig) -> Self {
        Self {
            key: STANDARD.encode(info.key.as_bytes()),
            iv: static_iv.then(|| STANDARD.encode(info.iv.as_bytes())),
            cipher,
        }
    }

    /// Decodes and validates the key.
    pub fn key(&self) -> CryptoResult<Key> {
        let bytes = Zeroizing::new(
            STANDARD
                .decode(&self.key)
                .map_err(|e| CryptoError::Configuration(format!("key is not valid base64: {e}")))?,
        );
        Key::from_slice(&bytes)
    }

    /// Decodes and validates the IV policy.
    pub fn iv_policy(&self) -> CryptoResult<IvPolicy> {
        match &self.iv {
            Some(encoded) => {
                let bytes = STANDARD
                    .decode(encoded)
                    .map_err(|e| CryptoError::Configuration(format!("iv is not valid base64: {e}")))?;
                Ok(IvPolicy::Static(Iv::from_slice(&bytes)?))
            }
            None => Ok(IvPolicy::Random),
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("key", &"[REDACTED]")
            .field("iv", &self.iv.as_ref().map(|_| "[REDACTED]"))
            .field("cipher", &self.cipher)
            .finish()
    }
}

impl AesProvider {
    /// Builds a provider from settings, failing fast on any invalid field.
    pub fn from_settings(settings: &ProviderSettings) -> CryptoResult<Self> {
        let key = settings.key()?;
        let iv = settings.iv_policy()?;
        debug!(static_iv = settings.iv.is_some(), "Loading AES provider from settings");
        Ok(AesProvider::new(key, iv, settings.cipher))
    }
}
