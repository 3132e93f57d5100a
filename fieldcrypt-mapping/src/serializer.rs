//! Pluggable payload serializers for custom model types.

use fieldcrypt_crypto::{CryptoError, CryptoResult};
use serde::{de::DeserializeOwned, Serialize};

/// Converts structured values to and from plaintext bytes.
pub trait Serializer: Send + Sync {
    /// Short name used in logs and debug output.
    fn name(&self) -> &'static str;

    /// Encodes `value` to bytes.
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> CryptoResult<Vec<u8>>;

    /// Decodes a value from the whole of `bytes`.
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> CryptoResult<T>;
}

/// JSON text via `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> CryptoResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CryptoError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> CryptoResult<T> {
        serde_json::from_slice(bytes).map_err(|e| CryptoError::Serialization(e.to_string()))
    }
}

/// Compact binary encoding via `bincode` with the standard configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeSerializer;

impl Serializer for BincodeSerializer {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> CryptoResult<Vec<u8>> {
        bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(|e| CryptoError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> CryptoResult<T> {
        let (value, read) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| CryptoError::Serialization(e.to_string()))?;
        if read != bytes.len() {
            return Err(CryptoError::Serialization(format!(
                "{} trailing bytes after value",
                bytes.len() - read
            )));
        }
        Ok(value)
    }
}
