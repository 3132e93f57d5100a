//! Store encodings: how encrypted bytes are laid out in a column.

use base64::{engine::general_purpose::STANDARD, Engine};
use fieldcrypt_crypto::{CryptoError, CryptoResult};
use serde::{Deserialize, Serialize};

use crate::codec::PayloadCodec;

/// Storage format requested for an encrypted property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// Base64 for text models, binary for everything else.
    #[default]
    Default,
    Binary,
    Base64,
}

impl StorageFormat {
    /// Resolves the concrete encoding for a property using `codec`.
    pub fn resolve(self, codec: &PayloadCodec) -> StoreEncoding {
        match self {
            StorageFormat::Binary => StoreEncoding::Binary,
            StorageFormat::Base64 => StoreEncoding::Base64,
            StorageFormat::Default if codec.is_text() => StoreEncoding::Base64,
            StorageFormat::Default => StoreEncoding::Binary,
        }
    }
}

/// Concrete store encoding, fixed once a property is mapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreEncoding {
    /// Raw bytes, stored as-is.
    Binary,
    /// Standard-alphabet, padded Base64 text.
    Base64,
}

impl StoreEncoding {
    /// Wraps encrypted bytes in their stored representation.
    pub fn encode(self, bytes: Vec<u8>) -> StoreValue {
        match self {
            StoreEncoding::Binary => StoreValue::Binary(bytes),
            StoreEncoding::Base64 => StoreValue::Text(encode_base64(&bytes)),
        }
    }

    /// Recovers encrypted bytes from a stored value.
    pub fn decode(self, value: &StoreValue) -> CryptoResult<Vec<u8>> {
        match (self, value) {
            (StoreEncoding::Binary, StoreValue::Binary(bytes)) => Ok(bytes.clone()),
            (StoreEncoding::Base64, StoreValue::Text(text)) => decode_base64(text),
            (StoreEncoding::Binary, StoreValue::Text(_)) => Err(CryptoError::Format(
                "expected binary store value, got text".to_string(),
            )),
            (StoreEncoding::Base64, StoreValue::Binary(_)) => Err(CryptoError::Format(
                "expected base64 text store value, got binary".to_string(),
            )),
        }
    }
}

/// A value as persisted in the database column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreValue {
    Binary(Vec<u8>),
    Text(String),
}

impl StoreValue {
    /// Raw bytes, if this is a binary value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            StoreValue::Binary(bytes) => Some(bytes),
            StoreValue::Text(_) => None,
        }
    }

    /// Text, if this is a Base64 value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoreValue::Text(text) => Some(text),
            StoreValue::Binary(_) => None,
        }
    }
}

impl From<Vec<u8>> for StoreValue {
    fn from(bytes: Vec<u8>) -> Self {
        StoreValue::Binary(bytes)
    }
}

impl From<String> for StoreValue {
    fn from(text: String) -> Self {
        StoreValue::Text(text)
    }
}

/// Encodes bytes as standard, padded Base64 with no line wrapping.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard Base64, failing with a format error on malformed input.
pub fn decode_base64(text: &str) -> CryptoResult<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}
