//! Model value <-> plaintext byte codecs.
//!
//! A codec is picked once per mapped property from a [`CodecRegistry`] keyed
//! by the model's `TypeId`. The set of codec shapes is closed:
//!
//! - [`PayloadCodec::Utf8`]: `String` as UTF-8 (trailing NULs trimmed on decode)
//! - [`PayloadCodec::SecretUtf8`]: `Zeroizing<String>` as UTF-8 (all NULs dropped on decode)
//! - [`PayloadCodec::Bytes`]: `Vec<u8>` unchanged
//! - [`PayloadCodec::Custom`]: any serde type through a [`Serializer`]

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use fieldcrypt_crypto::{CryptoError, CryptoResult};
use serde::{de::DeserializeOwned, Serialize};
use zeroize::Zeroizing;

use crate::serializer::Serializer;

type SerializeFn = Arc<dyn Fn(&dyn Any) -> CryptoResult<Vec<u8>> + Send + Sync>;
type DeserializeFn = Arc<dyn Fn(&[u8]) -> CryptoResult<Box<dyn Any + Send>> + Send + Sync>;

/// Codec for a custom model type `T`, bound to one serializer.
#[derive(Clone)]
pub struct CustomCodec {
    type_id: TypeId,
    type_name: &'static str,
    serializer_name: &'static str,
    serialize: SerializeFn,
    deserialize: DeserializeFn,
}

impl CustomCodec {
    /// Builds a codec that serializes `T` with `serializer`.
    pub fn new<T, S>(serializer: S) -> Self
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        S: Serializer + 'static,
    {
        let serializer_name = serializer.name();
        let serializer = Arc::new(serializer);
        let decoder = Arc::clone(&serializer);

        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            serializer_name,
            serialize: Arc::new(move |value: &dyn Any| {
                let value = value
                    .downcast_ref::<T>()
                    .ok_or_else(CryptoError::not_supported::<T>)?;
                Serializer::serialize(serializer.as_ref(), value)
            }),
            deserialize: Arc::new(move |bytes: &[u8]| {
                let value: T = Serializer::deserialize(decoder.as_ref(), bytes)?;
                Ok(Box::new(value) as Box<dyn Any + Send>)
            }),
        }
    }

    /// Name of the serializer backing this codec.
    pub fn serializer_name(&self) -> &'static str {
        self.serializer_name
    }
}

/// Bidirectional conversion between a model value and plaintext bytes.
#[derive(Clone)]
pub enum PayloadCodec {
    Utf8,
    /// Secret text. Decoded values are built in place and wiped on drop.
    SecretUtf8,
    Bytes,
    Custom(CustomCodec),
}

impl PayloadCodec {
    /// Builds a custom codec for `T`.
    pub fn custom<T, S>(serializer: S) -> Self
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        S: Serializer + 'static,
    {
        PayloadCodec::Custom(CustomCodec::new::<T, S>(serializer))
    }

    /// `TypeId` of the model type this codec handles.
    pub fn type_id(&self) -> TypeId {
        match self {
            PayloadCodec::Utf8 => TypeId::of::<String>(),
            PayloadCodec::SecretUtf8 => TypeId::of::<Zeroizing<String>>(),
            PayloadCodec::Bytes => TypeId::of::<Vec<u8>>(),
            PayloadCodec::Custom(codec) => codec.type_id,
        }
    }

    /// Name of the model type this codec handles.
    pub fn type_name(&self) -> &'static str {
        match self {
            PayloadCodec::Utf8 => type_name::<String>(),
            PayloadCodec::SecretUtf8 => type_name::<Zeroizing<String>>(),
            PayloadCodec::Bytes => type_name::<Vec<u8>>(),
            PayloadCodec::Custom(codec) => codec.type_name,
        }
    }

    /// Whether the payload is text, where NUL bytes are never part of the value.
    pub fn is_text(&self) -> bool {
        matches!(self, PayloadCodec::Utf8 | PayloadCodec::SecretUtf8)
    }

    /// Whether this codec handles model type `T`.
    pub fn handles<T: Any>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }

    /// Serializes a model value to plaintext bytes.
    ///
    /// The returned buffer holds plaintext; callers wrap it in `Zeroizing`.
    pub fn encode<T: Any>(&self, value: &T) -> CryptoResult<Vec<u8>> {
        if !self.handles::<T>() {
            return Err(CryptoError::not_supported::<T>());
        }
        let value = value as &dyn Any;
        match self {
            PayloadCodec::Utf8 => value
                .downcast_ref::<String>()
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(CryptoError::not_supported::<T>),
            PayloadCodec::SecretUtf8 => value
                .downcast_ref::<Zeroizing<String>>()
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(CryptoError::not_supported::<T>),
            PayloadCodec::Bytes => value
                .downcast_ref::<Vec<u8>>()
                .cloned()
                .ok_or_else(CryptoError::not_supported::<T>),
            PayloadCodec::Custom(codec) => (codec.serialize)(value),
        }
    }

    /// Deserializes plaintext bytes into a model value.
    pub fn decode<T: Any>(&self, bytes: &[u8]) -> CryptoResult<T> {
        if !self.handles::<T>() {
            return Err(CryptoError::not_supported::<T>());
        }
        let value: Box<dyn Any + Send> = match self {
            PayloadCodec::Utf8 => Box::new(decode_utf8(bytes)?),
            PayloadCodec::SecretUtf8 => Box::new(decode_secret_utf8(bytes)?),
            PayloadCodec::Bytes => Box::new(bytes.to_vec()),
            PayloadCodec::Custom(codec) => (codec.deserialize)(bytes)?,
        };
        value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| CryptoError::not_supported::<T>())
    }
}

impl std::fmt::Debug for PayloadCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadCodec::Utf8 => f.write_str("Utf8"),
            PayloadCodec::SecretUtf8 => f.write_str("SecretUtf8"),
            PayloadCodec::Bytes => f.write_str("Bytes"),
            PayloadCodec::Custom(codec) => f
                .debug_struct("Custom")
                .field("type", &codec.type_name)
                .field("serializer", &codec.serializer_name)
                .finish(),
        }
    }
}

/// Fixed-width columns pad strings with NUL; those are not part of the value.
fn decode_utf8(bytes: &[u8]) -> CryptoResult<String> {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8(bytes[..end].to_vec())
        .map_err(|e| CryptoError::Format(format!("decrypted value is not valid UTF-8: {e}")))
}

/// Validates in place and copies only into a pre-sized zeroizing buffer.
fn decode_secret_utf8(bytes: &[u8]) -> CryptoResult<Zeroizing<String>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CryptoError::Format(format!("decrypted value is not valid UTF-8: {e}")))?;
    let mut secret = Zeroizing::new(String::with_capacity(text.len()));
    secret.extend(text.chars().filter(|&c| c != '\0'));
    Ok(secret)
}

/// Codecs by model type.
#[derive(Clone, Debug)]
pub struct CodecRegistry {
    codecs: HashMap<TypeId, PayloadCodec>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// Registry with `String`, `Zeroizing<String>` and `Vec<u8>` pre-registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_codec(PayloadCodec::Utf8);
        registry.register_codec(PayloadCodec::SecretUtf8);
        registry.register_codec(PayloadCodec::Bytes);
        registry
    }

    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Registers `T` with a custom serializer, replacing any previous codec.
    pub fn register<T, S>(&mut self, serializer: S) -> &mut Self
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        S: Serializer + 'static,
    {
        self.register_codec(PayloadCodec::custom::<T, S>(serializer))
    }

    /// Registers a prebuilt codec under the type it handles.
    pub fn register_codec(&mut self, codec: PayloadCodec) -> &mut Self {
        self.codecs.insert(codec.type_id(), codec);
        self
    }

    /// Whether a codec exists for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.codecs.contains_key(&TypeId::of::<T>())
    }

    /// Looks up the codec for `T`.
    pub fn resolve<T: Any>(&self) -> CryptoResult<PayloadCodec> {
        self.codecs
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(CryptoError::not_supported::<T>)
    }

    /// Number of registered model types.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether no model type is registered.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_utf8_trims_only_trailing_nuls() {
        assert_eq!(decode_utf8(b"ab\0c\0\0").unwrap(), "ab\0c");
        assert_eq!(decode_utf8(b"\0\0").unwrap(), "");
        assert_eq!(decode_utf8(b"").unwrap(), "");
    }

    #[test]
    fn decode_secret_utf8_drops_every_nul() {
        let secret = decode_secret_utf8(b"\0pa\0ss\0\0").unwrap();
        assert_eq!(secret.as_str(), "pass");
        assert!(secret.capacity() >= 8);
    }

    #[test]
    fn decode_utf8_rejects_invalid_sequences() {
        assert!(matches!(
            decode_utf8(&[0xFF, 0xFE]),
            Err(CryptoError::Format(_))
        ));
    }
}
