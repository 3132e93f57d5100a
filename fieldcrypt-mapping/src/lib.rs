//! Encrypted property mapping for fieldcrypt.
//!
//! Composes three pieces per mapped property:
//! - a [`PayloadCodec`] turning the model value into plaintext bytes
//! - the shared [`EncryptionProvider`](fieldcrypt_crypto::EncryptionProvider)
//! - a [`StoreEncoding`] laying the ciphertext out in the column
//!
//! [`PropertyMapper::map`] resolves all three once and returns a
//! [`Converter`] that runs the pipeline in both directions.

mod codec;
mod converter;
mod mapper;
mod serializer;
mod store;

pub use codec::{CodecRegistry, CustomCodec, PayloadCodec};
pub use converter::Converter;
pub use mapper::PropertyMapper;
pub use serializer::{BincodeSerializer, JsonSerializer, Serializer};
pub use store::{decode_base64, encode_base64, StorageFormat, StoreEncoding, StoreValue};
