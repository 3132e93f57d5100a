//! Symmetric field encryption for fieldcrypt.
//!
//! This crate handles:
//! - AES-CBC encryption with PKCS#7 or zero padding ([`cipher`])
//! - Key and IV generation with automatic zeroization ([`key`])
//! - The [`EncryptionProvider`] contract consumed by property converters
//! - Migration between providers ([`MigrationProvider`])
//!
//! # Ciphertext Format
//!
//! With a random IV per call: `iv (16 bytes) || ciphertext`.
//! With a static IV: `ciphertext` only; the IV is part of the provider's
//! configuration and never transmitted.
//!
//! Empty input is "no value" in both directions and yields `Ok(None)`.

pub mod cipher;
mod error;
pub mod key;
mod migration;
mod provider;
mod settings;

pub use cipher::{BlockMode, CipherConfig, PaddingMode};
pub use error::{CryptoError, CryptoResult, ErrorKind};
pub use key::{generate_key, Iv, Key, KeyInfo, KeySize, BLOCK_SIZE, IV_SIZE};
pub use migration::MigrationProvider;
pub use provider::{
    AesProvider, EncryptionProvider, EncryptionProviderExt, IvPolicy, PassthroughProvider,
};
pub use settings::ProviderSettings;
