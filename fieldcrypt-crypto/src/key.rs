//! Key material and key generation.
//!
//! Keys are AES keys of 128, 192 or 256 bits. Initialization vectors are
//! always one AES block (16 bytes) long.

use crate::error::{CryptoError, CryptoResult};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of an initialization vector in bytes.
pub const IV_SIZE: usize = BLOCK_SIZE;

/// Supported AES key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Key size in bits.
    pub fn bits(self) -> u32 {
        match self {
            KeySize::Aes128 => 128,
            KeySize::Aes192 => 192,
            KeySize::Aes256 => 256,
        }
    }

    /// Key size in bytes.
    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Maps a byte length back to a key size.
    pub fn from_len(len: usize) -> CryptoResult<Self> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            actual => Err(CryptoError::InvalidKeyLength { actual }),
        }
    }
}

impl TryFrom<u32> for KeySize {
    type Error = CryptoError;

    fn try_from(bits: u32) -> CryptoResult<Self> {
        match bits {
            128 => Ok(KeySize::Aes128),
            192 => Ok(KeySize::Aes192),
            256 => Ok(KeySize::Aes256),
            other => Err(CryptoError::Configuration(format!(
                "unsupported key size: {other} bits (expected 128, 192 or 256)"
            ))),
        }
    }
}

impl From<KeySize> for u32 {
    fn from(size: KeySize) -> Self {
        size.bits()
    }
}

/// An AES key with automatic zeroization on drop.
///
/// Not `PartialEq`; compare `as_bytes()` where equality is needed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: Vec<u8>,
}

impl Key {
    /// Creates a key from raw bytes, validating the length.
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        KeySize::from_len(bytes.len())?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Generates a random key of the given size.
    pub fn random(size: KeySize) -> Self {
        let mut bytes = vec![0u8; size.bytes()];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Returns the key size.
    pub fn size(&self) -> KeySize {
        match self.bytes.len() {
            16 => KeySize::Aes128,
            24 => KeySize::Aes192,
            _ => KeySize::Aes256,
        }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("size", &self.size())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A 16-byte initialization vector.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Iv {
    bytes: [u8; IV_SIZE],
}

impl Iv {
    /// Generates a random IV.
    pub fn random() -> Self {
        let mut bytes = [0u8; IV_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates an IV from raw bytes.
    pub fn from_bytes(bytes: [u8; IV_SIZE]) -> Self {
        Self { bytes }
    }

    /// Creates an IV from a slice, validating the length.
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        let bytes: [u8; IV_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidIvLength {
            expected: IV_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Returns the IV bytes.
    pub fn as_bytes(&self) -> &[u8; IV_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for Iv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iv").field("bytes", &"[REDACTED]").finish()
    }
}

/// A freshly generated key together with an IV.
#[derive(Clone, Debug)]
pub struct KeyInfo {
    pub key: Key,
    pub iv: Iv,
}

/// Generates a random key of the requested size plus a random IV.
///
/// The IV can be used as a static IV, or discarded when the provider runs
/// with per-call random IVs.
pub fn generate_key(size: KeySize) -> KeyInfo {
    KeyInfo {
        key: Key::random(size),
        iv: Iv::random(),
    }
}
