//! AES block cipher operations.
//!
//! The functions here run the raw cipher only. They never embed the IV in
//! their output; that is the provider's job.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{Iv, Key, KeySize, BLOCK_SIZE};
use aes::cipher::block_padding::{Pkcs7, ZeroPadding};
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use serde::{Deserialize, Serialize};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Block chaining mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum BlockMode {
    #[default]
    Cbc,
}

/// Padding applied to the final block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingMode {
    /// PKCS#7: always adds 1..=16 bytes, validated on decrypt.
    #[default]
    Pkcs7,
    /// Zero bytes up to the block boundary. Block-aligned input gets no
    /// padding, and trailing zero bytes are stripped on decrypt.
    Zeros,
}

/// Cipher parameters fixed at provider construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    pub mode: BlockMode,
    pub padding: PaddingMode,
}

impl CipherConfig {
    /// Creates a config with the given mode and padding.
    pub fn new(mode: BlockMode, padding: PaddingMode) -> Self {
        Self { mode, padding }
    }
}

/// Encrypts `plaintext`.
///
/// Returns `Ok(None)` for empty input without running the cipher.
pub fn encrypt(
    key: &Key,
    iv: &Iv,
    config: &CipherConfig,
    plaintext: &[u8],
) -> CryptoResult<Option<Vec<u8>>> {
    if plaintext.is_empty() {
        return Ok(None);
    }

    let ciphertext = match config.mode {
        BlockMode::Cbc => match key.size() {
            KeySize::Aes128 => pad_encrypt(
                Aes128CbcEnc::new_from_slices(key.as_bytes(), iv.as_bytes())
                    .map_err(|_| invalid_key(key))?,
                config.padding,
                plaintext,
            ),
            KeySize::Aes192 => pad_encrypt(
                Aes192CbcEnc::new_from_slices(key.as_bytes(), iv.as_bytes())
                    .map_err(|_| invalid_key(key))?,
                config.padding,
                plaintext,
            ),
            KeySize::Aes256 => pad_encrypt(
                Aes256CbcEnc::new_from_slices(key.as_bytes(), iv.as_bytes())
                    .map_err(|_| invalid_key(key))?,
                config.padding,
                plaintext,
            ),
        },
    };

    Ok(Some(ciphertext))
}

/// Decrypts `ciphertext`.
///
/// Returns `Ok(None)` for empty input. Fails with [`CryptoError::Cipher`] when
/// the input is not block-aligned or the padding does not validate.
pub fn decrypt(
    key: &Key,
    iv: &Iv,
    config: &CipherConfig,
    ciphertext: &[u8],
) -> CryptoResult<Option<Vec<u8>>> {
    if ciphertext.is_empty() {
        return Ok(None);
    }
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Cipher(format!(
            "ciphertext length {} is not a multiple of the {BLOCK_SIZE}-byte block size",
            ciphertext.len()
        )));
    }

    let plaintext = match config.mode {
        BlockMode::Cbc => match key.size() {
            KeySize::Aes128 => unpad_decrypt(
                Aes128CbcDec::new_from_slices(key.as_bytes(), iv.as_bytes())
                    .map_err(|_| invalid_key(key))?,
                config.padding,
                ciphertext,
            )?,
            KeySize::Aes192 => unpad_decrypt(
                Aes192CbcDec::new_from_slices(key.as_bytes(), iv.as_bytes())
                    .map_err(|_| invalid_key(key))?,
                config.padding,
                ciphertext,
            )?,
            KeySize::Aes256 => unpad_decrypt(
                Aes256CbcDec::new_from_slices(key.as_bytes(), iv.as_bytes())
                    .map_err(|_| invalid_key(key))?,
                config.padding,
                ciphertext,
            )?,
        },
    };

    Ok(Some(plaintext))
}

fn pad_encrypt<E: BlockEncryptMut>(
    encryptor: E,
    padding: PaddingMode,
    plaintext: &[u8],
) -> Vec<u8> {
    match padding {
        PaddingMode::Pkcs7 => encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        PaddingMode::Zeros => encryptor.encrypt_padded_vec_mut::<ZeroPadding>(plaintext),
    }
}

fn unpad_decrypt<D: BlockDecryptMut>(
    decryptor: D,
    padding: PaddingMode,
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let result = match padding {
        PaddingMode::Pkcs7 => decryptor.decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        PaddingMode::Zeros => decryptor.decrypt_padded_vec_mut::<ZeroPadding>(ciphertext),
    };
    result.map_err(|_| {
        CryptoError::Cipher("invalid padding (wrong key or corrupted data)".to_string())
    })
}

fn invalid_key(key: &Key) -> CryptoError {
    CryptoError::InvalidKeyLength {
        actual: key.as_bytes().len(),
    }
}
