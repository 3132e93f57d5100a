//! Encryption providers.
//!
//! Property converters depend on `Arc<dyn EncryptionProvider>` and never see
//! raw keys. [`AesProvider`] is the real implementation; [`PassthroughProvider`]
//! leaves data untouched and backs the empty side of a migration.

use std::sync::Arc;

use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher::{self, CipherConfig, PaddingMode};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{generate_key, Iv, Key, KeyInfo, KeySize, IV_SIZE};

/// Trait for encrypting/decrypting opaque byte slices.
///
/// Empty input means "no value": both directions return `Ok(None)` for it.
/// Implementations hold no per-call state and are shareable across threads.
pub trait EncryptionProvider: Send + Sync {
    /// Encrypt `input`, returning the stored ciphertext blob.
    fn encrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>>;

    /// Decrypt a blob previously produced by `encrypt`.
    fn decrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>>;

    /// Whether plaintext ending in `0x00` bytes survives a round trip.
    ///
    /// Zero padding cannot tell padding from data, so providers using it
    /// return `false` and only text payloads may be mapped onto them.
    fn preserves_trailing_zeros(&self) -> bool {
        true
    }
}

impl<P: EncryptionProvider + ?Sized> EncryptionProvider for Arc<P> {
    fn encrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        (**self).encrypt(input)
    }

    fn decrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        (**self).decrypt(input)
    }

    fn preserves_trailing_zeros(&self) -> bool {
        (**self).preserves_trailing_zeros()
    }
}

impl<P: EncryptionProvider + ?Sized> EncryptionProvider for Box<P> {
    fn encrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        (**self).encrypt(input)
    }

    fn decrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        (**self).decrypt(input)
    }

    fn preserves_trailing_zeros(&self) -> bool {
        (**self).preserves_trailing_zeros()
    }
}

/// Typed encrypt/decrypt built on top of any [`EncryptionProvider`].
///
/// `encrypt_with` runs `serialize -> encrypt -> encode`, `decrypt_with` runs
/// `decode -> decrypt -> deserialize`. Plaintext buffers are zeroized on drop.
pub trait EncryptionProviderExt: EncryptionProvider {
    /// Encrypt a model value into its stored form.
    fn encrypt_with<M, S, F, E>(
        &self,
        value: Option<&M>,
        serialize: F,
        encode: E,
    ) -> CryptoResult<Option<S>>
    where
        M: ?Sized,
        F: FnOnce(&M) -> CryptoResult<Vec<u8>>,
        E: FnOnce(Vec<u8>) -> CryptoResult<S>,
    {
        let Some(value) = value else {
            return Ok(None);
        };
        let plaintext = Zeroizing::new(serialize(value)?);
        match self.encrypt(plaintext.as_slice())? {
            Some(ciphertext) => encode(ciphertext).map(Some),
            None => Ok(None),
        }
    }

    /// Decrypt a stored value back into its model form.
    fn decrypt_with<S, M, D, F>(
        &self,
        stored: Option<&S>,
        decode: D,
        deserialize: F,
    ) -> CryptoResult<Option<M>>
    where
        S: ?Sized,
        D: FnOnce(&S) -> CryptoResult<Vec<u8>>,
        F: FnOnce(&[u8]) -> CryptoResult<M>,
    {
        let Some(stored) = stored else {
            return Ok(None);
        };
        let ciphertext = decode(stored)?;
        match self.decrypt(&ciphertext)? {
            Some(plaintext) => {
                let plaintext = Zeroizing::new(plaintext);
                deserialize(plaintext.as_slice()).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl<P: EncryptionProvider + ?Sized> EncryptionProviderExt for P {}

/// How the provider picks an IV for each encryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IvPolicy {
    /// The same IV for every call. Equal plaintexts give equal ciphertexts,
    /// which keeps encrypted columns searchable by equality.
    Static(Iv),
    /// A fresh IV per call, prepended to the ciphertext.
    Random,
}

impl IvPolicy {
    fn label(&self) -> &'static str {
        match self {
            IvPolicy::Static(_) => "static",
            IvPolicy::Random => "random",
        }
    }
}

/// AES provider.
///
/// Output layout is `ciphertext` with a static IV and `iv || ciphertext`
/// with random IVs.
#[derive(Clone, Debug)]
pub struct AesProvider {
    key: Key,
    iv: IvPolicy,
    config: CipherConfig,
}

impl AesProvider {
    /// Creates a provider from validated key material.
    pub fn new(key: Key, iv: IvPolicy, config: CipherConfig) -> Self {
        debug!(
            key_bits = key.size().bits(),
            iv_policy = iv.label(),
            mode = ?config.mode,
            padding = ?config.padding,
            "AES provider constructed"
        );
        Self { key, iv, config }
    }

    /// Creates a provider that reuses `iv` for every call.
    pub fn with_static_iv(key: Key, iv: Iv, config: CipherConfig) -> Self {
        Self::new(key, IvPolicy::Static(iv), config)
    }

    /// Creates a provider that generates a new IV per call.
    pub fn with_random_iv(key: Key, config: CipherConfig) -> Self {
        Self::new(key, IvPolicy::Random, config)
    }

    /// Creates a provider from raw slices. `None` selects random IVs.
    pub fn from_slices(key: &[u8], iv: Option<&[u8]>, config: CipherConfig) -> CryptoResult<Self> {
        let key = Key::from_slice(key)?;
        let iv = match iv {
            Some(iv) => IvPolicy::Static(Iv::from_slice(iv)?),
            None => IvPolicy::Random,
        };
        Ok(Self::new(key, iv, config))
    }

    /// Generates key material suitable for this provider.
    pub fn generate_key(size: KeySize) -> KeyInfo {
        generate_key(size)
    }

    /// Returns the key size in use.
    pub fn key_size(&self) -> KeySize {
        self.key.size()
    }

    /// Returns the IV policy.
    pub fn iv_policy(&self) -> &IvPolicy {
        &self.iv
    }

    /// Returns the cipher configuration.
    pub fn config(&self) -> &CipherConfig {
        &self.config
    }
}

impl EncryptionProvider for AesProvider {
    fn encrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        match &self.iv {
            IvPolicy::Static(iv) => cipher::encrypt(&self.key, iv, &self.config, input),
            IvPolicy::Random => {
                let iv = Iv::random();
                let Some(ciphertext) = cipher::encrypt(&self.key, &iv, &self.config, input)? else {
                    return Ok(None);
                };
                let mut output = Vec::with_capacity(IV_SIZE + ciphertext.len());
                output.extend_from_slice(iv.as_bytes());
                output.extend_from_slice(&ciphertext);
                Ok(Some(output))
            }
        }
    }

    fn decrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        match &self.iv {
            IvPolicy::Static(iv) => cipher::decrypt(&self.key, iv, &self.config, input),
            IvPolicy::Random => {
                if input.is_empty() {
                    return Ok(None);
                }
                if input.len() < IV_SIZE {
                    return Err(CryptoError::Cipher(format!(
                        "data too short: {} bytes, expected at least a {IV_SIZE}-byte IV",
                        input.len()
                    )));
                }
                // An IV with no ciphertext behind it decrypts to no value.
                let (iv, ciphertext) = input.split_at(IV_SIZE);
                let iv = Iv::from_slice(iv)?;
                cipher::decrypt(&self.key, &iv, &self.config, ciphertext)
            }
        }
    }

    fn preserves_trailing_zeros(&self) -> bool {
        self.config.padding != PaddingMode::Zeros
    }
}

/// No-op provider. Data passes through unchanged; empty input is still
/// reported as no value.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughProvider;

impl EncryptionProvider for PassthroughProvider {
    fn encrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        Ok((!input.is_empty()).then(|| input.to_vec()))
    }

    fn decrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        Ok((!input.is_empty()).then(|| input.to_vec()))
    }
}
