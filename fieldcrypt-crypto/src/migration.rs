//! Provider composition for moving data between encryption schemes.
//!
//! Reads go through the source provider, writes through the destination.
//! Either side may be absent, which lets the same mechanism add encryption
//! (no source), remove it (no destination), or re-key (both present).

use std::sync::Arc;

use crate::error::CryptoResult;
use crate::provider::{EncryptionProvider, PassthroughProvider};

/// Provider that decrypts with one scheme and encrypts with another.
#[derive(Clone, Default)]
pub struct MigrationProvider {
    source: Option<Arc<dyn EncryptionProvider>>,
    destination: Option<Arc<dyn EncryptionProvider>>,
}

impl MigrationProvider {
    /// Creates a migration from `source` to `destination`; `None` means plaintext.
    pub fn new(
        source: Option<Arc<dyn EncryptionProvider>>,
        destination: Option<Arc<dyn EncryptionProvider>>,
    ) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Source provider, if any.
    pub fn source(&self) -> Option<&Arc<dyn EncryptionProvider>> {
        self.source.as_ref()
    }

    /// Destination provider, if any.
    pub fn destination(&self) -> Option<&Arc<dyn EncryptionProvider>> {
        self.destination.as_ref()
    }

    /// True when neither side is configured.
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.destination.is_none()
    }

    /// Re-encrypts one stored value: decrypt with the source, encrypt with
    /// the destination.
    pub fn migrate(&self, stored: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        match self.decrypt(stored)? {
            Some(plaintext) => {
                let plaintext = zeroize::Zeroizing::new(plaintext);
                self.encrypt(plaintext.as_slice())
            }
            None => Ok(None),
        }
    }
}

impl EncryptionProvider for MigrationProvider {
    fn encrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        match &self.destination {
            Some(provider) => provider.encrypt(input),
            None => PassthroughProvider.encrypt(input),
        }
    }

    fn decrypt(&self, input: &[u8]) -> CryptoResult<Option<Vec<u8>>> {
        match &self.source {
            Some(provider) => provider.decrypt(input),
            None => PassthroughProvider.decrypt(input),
        }
    }

    fn preserves_trailing_zeros(&self) -> bool {
        [&self.source, &self.destination]
            .into_iter()
            .flatten()
            .all(|provider| provider.preserves_trailing_zeros())
    }
}

impl std::fmt::Debug for MigrationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationProvider")
            .field("source", &self.source.is_some())
            .field("destination", &self.destination.is_some())
            .finish()
    }
}
