//! Property mapping: builds converters for encrypted model properties.

use std::any::Any;
use std::sync::Arc;

use fieldcrypt_crypto::{CryptoResult, EncryptionProvider};
use tracing::debug;

use crate::codec::CodecRegistry;
use crate::converter::Converter;
use crate::store::StorageFormat;

/// Binds encrypted properties to the shared provider.
///
/// One mapper serves a whole model. Every call to [`PropertyMapper::map`]
/// resolves the codec and store encoding once and returns a converter that
/// can be cloned freely into per-row code.
#[derive(Clone)]
pub struct PropertyMapper {
    registry: CodecRegistry,
    provider: Arc<dyn EncryptionProvider>,
}

impl PropertyMapper {
    /// Mapper with the default codec registry (`String`, `Zeroizing<String>`, `Vec<u8>`).
    pub fn new(provider: Arc<dyn EncryptionProvider>) -> Self {
        Self::with_registry(provider, CodecRegistry::new())
    }

    /// Mapper with a caller-built codec registry.
    pub fn with_registry(provider: Arc<dyn EncryptionProvider>, registry: CodecRegistry) -> Self {
        Self { registry, provider }
    }

    /// Codecs available to [`PropertyMapper::map`].
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Mutable access for registering custom model types.
    pub fn registry_mut(&mut self) -> &mut CodecRegistry {
        &mut self.registry
    }

    /// Provider shared by every converter this mapper builds.
    pub fn provider(&self) -> &Arc<dyn EncryptionProvider> {
        &self.provider
    }

    /// Builds the converter for `property` of model type `T`.
    ///
    /// Fails with `NotSupported` if no codec is registered for `T`, and with
    /// `Configuration` if the provider would corrupt a non-text payload.
    pub fn map<T: Any>(&self, property: &str, format: StorageFormat) -> CryptoResult<Converter<T>> {
        let codec = self.registry.resolve::<T>()?;
        let model_type = codec.type_name();
        let encoding = format.resolve(&codec);
        let converter = Converter::new(codec, Arc::clone(&self.provider), encoding)?;
        debug!(
            property = %property,
            model_type,
            format = ?format,
            encoding = ?encoding,
            "Encrypted property mapped"
        );
        Ok(converter)
    }
}

impl std::fmt::Debug for PropertyMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyMapper")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
