//! Per-property converters.
//!
//! A [`Converter`] is built once when a property is mapped and holds the
//! composed `to_store` / `from_store` pair:
//!
//! ```text
//! to_store:   model -> codec.encode -> provider.encrypt -> encoding.encode -> store
//! from_store: store -> encoding.decode -> provider.decrypt -> codec.decode -> model
//! ```

use std::any::Any;
use std::sync::Arc;

use fieldcrypt_crypto::{
    CryptoError, CryptoResult, EncryptionProvider, EncryptionProviderExt, PassthroughProvider,
};

use crate::codec::PayloadCodec;
use crate::store::{StoreEncoding, StoreValue};

type ToStoreFn<T> = Arc<dyn Fn(Option<&T>) -> CryptoResult<Option<StoreValue>> + Send + Sync>;
type FromStoreFn<T> = Arc<dyn Fn(Option<&StoreValue>) -> CryptoResult<Option<T>> + Send + Sync>;

/// Composed model <-> store conversion for one property.
pub struct Converter<T> {
    encoding: StoreEncoding,
    to_store: ToStoreFn<T>,
    from_store: FromStoreFn<T>,
}

impl<T: Any> Converter<T> {
    /// Builds an encrypting converter.
    ///
    /// Fails with [`CryptoError::NotSupported`] if `codec` does not handle `T`,
    /// and with [`CryptoError::Configuration`] if `provider` drops trailing
    /// zero bytes and the payload is not text.
    pub fn new(
        codec: PayloadCodec,
        provider: Arc<dyn EncryptionProvider>,
        encoding: StoreEncoding,
    ) -> CryptoResult<Self> {
        if !codec.handles::<T>() {
            return Err(CryptoError::not_supported::<T>());
        }
        if !codec.is_text() && !provider.preserves_trailing_zeros() {
            return Err(CryptoError::Configuration(format!(
                "{} payloads cannot round-trip through a zero-padded cipher; use PKCS#7 padding",
                codec.type_name()
            )));
        }
        let codec = Arc::new(codec);

        let to_store: ToStoreFn<T> = {
            let codec = Arc::clone(&codec);
            let provider = Arc::clone(&provider);
            Arc::new(move |value: Option<&T>| {
                provider.encrypt_with(
                    value,
                    |value| codec.encode(value),
                    |bytes| Ok(encoding.encode(bytes)),
                )
            })
        };

        let from_store: FromStoreFn<T> = Arc::new(move |stored: Option<&StoreValue>| {
            provider.decrypt_with(
                stored,
                |stored| encoding.decode(stored),
                |bytes| codec.decode::<T>(bytes),
            )
        });

        Ok(Self {
            encoding,
            to_store,
            from_store,
        })
    }

    /// Builds a converter that encodes without encrypting.
    pub fn plain(codec: PayloadCodec, encoding: StoreEncoding) -> CryptoResult<Self> {
        Self::new(codec, Arc::new(PassthroughProvider), encoding)
    }
}

impl<T> Converter<T> {
    /// Converts a model value into its stored form. `None` in, `None` out.
    pub fn to_store(&self, value: Option<&T>) -> CryptoResult<Option<StoreValue>> {
        (self.to_store)(value)
    }

    /// Converts a stored value back into its model form.
    pub fn from_store(&self, value: Option<&StoreValue>) -> CryptoResult<Option<T>> {
        (self.from_store)(value)
    }

    /// Store encoding this converter writes.
    pub fn encoding(&self) -> StoreEncoding {
        self.encoding
    }
}

impl<T> Clone for Converter<T> {
    fn clone(&self) -> Self {
        Self {
            encoding: self.encoding,
            to_store: Arc::clone(&self.to_store),
            from_store: Arc::clone(&self.from_store),
        }
    }
}

impl<T> std::fmt::Debug for Converter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("model", &std::any::type_name::<T>())
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}
