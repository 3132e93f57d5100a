//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while building providers or transforming field values.
///
/// An absent or empty input is never an error: operations report it as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key is not 16, 24 or 32 bytes long.
    #[error("invalid key length: expected 16, 24 or 32 bytes, got {actual}")]
    InvalidKeyLength { actual: usize },

    /// Initialization vector does not match the cipher block size.
    #[error("invalid IV length: expected {expected}, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    /// A required construction parameter is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Decryption failed (bad block alignment, bad padding, wrong key).
    #[error("cipher error: {0}")]
    Cipher(String),

    /// Stored representation could not be decoded.
    #[error("format error: {0}")]
    Format(String),

    /// Payload serializer failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// No codec is registered for the named model type.
    #[error("model type not supported: {0}")]
    NotSupported(String),
}

/// Coarse classification of [`CryptoError`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid construction input. Raised before any value is processed.
    Configuration,
    /// Ciphertext could not be decrypted.
    Cipher,
    /// Store encoding or payload bytes are malformed.
    Format,
    /// Model type has no codec.
    NotSupported,
}

impl CryptoError {
    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::InvalidKeyLength { .. }
            | CryptoError::InvalidIvLength { .. }
            | CryptoError::Configuration(_) => ErrorKind::Configuration,
            CryptoError::Cipher(_) => ErrorKind::Cipher,
            CryptoError::Format(_) | CryptoError::Serialization(_) => ErrorKind::Format,
            CryptoError::NotSupported(_) => ErrorKind::NotSupported,
        }
    }

    /// Builds a [`CryptoError::NotSupported`] naming `T`.
    pub fn not_supported<T: ?Sized>() -> Self {
        CryptoError::NotSupported(std::any::type_name::<T>().to_string())
    }
}

impl From<base64::DecodeError> for CryptoError {
    fn from(err: base64::DecodeError) -> Self {
        CryptoError::Format(format!("invalid base64: {err}"))
    }
}
