//! FX engine error types.

use ratehub_store::StoreError;
use thiserror::Error;

/// Errors that can occur during a refresh tick.
#[derive(Debug, Error)]
pub enum FxError {
    /// Provider answered with a non-success HTTP status.
    #[error("Provider returned status {0}")]
    ProviderStatus(u16),

    /// Provider response decoded, but the rates payload was null or absent.
    #[error("Provider response contained no rates")]
    MissingRates,

    /// Provider response body could not be decoded.
    #[error("Provider response could not be decoded: {0}")]
    Decode(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("Provider request failed: {0}")]
    Transport(String),

    /// Loading the tracked currencies failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<reqwest::Error> for FxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FxError::Decode(err.to_string())
        } else {
            FxError::Transport(err.to_string())
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
