//! Store error types.

use ratehub_common::CurrencyCode;
use thiserror::Error;

/// Errors that can occur in the currency and rate-log stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A currency with the same code is already tracked.
    #[error("Currency already exists: {0}")]
    DuplicateCurrency(CurrencyCode),

    /// The backing store rejected the write.
    #[error("Store write failed: {0}")]
    WriteFailed(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
