//! RateHub Store
//!
//! Durable collaborators of the refresh cycle: the canonical list of
//! tracked currencies and the append-only log of successful refreshes.
//! Both are exposed as traits so the core never depends on a concrete
//! backend.

pub mod currencies;
pub mod error;
pub mod rate_log;

pub use currencies::{CurrencyStore, InMemoryCurrencyStore};
pub use error::{StoreError, StoreResult};
pub use rate_log::{InMemoryRateLogStore, RateLogEntry, RateLogStore};
