//! Append-only log of successful rate refreshes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use ratehub_common::{CurrencyCode, RateMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreResult;

/// One successful refresh: the base currency and the full rates snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLogEntry {
    /// Unique entry ID.
    pub id: Uuid,
    /// Base currency the rates are expressed against.
    pub base_currency: CurrencyCode,
    /// Full snapshot installed by the refresh.
    pub rates: RateMap,
    /// When the refresh completed.
    pub recorded_at: DateTime<Utc>,
}

impl RateLogEntry {
    /// Create an entry stamped with a fresh ID and the current time.
    pub fn new(base_currency: CurrencyCode, rates: RateMap) -> Self {
        Self {
            id: Uuid::new_v4(),
            base_currency,
            rates,
            recorded_at: Utc::now(),
        }
    }
}

/// Durable refresh history. Entries are never updated or deleted.
#[async_trait]
pub trait RateLogStore: Send + Sync {
    /// Append one refresh.
    async fn append(&self, base_currency: CurrencyCode, rates: RateMap)
        -> StoreResult<RateLogEntry>;

    /// All entries, oldest first.
    async fn entries(&self) -> StoreResult<Vec<RateLogEntry>>;
}

/// In-process log store.
#[derive(Default)]
pub struct InMemoryRateLogStore {
    entries: RwLock<Vec<RateLogEntry>>,
}

impl InMemoryRateLogStore {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLogStore for InMemoryRateLogStore {
    async fn append(
        &self,
        base_currency: CurrencyCode,
        rates: RateMap,
    ) -> StoreResult<RateLogEntry> {
        let entry = RateLogEntry::new(base_currency, rates);
        self.entries.write().push(entry.clone());
        Ok(entry)
    }

    async fn entries(&self) -> StoreResult<Vec<RateLogEntry>> {
        Ok(self.entries.read().clone())
    }
}
