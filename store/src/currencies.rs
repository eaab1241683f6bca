//! Tracked-currency storage.

use async_trait::async_trait;
use parking_lot::RwLock;
use ratehub_common::Currency;

use crate::error::{StoreError, StoreResult};

/// Durable list of the currencies the refresh cycle quotes.
#[async_trait]
pub trait CurrencyStore: Send + Sync {
    /// Add a currency. Fails if the code is already tracked.
    async fn add(&self, currency: Currency) -> StoreResult<Currency>;

    /// List all tracked currencies in insertion order.
    async fn list_all(&self) -> StoreResult<Vec<Currency>>;
}

/// In-process currency store, insertion-ordered.
#[derive(Default)]
pub struct InMemoryCurrencyStore {
    currencies: RwLock<Vec<Currency>>,
}

impl InMemoryCurrencyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CurrencyStore for InMemoryCurrencyStore {
    async fn add(&self, currency: Currency) -> StoreResult<Currency> {
        let mut currencies = self.currencies.write();
        if currencies.iter().any(|c| c.code == currency.code) {
            return Err(StoreError::DuplicateCurrency(currency.code.clone()));
        }
        currencies.push(currency.clone());
        Ok(currency)
    }

    async fn list_all(&self) -> StoreResult<Vec<Currency>> {
        Ok(self.currencies.read().clone())
    }
}
