//! Query/command facade over the stores and the rate cache.

use std::sync::Arc;

use ratehub_common::{Currency, CurrencyCode};
use ratehub_fx::SharedRateCache;
use ratehub_store::{CurrencyStore, StoreResult};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Translates API requests into store and cache calls.
pub struct ExchangeService {
    currencies: Arc<dyn CurrencyStore>,
    cache: SharedRateCache,
}

impl ExchangeService {
    /// Create the facade over the given collaborators.
    pub fn new(currencies: Arc<dyn CurrencyStore>, cache: SharedRateCache) -> Self {
        Self { currencies, cache }
    }

    /// All tracked currencies.
    pub async fn list_currencies(&self) -> StoreResult<Vec<Currency>> {
        let currencies = self.currencies.list_all().await?;
        info!(count = currencies.len(), "Listed tracked currencies");
        Ok(currencies)
    }

    /// Track a new currency for the refresh cycle.
    pub async fn add_currency(&self, currency: Currency) -> StoreResult<Currency> {
        let added = self.currencies.add(currency).await?;
        info!(code = %added.code, "Tracking new currency");
        Ok(added)
    }

    /// Last-known rate for `code`, if any refresh has produced one.
    pub fn get_exchange_rate(&self, code: &CurrencyCode) -> Option<Decimal> {
        let rate = self.cache.get(code);
        if rate.is_none() {
            warn!(code = %code, "No cached rate for currency");
        }
        rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratehub_common::RateMap;
    use ratehub_fx::RateCache;
    use ratehub_store::{InMemoryCurrencyStore, StoreError};
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn service() -> (ExchangeService, SharedRateCache) {
        let cache: SharedRateCache = Arc::new(RateCache::new());
        let service = ExchangeService::new(Arc::new(InMemoryCurrencyStore::new()), cache.clone());
        (service, cache)
    }

    #[tokio::test]
    async fn add_then_list_returns_the_currency() {
        let (service, _cache) = service();
        service
            .add_currency(Currency::new(code("EUR"), "Euro"))
            .await
            .unwrap();

        let all = service.list_currencies().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].code, code("EUR"));
        assert_eq!(all[0].name, "Euro");
    }

    #[tokio::test]
    async fn duplicate_add_is_rejected() {
        let (service, _cache) = service();
        service
            .add_currency(Currency::new(code("EUR"), "Euro"))
            .await
            .unwrap();

        let result = service.add_currency(Currency::new(code("EUR"), "Euro")).await;
        assert!(matches!(result, Err(StoreError::DuplicateCurrency(_))));
    }

    #[tokio::test]
    async fn rate_lookup_reads_the_cache() {
        let (service, cache) = service();
        let rates: RateMap = [(code("EUR"), dec!(0.85))].into_iter().collect();
        cache.replace_all(rates);

        assert_eq!(service.get_exchange_rate(&code("EUR")), Some(dec!(0.85)));
        assert_eq!(service.get_exchange_rate(&code("JPY")), None);
    }
}
