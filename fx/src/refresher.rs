//! Periodic refresh of the rate cache.

use std::sync::Arc;
use std::time::Duration;

use ratehub_common::CurrencyCode;
use ratehub_store::{CurrencyStore, RateLogStore};
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, instrument, warn};

use crate::cache::SharedRateCache;
use crate::error::FxResult;
use crate::provider::RateProvider;

/// What a single refresh tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No currencies are tracked; the tick was skipped entirely.
    Skipped,
    /// The cache was replaced with a snapshot of this many rates.
    Refreshed { rates: usize },
}

/// Drives one refresh attempt per interval until shutdown.
///
/// The refresher is the only writer of the cache: ticks run inline in the
/// loop body, one at a time, so two replacements can never race. A failed
/// tick leaves the cache and the log untouched; the next tick is the only
/// retry.
pub struct RateRefresher {
    currencies: Arc<dyn CurrencyStore>,
    rate_log: Arc<dyn RateLogStore>,
    provider: Arc<dyn RateProvider>,
    cache: SharedRateCache,
    base_currency: CurrencyCode,
    refresh_interval: Duration,
}

impl RateRefresher {
    /// Create a refresher over the given collaborators.
    pub fn new(
        currencies: Arc<dyn CurrencyStore>,
        rate_log: Arc<dyn RateLogStore>,
        provider: Arc<dyn RateProvider>,
        cache: SharedRateCache,
        base_currency: CurrencyCode,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            currencies,
            rate_log,
            provider,
            cache,
            base_currency,
            refresh_interval,
        }
    }

    /// Run the refresh loop until `shutdown` flips to `true`.
    ///
    /// The first tick fires immediately; a tick that overruns the interval
    /// delays the next one instead of overlapping it. An in-flight tick
    /// finishes before the loop exits.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh_once().await {
                        error!(
                            error = %e,
                            provider = self.provider.name(),
                            "Failed to fetch exchange rates"
                        );
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Rate refresher stopping");
                        break;
                    }
                }
            }
        }
    }

    /// Execute one refresh tick.
    ///
    /// On success the cache is replaced first and the log appended second;
    /// a log-append failure is reported but does not undo the replacement.
    #[instrument(skip(self), fields(base = %self.base_currency))]
    pub async fn refresh_once(&self) -> FxResult<RefreshOutcome> {
        let currencies = self.currencies.list_all().await?;
        if currencies.is_empty() {
            warn!("No currencies are tracked; skipping refresh");
            return Ok(RefreshOutcome::Skipped);
        }

        let symbols = currencies
            .iter()
            .map(|c| c.code.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .provider
            .latest_rates(self.base_currency.as_str(), &symbols)
            .await?;

        let count = response.rates.len();
        self.cache.replace_all(response.rates.clone());

        if let Err(e) = self
            .rate_log
            .append(self.base_currency.clone(), response.rates)
            .await
        {
            error!(error = %e, "Failed to append refresh to the rate log");
        }

        info!(
            base = %self.base_currency,
            symbols,
            rates = count,
            "Exchange rates updated"
        );

        Ok(RefreshOutcome::Refreshed { rates: count })
    }
}
