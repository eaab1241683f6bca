//! Rate-provider boundary and HTTP implementation.

use async_trait::async_trait;
use ratehub_common::RateMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FxError, FxResult};

/// A successful provider response.
#[derive(Debug, Clone)]
pub struct ProviderRates {
    /// Base currency the provider quoted against.
    pub base: String,
    /// Quote date as reported by the provider.
    pub date: Option<String>,
    /// Rates per currency code.
    pub rates: RateMap,
}

/// Source of exchange rates for the refresh cycle.
///
/// Implementations return tagged errors rather than panicking; the
/// refresher treats any error as "skip this tick".
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Provider name, used for log attribution.
    fn name(&self) -> &str;

    /// Fetch the latest rates for `symbols` (comma-joined currency codes)
    /// against `base`.
    async fn latest_rates(&self, base: &str, symbols: &str) -> FxResult<ProviderRates>;
}

/// Wire format of the provider's latest-rates endpoint. `rates` is null
/// when the provider rejects the request inside a 200 response.
#[derive(Debug, Deserialize)]
struct LatestRatesBody {
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    rates: Option<RateMap>,
}

/// HTTP client for the exchange-rate API.
pub struct HttpRateProvider {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpRateProvider {
    /// Create a provider client for the given endpoint and credentials.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn request_url(&self, base: &str, symbols: &str) -> String {
        format!(
            "{}?access_key={}&base={}&symbols={}",
            self.api_url, self.api_key, base, symbols
        )
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn latest_rates(&self, base: &str, symbols: &str) -> FxResult<ProviderRates> {
        let url = self.request_url(base, symbols);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FxError::ProviderStatus(status.as_u16()));
        }

        let body: LatestRatesBody = response.json().await?;
        let rates = body.rates.ok_or(FxError::MissingRates)?;

        debug!(base, entries = rates.len(), "Decoded provider response");

        Ok(ProviderRates {
            base: body.base.unwrap_or_else(|| base.to_string()),
            date: body.date,
            rates,
        })
    }
}

/// Scripted rate provider for tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateProvider {
    responses: parking_lot::Mutex<std::collections::VecDeque<FxResult<ProviderRates>>>,
    last_request: parking_lot::Mutex<Option<(String, String)>>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateProvider {
    /// Create a provider with no scripted responses.
    pub fn new() -> Self {
        Self {
            responses: parking_lot::Mutex::new(std::collections::VecDeque::new()),
            last_request: parking_lot::Mutex::new(None),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Script a successful response.
    pub fn push_rates(&self, base: &str, rates: RateMap) {
        self.responses.lock().push_back(Ok(ProviderRates {
            base: base.to_string(),
            date: None,
            rates,
        }));
    }

    /// Script a failure.
    pub fn push_error(&self, error: FxError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Number of fetches issued against this provider.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// The `(base, symbols)` pair of the most recent fetch.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request.lock().clone()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MockRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn latest_rates(&self, base: &str, symbols: &str) -> FxResult<ProviderRates> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_request.lock() = Some((base.to_string(), symbols.to_string()));
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FxError::Transport("no scripted response".to_string())))
    }
}
