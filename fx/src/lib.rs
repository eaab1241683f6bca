//! RateHub FX Engine
//!
//! The core of the rate service: an in-memory rate cache with atomic
//! whole-snapshot replacement, the rate-provider boundary, and the
//! periodic refresh task that ties them to the currency and log stores.
//!
//! # Example
//!
//! ```rust,ignore
//! use ratehub_fx::{RateCache, RateRefresher};
//!
//! let cache = Arc::new(RateCache::new());
//! let refresher = RateRefresher::new(
//!     currencies, rate_log, provider, cache.clone(), base, interval,
//! );
//! tokio::spawn(async move { refresher.run(shutdown_rx).await });
//!
//! // Lookups never block on refreshes.
//! let rate = cache.get(&code);
//! ```

pub mod cache;
pub mod error;
pub mod provider;
pub mod refresher;

pub use cache::{RateCache, SharedRateCache};
pub use error::{FxError, FxResult};
pub use provider::{HttpRateProvider, ProviderRates, RateProvider};
pub use refresher::{RateRefresher, RefreshOutcome};
