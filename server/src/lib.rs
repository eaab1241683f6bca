//! RateHub Server
//!
//! Thin HTTP facade over the rate cache and the currency store, plus the
//! process configuration and wiring that starts the refresh task.

pub mod config;
pub mod http;
pub mod service;

pub use config::{ProviderConfig, ServerConfig};
pub use service::ExchangeService;
