//! RateHub Common Types
//!
//! Shared types used across the RateHub service: currency identifiers,
//! tracked-currency records, and the rate mapping exchanged between the
//! provider client, the rate cache, and the refresh log.

pub mod currency;

pub use currency::*;
