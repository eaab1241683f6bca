//! In-memory rate cache with atomic snapshot replacement.

use std::sync::Arc;

use parking_lot::RwLock;
use ratehub_common::{CurrencyCode, RateMap};
use rust_decimal::Decimal;
use tracing::debug;

/// Process-wide cache of the latest known rate per tracked currency,
/// relative to one fixed base currency.
///
/// The mapping is only ever replaced wholesale. A reader concurrent with a
/// replacement observes either the previous snapshot or the new one, never
/// a mix of two refresh cycles; once [`RateCache::replace_all`] returns,
/// every later [`RateCache::get`] sees the new snapshot.
pub struct RateCache {
    snapshot: RwLock<Arc<RateMap>>,
}

impl RateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(RateMap::new())),
        }
    }

    /// Last-known rate for `code`, or `None` if no snapshot has contained
    /// it. Absence is a normal outcome, not a fault.
    pub fn get(&self, code: &CurrencyCode) -> Option<Decimal> {
        self.snapshot.read().get(code).copied()
    }

    /// Atomically discard the previous mapping and install `rates`.
    pub fn replace_all(&self, rates: RateMap) {
        let next = Arc::new(rates);
        *self.snapshot.write() = next;
        debug!(entries = self.len(), "Installed new rate snapshot");
    }

    /// Shared read-only handle to the current snapshot. The map behind it
    /// is immutable; later refreshes swap in a new allocation instead of
    /// touching it.
    pub fn snapshot(&self) -> Arc<RateMap> {
        Arc::clone(&self.snapshot.read())
    }

    /// Number of rates in the current snapshot.
    pub fn len(&self) -> usize {
        self.snapshot.read().len()
    }

    /// Whether the current snapshot holds no rates.
    pub fn is_empty(&self) -> bool {
        self.snapshot.read().is_empty()
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared rate cache.
pub type SharedRateCache = Arc<RateCache>;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn rates(pairs: &[(&str, Decimal)]) -> RateMap {
        pairs.iter().map(|(c, r)| (code(c), *r)).collect()
    }

    #[test]
    fn get_on_empty_cache_is_absent() {
        let cache = RateCache::new();
        assert_eq!(cache.get(&code("EUR")), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn replace_all_makes_rates_visible() {
        let cache = RateCache::new();
        cache.replace_all(rates(&[("EUR", dec!(0.85)), ("GBP", dec!(0.75))]));

        assert_eq!(cache.get(&code("EUR")), Some(dec!(0.85)));
        assert_eq!(cache.get(&code("GBP")), Some(dec!(0.75)));
        assert_eq!(cache.get(&code("JPY")), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn replace_all_replaces_instead_of_merging() {
        let cache = RateCache::new();
        cache.replace_all(rates(&[("EUR", dec!(0.85))]));
        cache.replace_all(rates(&[("GBP", dec!(0.75))]));

        assert_eq!(cache.get(&code("EUR")), None);
        assert_eq!(cache.get(&code("GBP")), Some(dec!(0.75)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_replacements() {
        let cache = RateCache::new();
        cache.replace_all(rates(&[("EUR", dec!(0.85))]));

        let old = cache.snapshot();
        cache.replace_all(rates(&[("GBP", dec!(0.75))]));

        assert_eq!(old.get(&code("EUR")), Some(&dec!(0.85)));
        assert_eq!(old.get(&code("GBP")), None);
        assert_eq!(cache.get(&code("GBP")), Some(dec!(0.75)));
    }

    #[test]
    fn concurrent_readers_never_observe_a_mixed_snapshot() {
        let cache = Arc::new(RateCache::new());
        let a = rates(&[("EUR", dec!(1)), ("GBP", dec!(2))]);
        let b = rates(&[("EUR", dec!(3)), ("GBP", dec!(4))]);
        cache.replace_all(a.clone());

        let writer = {
            let cache = cache.clone();
            let (a, b) = (a.clone(), b.clone());
            std::thread::spawn(move || {
                for i in 0..1000 {
                    cache.replace_all(if i % 2 == 0 { b.clone() } else { a.clone() });
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                let (a, b) = (a.clone(), b.clone());
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let seen = cache.snapshot();
                        assert!(*seen == a || *seen == b, "mixed snapshot observed");
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }

    fn arbitrary_rate_map() -> impl Strategy<Value = RateMap> {
        proptest::collection::hash_map("[A-Z]{3}", 1u32..1_000_000, 0..6).prop_map(|m| {
            m.into_iter()
                .map(|(c, millis)| (code(&c), Decimal::new(i64::from(millis), 3)))
                .collect()
        })
    }

    proptest! {
        // A get issued after the last replace_all returns must reflect that
        // call's map exactly: present keys with its values, all else absent.
        #[test]
        fn last_replacement_wins(maps in proptest::collection::vec(arbitrary_rate_map(), 1..8)) {
            let cache = RateCache::new();
            for map in &maps {
                cache.replace_all(map.clone());
            }

            let last = maps.last().unwrap();
            let snapshot = cache.snapshot();
            prop_assert_eq!(snapshot.as_ref(), last);
            for (c, rate) in last {
                prop_assert_eq!(cache.get(c), Some(*rate));
            }
            prop_assert_eq!(cache.get(&code("ZZZ")).is_some(), last.contains_key(&code("ZZZ")));
        }
    }
}
