//! Resolution cache.
//!
//! Memoizes the outcome of a hierarchy search per requested descriptor pair,
//! including negative outcomes. Cleared wholesale on every registry mutation:
//! a new registration can change the winning candidate for pairs unrelated
//! to its own classes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use morph_types::TypeDescriptor;
use rustc_hash::FxBuildHasher;

use crate::converter::GenericConverter;

/// Outcome of resolving a descriptor pair.
#[derive(Clone)]
pub(crate) enum Resolved {
    Converter(Arc<dyn GenericConverter>),
    /// No converter, but the source is assignable: pass the value through.
    NoOp,
    /// Nothing applies.
    NoMatch,
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source: TypeDescriptor,
    target: TypeDescriptor,
}

/// Counters describing cache effectiveness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub(crate) struct ResolutionCache {
    entries: DashMap<CacheKey, Resolved, FxBuildHasher>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    pub(crate) fn new() -> Self {
        ResolutionCache {
            entries: DashMap::with_capacity_and_hasher(64, FxBuildHasher),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub(crate) fn get(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> Option<Resolved> {
        let key = CacheKey {
            source: source.clone(),
            target: target.clone(),
        };
        let found = self.entries.get(&key).map(|entry| entry.value().clone());
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub(crate) fn insert(&self, source: &TypeDescriptor, target: &TypeDescriptor, resolved: Resolved) {
        let key = CacheKey {
            source: source.clone(),
            target: target.clone(),
        };
        self.entries.insert(key, resolved);
    }

    /// Drop every entry. Returns how many were dropped.
    pub(crate) fn clear(&self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_types::classes::{integer, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_negative_entries_are_cached() {
        let cache = ResolutionCache::new();
        let s = TypeDescriptor::value_of(&string());
        let i = TypeDescriptor::value_of(&integer());

        assert!(cache.get(&s, &i).is_none());
        cache.insert(&s, &i, Resolved::NoMatch);
        assert!(matches!(cache.get(&s, &i), Some(Resolved::NoMatch)));
        assert!(cache.get(&i, &s).is_none());

        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 2,
                entries: 1
            }
        );
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = ResolutionCache::new();
        let s = TypeDescriptor::value_of(&string());
        let i = TypeDescriptor::value_of(&integer());
        cache.insert(&s, &i, Resolved::NoOp);
        cache.insert(&i, &s, Resolved::NoMatch);
        assert_eq!(cache.clear(), 2);
        assert!(cache.get(&s, &i).is_none());
        assert_eq!(cache.stats().entries, 0);
    }
}
