//! Concurrent resolution cache.
//!
//! One map per widening flag, keyed by the unresolved composite signature.
//! The signature carries its target type, so the key identifies both the
//! declared shape and the type it is resolved against.
//!
//! Entries are written only after a whole top-level resolution succeeds
//! (see `Session::commit`). Racing writers on one key store equal values,
//! since resolution is deterministic for a fixed catalog.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use sinbad_sig::CompositeSig;

use super::Resolution;

type ResolutionMap = DashMap<CompositeSig, Arc<Resolution>, FxBuildHasher>;

/// Resolved constructors by `(signature, allow_widening)`.
#[derive(Debug)]
pub struct ResolutionCache {
    exact: ResolutionMap,
    widening: ResolutionMap,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Snapshot of cache counters.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl ResolutionCache {
    pub fn new() -> Self {
        ResolutionCache {
            exact: DashMap::with_hasher(FxBuildHasher),
            widening: DashMap::with_hasher(FxBuildHasher),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[inline]
    fn map(&self, widening: bool) -> &ResolutionMap {
        if widening {
            &self.widening
        } else {
            &self.exact
        }
    }

    /// Look up a resolution, counting the hit or miss.
    pub fn get(&self, signature: &CompositeSig, widening: bool) -> Option<Arc<Resolution>> {
        let found = self
            .map(widening)
            .get(signature)
            .map(|entry| Arc::clone(entry.value()));
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Look up a resolution without touching the counters.
    pub fn peek(&self, signature: &CompositeSig, widening: bool) -> Option<Arc<Resolution>> {
        self.map(widening)
            .get(signature)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub(crate) fn insert(
        &self,
        signature: CompositeSig,
        widening: bool,
        resolution: Arc<Resolution>,
    ) {
        debug_assert_eq!(signature.arity(), resolution.params.len());
        self.map(widening).insert(signature, resolution);
    }

    pub fn contains(&self, signature: &CompositeSig, widening: bool) -> bool {
        self.map(widening).contains_key(signature)
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.widening.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.widening.is_empty()
    }

    /// Drop all entries. Counters are kept.
    pub fn clear(&self) {
        self.exact.clear();
        self.widening.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}
