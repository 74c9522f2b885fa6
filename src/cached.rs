use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use log::trace;

use crate::dataset::Dataset;
use crate::rule::Rule;
use crate::store::{CacheScan, CacheStore, Rules, Store, Tuples};
use crate::term::GroundTuple;

/// A [`Dataset`] plus a per-instance memo of the tuples each rule application
/// has already produced.
///
/// The memo is only valid for the exact fact set it was built against, so it
/// is left out of equality and every merged snapshot starts with an empty one.
/// `K` identifies a rule application; by default the rule itself.
#[derive(Debug)]
pub struct CachedDataset<K = Rule> {
    dataset: Dataset,
    cache: IndexMap<K, IndexSet<GroundTuple>>,
}

impl<K: Hash + Eq> CachedDataset<K> {
    /// Wrap a snapshot with an empty memo
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            cache: IndexMap::new(),
        }
    }

    /// The underlying snapshot
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Keys that have at least one recorded tuple
    pub fn cached_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.cache.keys()
    }

    /// Forget everything recorded so far
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl<K: Hash + Eq> Default for CachedDataset<K> {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}

impl<K: Hash + Eq> From<Dataset> for CachedDataset<K> {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}

impl<K: Hash + Eq> Store for CachedDataset<K> {
    fn tuples(&self) -> Tuples<'_> {
        self.dataset.tuples()
    }

    fn rules(&self) -> Rules<'_> {
        self.dataset.rules()
    }

    fn from_parts(tuples: IndexSet<GroundTuple>, rules: Vec<Rule>) -> Self {
        Self::new(Dataset::from_parts(tuples, rules))
    }
}

impl<K: Hash + Eq> CacheStore for CachedDataset<K> {
    type Key = K;

    fn scan_cache(&self, key: &K) -> Option<CacheScan<'_>> {
        let scan = self.cache.get(key).map(IndexSet::iter);
        trace!("Cache {}", if scan.is_some() { "hit" } else { "miss" });
        scan
    }

    fn cache_tuple(&mut self, key: K, tuple: GroundTuple) -> bool {
        let inserted = self.cache.entry(key).or_default().insert(tuple);
        if inserted {
            trace!("Cached new tuple ({} keys cached)", self.cache.len());
        }
        inserted
    }
}
