use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};

use crate::cached::CachedDataset;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::rule::Rule;
use crate::store::{CacheScan, CacheStore, IndexStore, Rules, Store, Tuples};
use crate::term::{Constant, GroundTuple, PatternTuple, Term};

/// The functor/arity pair facts are grouped by (e.g., `parent/3`)
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexKey {
    functor: Constant,
    arity: usize,
}

impl IndexKey {
    /// Create a key directly
    #[must_use]
    pub fn new(functor: Constant, arity: usize) -> Self {
        Self { functor, arity }
    }

    /// The key a pattern probes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPattern`] for a zero-arity pattern and
    /// [`Error::UnboundFunctor`] when the leading term is a variable.
    pub fn from_pattern(pattern: &PatternTuple) -> Result<Self> {
        match pattern.first() {
            None => Err(Error::EmptyPattern),
            Some(Term::Variable(var)) => Err(Error::UnboundFunctor(var.clone())),
            Some(Term::Constant(functor)) => Ok(Self::new(functor.clone(), pattern.arity())),
        }
    }

    /// The key a fact is filed under; `None` for the empty tuple
    #[must_use]
    pub fn of_ground(tuple: &GroundTuple) -> Option<Self> {
        tuple
            .first()
            .map(|functor| Self::new(functor.clone(), tuple.arity()))
    }

    /// The leading value
    #[must_use]
    pub fn functor(&self) -> &Constant {
        &self.functor
    }

    /// The tuple length, functor included
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.functor, self.arity)
    }
}

/// Iterator over the facts filed under one [`IndexKey`]
#[derive(Debug, Clone)]
pub struct IndexScan<'a> {
    tuples: &'a IndexSet<GroundTuple>,
    positions: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for IndexScan<'a> {
    type Item = &'a GroundTuple;

    fn next(&mut self) -> Option<Self::Item> {
        let tuples = self.tuples;
        self.positions.next().and_then(|&pos| tuples.get_index(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl ExactSizeIterator for IndexScan<'_> {}

/// A [`CachedDataset`] plus a functor/arity index over its facts.
///
/// The index is built once, eagerly, when the snapshot is created. It is never
/// updated afterwards; merging yields a new snapshot with a freshly built index.
#[derive(Debug)]
pub struct IndexedDataset<K = Rule> {
    cached: CachedDataset<K>,
    /// Positions into the snapshot's fact set, in fact insertion order
    index: IndexMap<IndexKey, Vec<usize>>,
}

impl<K: Hash + Eq> IndexedDataset<K> {
    /// Index a snapshot
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let mut index: IndexMap<IndexKey, Vec<usize>> = IndexMap::new();
        for (pos, tuple) in dataset.tuple_set().iter().enumerate() {
            match IndexKey::of_ground(tuple) {
                Some(key) => index.entry(key).or_default().push(pos),
                None => warn!("Skipping empty tuple at position {pos}: it has no functor to index"),
            }
        }
        debug!(
            "Indexed {} tuples under {} keys",
            dataset.len_tuples(),
            index.len()
        );

        Self {
            cached: CachedDataset::new(dataset),
            index,
        }
    }

    /// The underlying snapshot
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        self.cached.dataset()
    }

    /// The memo layer
    #[must_use]
    pub fn cached(&self) -> &CachedDataset<K> {
        &self.cached
    }

    /// Mutable access to the memo layer, e.g. to clear it between passes
    pub fn cached_mut(&mut self) -> &mut CachedDataset<K> {
        &mut self.cached
    }

    /// Every key at least one fact is filed under
    pub fn index_keys(&self) -> impl Iterator<Item = &IndexKey> + '_ {
        self.index.keys()
    }

    /// Facts filed under `key`; empty if the key is unknown
    #[must_use]
    pub fn scan_key(&self, key: &IndexKey) -> IndexScan<'_> {
        let positions = self.index.get(key).map_or(&[][..], Vec::as_slice);
        IndexScan {
            tuples: self.dataset().tuple_set(),
            positions: positions.iter(),
        }
    }
}

impl<K: Hash + Eq> Default for IndexedDataset<K> {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}

impl<K: Hash + Eq> From<Dataset> for IndexedDataset<K> {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}

impl<K: Hash + Eq> Store for IndexedDataset<K> {
    fn tuples(&self) -> Tuples<'_> {
        self.cached.tuples()
    }

    fn rules(&self) -> Rules<'_> {
        self.cached.rules()
    }

    fn from_parts(tuples: IndexSet<GroundTuple>, rules: Vec<Rule>) -> Self {
        Self::new(Dataset::from_parts(tuples, rules))
    }
}

impl<K: Hash + Eq> CacheStore for IndexedDataset<K> {
    type Key = K;

    fn scan_cache(&self, key: &K) -> Option<CacheScan<'_>> {
        self.cached.scan_cache(key)
    }

    fn cache_tuple(&mut self, key: K, tuple: GroundTuple) -> bool {
        self.cached.cache_tuple(key, tuple)
    }
}

impl<K: Hash + Eq> IndexStore for IndexedDataset<K> {
    fn scan_index(&self, pattern: &PatternTuple) -> Result<IndexScan<'_>> {
        let key = IndexKey::from_pattern(pattern)?;
        Ok(self.scan_key(&key))
    }
}
