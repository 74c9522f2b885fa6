//! Capability traits shared by the dataset layers.
//!
//! Every layer is a [`Store`]; [`CacheStore`] and [`IndexStore`] are opt-in
//! capabilities added by [`crate::CachedDataset`] and [`crate::IndexedDataset`].

use indexmap::IndexSet;
use log::debug;

use crate::error::Result;
use crate::indexed::IndexScan;
use crate::rule::Rule;
use crate::term::{GroundTuple, PatternTuple};

/// Iterator over the facts of a snapshot
pub type Tuples<'a> = indexmap::set::Iter<'a, GroundTuple>;

/// Iterator over the rules of a snapshot
pub type Rules<'a> = std::slice::Iter<'a, Rule>;

/// Iterator over the tuples memoized for one cache key
pub type CacheScan<'a> = indexmap::set::Iter<'a, GroundTuple>;

/// An immutable snapshot of facts and rules.
///
/// `tuples` and `rules` may be called any number of times; each call starts a
/// fresh, complete traversal.
pub trait Store {
    /// All facts, each exactly once
    fn tuples(&self) -> Tuples<'_>;

    /// All rules, in insertion order, duplicates kept
    fn rules(&self) -> Rules<'_>;

    /// Build a fresh snapshot of this layer from already deduplicated facts and a rule list.
    ///
    /// Any per-instance state a layer carries (memo, index) starts from scratch.
    fn from_parts(tuples: IndexSet<GroundTuple>, rules: Vec<Rule>) -> Self
    where
        Self: Sized;

    /// Union of both fact sets and concatenation of both rule lists, as a new snapshot.
    ///
    /// Neither operand is modified. Rules are not deduplicated.
    fn merge<S: Store + ?Sized>(&self, other: &S) -> Self
    where
        Self: Sized,
    {
        let mut tuples: IndexSet<GroundTuple> = self.tuples().cloned().collect();
        tuples.extend(other.tuples().cloned());

        let rules: Vec<Rule> = self.rules().chain(other.rules()).cloned().collect();

        debug!(
            "Merged snapshots into {} tuples and {} rules",
            tuples.len(),
            rules.len()
        );
        Self::from_parts(tuples, rules)
    }
}

/// A store that memoizes, per key, the tuples an evaluator has already emitted.
///
/// The memo belongs to one instance. It is not part of the snapshot's value and
/// is never carried over by [`Store::merge`].
pub trait CacheStore: Store {
    /// Key identifying one rule application
    type Key;

    /// Tuples recorded for `key`, or `None` if nothing was ever recorded for it
    fn scan_cache(&self, key: &Self::Key) -> Option<CacheScan<'_>>;

    /// Record `tuple` under `key` unless it is already there.
    ///
    /// Returns `true` if the tuple was newly recorded.
    fn cache_tuple(&mut self, key: Self::Key, tuple: GroundTuple) -> bool;
}

/// A store that can list the facts sharing a pattern's functor and arity.
pub trait IndexStore: Store {
    /// Every fact whose leading value and arity match `pattern`'s.
    ///
    /// An unknown functor/arity yields an empty scan.
    ///
    /// # Errors
    ///
    /// Fails if `pattern` is empty or led by a variable.
    fn scan_index(&self, pattern: &PatternTuple) -> Result<IndexScan<'_>>;
}
