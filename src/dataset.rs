use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::error::{Error, Result};
use crate::rule::Rule;
use crate::store::{Rules, Store, Tuples};
use crate::term::{Constant, GroundTuple, Term};

/// An immutable snapshot of facts and rules
///
/// Facts have set semantics: equal tuples collapse on construction. Rules keep
/// their order and duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    tuples: IndexSet<GroundTuple>,
    rules: Vec<Rule>,
}

impl Dataset {
    /// Create a snapshot from facts and rules
    pub fn new(
        tuples: impl IntoIterator<Item = GroundTuple>,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        Self::from_parts(tuples.into_iter().collect(), rules.into_iter().collect())
    }

    /// A snapshot with no facts and no rules
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of distinct facts
    #[must_use]
    pub fn len_tuples(&self) -> usize {
        self.tuples.len()
    }

    /// Number of rules, duplicates included
    #[must_use]
    pub fn len_rules(&self) -> usize {
        self.rules.len()
    }

    /// True if the snapshot holds neither facts nor rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty() && self.rules.is_empty()
    }

    /// Whether `tuple` is one of the facts
    #[must_use]
    pub fn contains(&self, tuple: &GroundTuple) -> bool {
        self.tuples.contains(tuple)
    }

    pub(crate) fn tuple_set(&self) -> &IndexSet<GroundTuple> {
        &self.tuples
    }

    /// Check the conventions construction leaves unchecked:
    /// - every rule is safe
    /// - each functor is used with a single arity across facts, rule heads and
    ///   clauses (patterns led by a variable are skipped)
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::UnsafeRule`] or [`Error::ArityMismatch`] found.
    pub fn validate(&self) -> Result<()> {
        self.rules.iter().try_for_each(Rule::check_safety)?;

        let mut arities: IndexMap<&Constant, usize> = IndexMap::new();

        for tuple in &self.tuples {
            if let Some(functor) = tuple.first() {
                record_arity(&mut arities, functor, tuple.arity())?;
            }
        }

        let patterns = self
            .rules
            .iter()
            .flat_map(|rule| std::iter::once(rule.pattern()).chain(rule.clauses()));
        for pattern in patterns {
            if let Some(Term::Constant(functor)) = pattern.first() {
                record_arity(&mut arities, functor, pattern.arity())?;
            }
        }

        Ok(())
    }
}

impl Store for Dataset {
    fn tuples(&self) -> Tuples<'_> {
        self.tuples.iter()
    }

    fn rules(&self) -> Rules<'_> {
        self.rules.iter()
    }

    fn from_parts(tuples: IndexSet<GroundTuple>, rules: Vec<Rule>) -> Self {
        debug!(
            "Creating dataset with {} tuples and {} rules",
            tuples.len(),
            rules.len()
        );
        Self { tuples, rules }
    }
}

impl FromIterator<GroundTuple> for Dataset {
    fn from_iter<I: IntoIterator<Item = GroundTuple>>(iter: I) -> Self {
        Self::new(iter, Vec::new())
    }
}

fn record_arity<'a>(
    arities: &mut IndexMap<&'a Constant, usize>,
    functor: &'a Constant,
    found: usize,
) -> Result<()> {
    let expected = *arities.entry(functor).or_insert(found);
    if expected == found {
        return Ok(());
    }
    Err(Error::ArityMismatch {
        functor: functor.clone(),
        expected,
        found,
    })
}
