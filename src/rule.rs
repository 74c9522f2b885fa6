use std::fmt;

use indexmap::IndexSet;

use crate::error::{Error, Result};
use crate::term::{PatternTuple, Variable};

/// A Datalog rule (e.g., `(grandparent, ?x, ?z) :- (parent, ?x, ?y), (parent, ?y, ?z).`)
///
/// A rule is immutable once built. Two rules with the same head and body compare
/// equal, which makes a rule usable directly as a cache key.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pattern: PatternTuple,
    clauses: Box<[PatternTuple]>,
}

impl Rule {
    /// Create a rule from its head pattern and body clauses.
    ///
    /// No arity or safety checks are made here; see [`Rule::check_safety`].
    pub fn new(pattern: PatternTuple, clauses: impl IntoIterator<Item = PatternTuple>) -> Self {
        Self {
            pattern,
            clauses: clauses.into_iter().collect(),
        }
    }

    /// The head pattern
    #[must_use]
    pub fn pattern(&self) -> &PatternTuple {
        &self.pattern
    }

    /// The body clauses, in order
    #[must_use]
    pub fn clauses(&self) -> &[PatternTuple] {
        &self.clauses
    }

    /// Variables occurring in the head pattern
    #[must_use]
    pub fn used_vars(&self) -> IndexSet<&Variable> {
        self.pattern.variables().collect()
    }

    /// Variables occurring anywhere in the body
    #[must_use]
    pub fn bound_vars(&self) -> IndexSet<&Variable> {
        self.clauses
            .iter()
            .flat_map(PatternTuple::variables)
            .collect()
    }

    /// Head variables that no body clause binds
    #[must_use]
    pub fn free_vars(&self) -> IndexSet<&Variable> {
        let bound = self.bound_vars();
        self.used_vars()
            .into_iter()
            .filter(|var| !bound.contains(var))
            .collect()
    }

    /// A rule is safe when every head variable is bound by the body
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.free_vars().is_empty()
    }

    /// Like [`Rule::is_safe`], but reports the free variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsafeRule`] if any head variable is free.
    pub fn check_safety(&self) -> Result<()> {
        let free = self.free_vars();
        if free.is_empty() {
            return Ok(());
        }
        Err(Error::UnsafeRule {
            rule: self.to_string(),
            free: free.into_iter().cloned().collect(),
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        for (idx, clause) in self.clauses.iter().enumerate() {
            f.write_str(if idx == 0 { " :- " } else { ", " })?;
            write!(f, "{clause}")?;
        }
        f.write_str(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    fn var(name: &str) -> Term {
        Term::variable(name)
    }

    #[test]
    fn test_safe_rule_has_no_free_vars() {
        let rule = Rule::new(
            PatternTuple::new([var("x"), var("y")]),
            vec![
                PatternTuple::new([var("x"), Term::constant(1)]),
                PatternTuple::new([Term::constant(2), var("y")]),
            ],
        );

        assert!(rule.free_vars().is_empty());
        assert!(rule.is_safe());
        assert!(rule.check_safety().is_ok());
    }

    #[test]
    fn test_unsafe_rule_reports_unbound_head_var() {
        let rule = Rule::new(
            PatternTuple::new([var("x"), var("z")]),
            vec![PatternTuple::new([var("x"), Term::constant(1)])],
        );

        let z = Variable::new("z");
        let free = rule.free_vars();
        assert_eq!(free.len(), 1);
        assert!(free.contains(&z));

        match rule.check_safety() {
            Err(Error::UnsafeRule { free, .. }) => assert_eq!(free, vec![z]),
            other => panic!("expected unsafe rule error, got {other:?}"),
        }
    }

    #[test]
    fn test_used_and_bound_vars_collapse_repeats() {
        let rule = Rule::new(
            PatternTuple::new([Term::constant("same"), var("x"), var("x")]),
            vec![
                PatternTuple::new([Term::constant("e"), var("x"), var("y")]),
                PatternTuple::new([Term::constant("e"), var("y"), var("x")]),
            ],
        );

        assert_eq!(rule.used_vars().len(), 1);
        assert_eq!(rule.bound_vars().len(), 2);
    }

    #[test]
    fn test_fact_like_rule_without_body() {
        let ground = Rule::new(PatternTuple::new([Term::constant("p")]), Vec::new());
        assert!(ground.is_safe());
        assert_eq!(ground.to_string(), "(p).");

        let open = Rule::new(PatternTuple::new([Term::constant("p"), var("x")]), Vec::new());
        assert!(!open.is_safe());
    }

    #[test]
    fn test_clauses_are_owned_copy() {
        let mut body = vec![PatternTuple::new([Term::constant("q"), var("x")])];
        let rule = Rule::new(PatternTuple::new([Term::constant("p"), var("x")]), body.clone());

        body.push(PatternTuple::new([Term::constant("r")]));
        assert_eq!(rule.clauses().len(), 1);
    }

    #[test]
    fn test_display() {
        let rule = Rule::new(
            PatternTuple::new([Term::constant("path"), var("x"), var("z")]),
            vec![
                PatternTuple::new([Term::constant("path"), var("x"), var("y")]),
                PatternTuple::new([Term::constant("edge"), var("y"), var("z")]),
            ],
        );

        assert_eq!(
            rule.to_string(),
            "(path, ?x, ?z) :- (path, ?x, ?y), (edge, ?y, ?z)."
        );
    }
}
