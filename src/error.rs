//! Error types for the fact store.

use thiserror::Error;

use crate::term::{Constant, Variable};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong when using a store.
///
/// Only [`Error::EmptyPattern`] and [`Error::UnboundFunctor`] are raised by the
/// store itself; the remaining variants come from conversions and opt-in validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An index key was requested for a pattern with no positions.
    #[error("cannot derive an index key from an empty pattern")]
    EmptyPattern,

    /// An index key was requested for a pattern whose leading term is a variable.
    #[error("cannot derive an index key from a pattern led by variable `{0}`")]
    UnboundFunctor(Variable),

    /// A pattern holding a variable was used where a fact was expected.
    #[error("tuple is not ground: variable `{variable}` at position {position}")]
    NotGround {
        /// Position of the first offending term
        position: usize,
        /// The variable found there
        variable: Variable,
    },

    /// A rule has head variables that no body clause binds.
    #[error("rule `{rule}` is unsafe: {} not bound by any clause", display_vars(.free))]
    UnsafeRule {
        /// The rule, rendered as text
        rule: String,
        /// The unbound head variables
        free: Vec<Variable>,
    },

    /// A functor is used with more than one arity.
    #[error("functor `{functor}` used with arity {found}, previously seen with arity {expected}")]
    ArityMismatch {
        /// The functor
        functor: Constant,
        /// The arity first seen
        expected: usize,
        /// The conflicting arity
        found: usize,
    },
}

fn display_vars(vars: &[Variable]) -> String {
    vars.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
