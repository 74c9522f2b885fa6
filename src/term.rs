use std::fmt;

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Inline capacity of a tuple before it spills to the heap.
///
/// Most relations seen in practice are a functor plus two or three arguments.
const INLINE_ARITY: usize = 4;

/// A ground value (e.g., `alice`, `42`)
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constant {
    /// A symbol such as a functor name or an atom (e.g., `"parent"`, `"bob"`)
    Symbol(String),
    /// An integer literal
    Integer(i64),
}

impl Constant {
    /// Returns the symbol text, if this constant is a symbol
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s),
            Self::Integer(_) => None,
        }
    }
}

impl From<&str> for Constant {
    fn from(s: &str) -> Self {
        Self::Symbol(s.to_string())
    }
}

impl From<String> for Constant {
    fn from(s: String) -> Self {
        Self::Symbol(s)
    }
}

impl From<i64> for Constant {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// A named placeholder (e.g., `?x`). Two variables are the same iff their names are.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable(String);

impl Variable {
    /// Create a variable with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The variable's name, without the `?` sigil
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// Either a ground value or a variable
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Term {
    /// A concrete value
    Constant(Constant),
    /// A placeholder to be bound by an evaluator
    Variable(Variable),
}

impl Term {
    /// Shorthand for `Term::Constant(value.into())`
    pub fn constant(value: impl Into<Constant>) -> Self {
        Self::Constant(value.into())
    }

    /// Shorthand for `Term::Variable(Variable::new(name))`
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(Variable::new(name))
    }

    /// Returns the variable, if this term is one
    #[must_use]
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(var) => Some(var),
            Self::Constant(_) => None,
        }
    }

    /// Returns the constant, if this term is one
    #[must_use]
    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Self::Constant(c) => Some(c),
            Self::Variable(_) => None,
        }
    }

    /// True if the term holds no variable
    #[must_use]
    pub fn is_ground(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Self::Constant(c)
    }
}

impl From<Variable> for Term {
    fn from(var: Variable) -> Self {
        Self::Variable(var)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => fmt::Display::fmt(c, f),
            Self::Variable(var) => fmt::Display::fmt(var, f),
        }
    }
}

fn write_tuple<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("(")?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(")")
}

/// A fixed-arity ordered sequence of terms (e.g., `(parent, ?x, ?y)`)
///
/// By convention the leading element names the relation (the functor).
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternTuple {
    terms: SmallVec<[Term; INLINE_ARITY]>,
}

impl PatternTuple {
    /// Create a pattern from its terms
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Self {
        terms.into_iter().collect()
    }

    /// Number of positions in the pattern, functor included
    #[must_use]
    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// The leading term, if any
    #[must_use]
    pub fn first(&self) -> Option<&Term> {
        self.terms.first()
    }

    /// The term at `position`, if any
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Term> {
        self.terms.get(position)
    }

    /// Iterate over the terms in order
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Iterate over the variables in order of occurrence, repeats included
    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.terms.iter().filter_map(Term::as_variable)
    }

    /// True if no position holds a variable
    #[must_use]
    pub fn is_ground(&self) -> bool {
        self.terms.iter().all(Term::is_ground)
    }
}

impl FromIterator<Term> for PatternTuple {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PatternTuple {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<GroundTuple> for PatternTuple {
    fn from(tuple: GroundTuple) -> Self {
        tuple.values.into_iter().map(Term::Constant).collect()
    }
}

impl fmt::Display for PatternTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, &self.terms)
    }
}

/// A fixed-arity ordered sequence of constants: a fact (e.g., `(parent, alice, bob)`)
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundTuple {
    values: SmallVec<[Constant; INLINE_ARITY]>,
}

impl GroundTuple {
    /// Create a fact from its values
    pub fn new<C: Into<Constant>>(values: impl IntoIterator<Item = C>) -> Self {
        values.into_iter().map(Into::<Constant>::into).collect()
    }

    /// Number of positions in the fact, functor included
    #[must_use]
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// The leading value, if any
    #[must_use]
    pub fn first(&self) -> Option<&Constant> {
        self.values.first()
    }

    /// The value at `position`, if any
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Constant> {
        self.values.get(position)
    }

    /// Iterate over the values in order
    pub fn iter(&self) -> std::slice::Iter<'_, Constant> {
        self.values.iter()
    }
}

impl FromIterator<Constant> for GroundTuple {
    fn from_iter<I: IntoIterator<Item = Constant>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a GroundTuple {
    type Item = &'a Constant;
    type IntoIter = std::slice::Iter<'a, Constant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<PatternTuple> for GroundTuple {
    type Error = Error;

    /// Fails with [`Error::NotGround`] on the first variable found.
    fn try_from(pattern: PatternTuple) -> Result<Self> {
        pattern
            .terms
            .into_iter()
            .enumerate()
            .map(|(position, term)| match term {
                Term::Constant(c) => Ok(c),
                Term::Variable(variable) => Err(Error::NotGround { position, variable }),
            })
            .collect()
    }
}

impl fmt::Display for GroundTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, &self.values)
    }
}
