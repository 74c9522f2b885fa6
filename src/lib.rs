//! # Factbase
//!
//! An in-memory fact and rule store for Datalog-style deductive evaluators.
//!
//! ## Features
//!
//! - Immutable snapshots of ground tuples and rules, combined by value-semantics `merge`
//! - Variable-safety analysis on rules
//! - A per-snapshot memo of tuples each rule application has already produced
//! - A functor/arity index for pattern-restricted scans
//!
//! Parsing source text and running rules to a fixed point are left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use factbase::{Dataset, GroundTuple, IndexStore, IndexedDataset, PatternTuple, Term};
//!
//! let facts = vec![
//!     GroundTuple::new(["parent", "alice", "bob"]),
//!     GroundTuple::new(["parent", "bob", "carol"]),
//! ];
//! let store: IndexedDataset = Dataset::new(facts, Vec::new()).into();
//!
//! let probe = PatternTuple::new([
//!     Term::constant("parent"),
//!     Term::variable("x"),
//!     Term::variable("y"),
//! ]);
//! assert_eq!(store.scan_index(&probe).unwrap().count(), 2);
//! ```

/// Memoizing dataset layer.
pub mod cached;
/// Base snapshot of facts and rules.
pub mod dataset;
/// Error types.
pub mod error;
/// Functor/arity indexed dataset layer.
pub mod indexed;
/// Inference rules and their variable analysis.
pub mod rule;
/// Capability traits shared by the dataset layers.
pub mod store;
/// Constants, variables and tuples.
pub mod term;

pub use cached::CachedDataset;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use indexed::{IndexKey, IndexScan, IndexedDataset};
pub use rule::Rule;
pub use store::{CacheStore, IndexStore, Store};
pub use term::{Constant, GroundTuple, PatternTuple, Term, Variable};
