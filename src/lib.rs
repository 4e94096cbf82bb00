//! A multiple-dispatch generic-function engine: a subtype lattice over
//! tagged/bits/tuple/union/vararg/type-variable types, a specificity-sorted
//! method table, a three-tier dispatch cache, and the full/cached dispatch
//! and `invoke`-restricted-dispatch paths built on top of them.
//!
//! Prevent accidental debug output from this crate (ambiguity warnings are
//! opt-in via [`diagnostics::AmbiguityCollector::enable_stderr`] rather than
//! printed unconditionally).
#![deny(clippy::print_stderr)]

pub mod cache;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod generic_function;
pub mod inference;
pub mod invoke;
pub mod method;
pub mod specialize;
pub mod table;
pub mod types;
pub mod value;

pub use error::{DispatchError, InferenceFailure};
pub use generic_function::{GenericFunction, MatchingMethod};
pub use types::{JuliaType, Signature, TypeParam, Uid};
pub use value::Value;
