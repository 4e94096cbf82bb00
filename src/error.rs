//! Error kinds surfaced by the dispatch engine. Hand-written
//! `Display`/`std::error::Error` impls, following `types::dispatch_error` and
//! `error::syntax` in the codebase this crate is grounded on; both are small
//! closed enums given manual impls rather than a derive macro.

use crate::types::Signature;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No definition's signature accepts the argument types.
    NoMethodFound { name: String, arg_types: Signature },
    /// Two or more definitions tie and neither is more specific; raised only
    /// when dispatch itself cannot break a tie already warned about at
    /// definition time by the ambiguity detector.
    AmbiguousMethod {
        name: String,
        arg_types: Signature,
        candidates: Vec<Signature>,
    },
    /// A `TypeInference`/`CompileTrampoline` collaborator returned an error.
    InferenceFailed(InferenceFailure),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoMethodFound { name, arg_types } => {
                write!(f, "MethodError: no method matching {name}{arg_types}")
            }
            DispatchError::AmbiguousMethod {
                name,
                arg_types,
                candidates,
            } => {
                writeln!(f, "MethodError: {name}{arg_types} is ambiguous. Candidates:")?;
                for c in candidates {
                    writeln!(f, "  {name}{c}")?;
                }
                Ok(())
            }
            DispatchError::InferenceFailed(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<InferenceFailure> for DispatchError {
    fn from(value: InferenceFailure) -> Self {
        DispatchError::InferenceFailed(value)
    }
}

/// Propagated unmodified from the `TypeInference`/`CompileTrampoline`
/// collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceFailure(pub String);

impl fmt::Display for InferenceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type inference failed: {}", self.0)
    }
}

impl std::error::Error for InferenceFailure {}
