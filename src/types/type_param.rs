//! A static parameter bound in a method signature, e.g. `T` or `T <: Real`.
//!
//! Adapted from the codebase's `TypeParam` (`types::type_param`); simplified
//! to hold resolved `JuliaType` bounds directly rather than deferred name
//! strings, since this crate has no serialization round-trip to support.

use crate::types::julia_type::JuliaType;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub upper_bound: Option<JuliaType>,
    pub lower_bound: Option<JuliaType>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            upper_bound: None,
            lower_bound: None,
        }
    }

    pub fn with_upper_bound(mut self, bound: JuliaType) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    pub fn with_lower_bound(mut self, bound: JuliaType) -> Self {
        self.lower_bound = Some(bound);
        self
    }

    pub fn has_constraints(&self) -> bool {
        self.upper_bound.is_some() || self.lower_bound.is_some()
    }
}

impl fmt::Display for TypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower_bound, &self.upper_bound) {
            (None, None) => write!(f, "{}", self.name),
            (None, Some(ub)) => write!(f, "{}<:{}", self.name, ub),
            (Some(lb), None) => write!(f, "{}>:{}", self.name, lb),
            (Some(lb), Some(ub)) => write!(f, "{}<:{}<:{}", lb, self.name, ub),
        }
    }
}
