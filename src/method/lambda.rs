//! Per-method specialization bookkeeping.

use crate::types::JuliaType;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// One specialized instance of a method: a concrete cache key (`spec_types`)
/// paired with the static-parameter bindings that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Specialization {
    pub spec_types: Vec<JuliaType>,
    pub sparams: HashMap<String, JuliaType>,
}

/// Tracks the specializations generated for one `MethodEntry`, plus the
/// in-inference/in-compile reentrancy flags guarding recursive self-calls.
#[derive(Debug, Default)]
pub struct LambdaInfo {
    specializations: RefCell<Vec<Specialization>>,
    in_inference: Cell<bool>,
    in_compile: Cell<bool>,
}

impl LambdaInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing specialization whose `spec_types` equals `key`, if
    /// one exists, so repeated calls at the same cache key share one
    /// specialization instead of re-deriving it.
    pub fn find(&self, key: &[JuliaType]) -> Option<Specialization> {
        self.specializations
            .borrow()
            .iter()
            .find(|s| s.spec_types == key)
            .cloned()
    }

    pub fn insert(&self, spec: Specialization) {
        self.specializations.borrow_mut().push(spec);
    }

    pub fn specialization_count(&self) -> usize {
        self.specializations.borrow().len()
    }

    pub fn is_in_inference(&self) -> bool {
        self.in_inference.get()
    }

    pub fn is_in_compile(&self) -> bool {
        self.in_compile.get()
    }

    /// Mark inference as running, run `f`, then clear the flag unconditionally
    /// on return; the call returning at all, `Ok` or `Err`, ends the
    /// attempt, so an inference error still clears the flag rather than
    /// leaving it pending.
    pub fn with_inference_guard<T>(&self, f: impl FnOnce() -> T) -> T {
        self.in_inference.set(true);
        let result = f();
        self.in_inference.set(false);
        result
    }

    pub fn with_compile_guard<T>(&self, f: impl FnOnce() -> T) -> T {
        self.in_compile.set(true);
        let result = f();
        self.in_compile.set(false);
        result
    }
}
