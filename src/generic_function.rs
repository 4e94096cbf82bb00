//! `GenericFunction`: the public façade tying a name, its `MethodTable`, and
//! its inference/compile collaborators together.

use crate::cache::CacheEntry;
use crate::error::DispatchError;
use crate::inference::{CompileTrampoline, NoopCompile, NoopInference, TypeInference};
use crate::method::{MethodBody, MethodEntry};
use crate::table::MethodTable;
use crate::types::{JuliaType, Signature, TypeParam};
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// One result from `matching_methods`: the slice of the query type tuple
/// this definition is responsible for, the static parameter bindings that
/// slice implies, and the definition itself.
pub struct MatchingMethod {
    pub intersection: Signature,
    pub static_param_env: HashMap<String, JuliaType>,
    pub method_entry: Rc<MethodEntry>,
}

pub struct GenericFunction {
    name: String,
    table: MethodTable,
    inference: Box<dyn TypeInference>,
    compile: Box<dyn CompileTrampoline>,
}

impl fmt::Debug for GenericFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericFunction")
            .field("name", &self.name)
            .field("table", &self.table)
            .finish()
    }
}

impl GenericFunction {
    pub fn new(name: impl Into<String>) -> Self {
        GenericFunction {
            name: name.into(),
            table: MethodTable::new(),
            inference: Box::new(NoopInference),
            compile: Box::new(NoopCompile),
        }
    }

    /// As `new`, but pre-sizes the method table for an expected definition
    /// count.
    pub fn with_capacity_hints(name: impl Into<String>, expected_defs: usize) -> Self {
        GenericFunction {
            name: name.into(),
            table: MethodTable::with_capacity(expected_defs),
            inference: Box::new(NoopInference),
            compile: Box::new(NoopCompile),
        }
    }

    pub fn with_inference(mut self, inference: Box<dyn TypeInference>) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_compile(mut self, compile: Box<dyn CompileTrampoline>) -> Self {
        self.compile = compile;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `insert(MT, sig, body, tvars)`.
    pub fn add_method(&self, sig: Signature, tvars: Vec<TypeParam>, body: MethodBody) -> usize {
        let entry = MethodEntry::new(sig, tvars, body);
        self.table.insert(&self.name, entry)
    }

    /// `apply_generic(gf, args)`.
    pub fn dispatch(&self, args: &[Value]) -> Result<Value, DispatchError> {
        crate::dispatch::apply_generic(&self.name, &self.table, args, self.inference.as_ref())
    }

    /// `gf_invoke(gf, T, args)`.
    pub fn invoke(&self, type_sig: &Signature, args: &[Value]) -> Result<Value, DispatchError> {
        crate::invoke::invoke(&self.name, &self.table, type_sig, args, self.inference.as_ref())
    }

    /// Ask the mounted compile trampoline to compile every specialization
    /// currently recorded for `method_index`. Exposed mainly so embedders
    /// can force ahead-of-time compilation outside of dispatch.
    pub fn compile_all(&self, method_index: usize) -> Result<(), crate::error::InferenceFailure> {
        self.table.with_defs(|defs| {
            let Some(entry) = defs.get(method_index) else {
                return Ok(());
            };
            entry.lambda.with_compile_guard(|| self.compile.compile(&entry.lambda))
        })
    }

    /// `jl_matching_methods`-style reflection: every definition whose
    /// signature intersects `type_sig`, in specificity order, stopping as
    /// soon as the already-yielded intersections cover every position of
    /// `type_sig` (later, less specific definitions can no longer change
    /// what a call at `type_sig` would resolve to). Returns `None` if more
    /// than `limit` definitions would have to be enumerated before that
    /// coverage is reached, signalling that `type_sig` is too polymorphic to
    /// enumerate exhaustively.
    pub fn matching_methods(&self, type_sig: &Signature, limit: usize) -> Option<Vec<MatchingMethod>> {
        self.table.with_defs(|defs| {
            let mut results = Vec::new();
            let mut covered: Vec<Vec<JuliaType>> = vec![Vec::new(); type_sig.arity()];
            for entry in defs.iter() {
                if !entry.sig.intersects(type_sig) {
                    continue;
                }
                if results.len() >= limit {
                    return None;
                }
                let intersection = entry.sig.intersection(type_sig);
                let static_param_env = if entry.tvars.is_empty() {
                    HashMap::new()
                } else {
                    entry.sig.type_match(&intersection.0, &entry.tvars).unwrap_or_default()
                };
                for (slot, piece) in covered.iter_mut().zip(intersection.0.iter()) {
                    slot.push(piece.clone());
                }
                results.push(MatchingMethod {
                    intersection,
                    static_param_env,
                    method_entry: Rc::clone(entry),
                });

                let fully_covered = type_sig.0.iter().zip(covered.iter()).all(|(elem, pieces)| {
                    !pieces.is_empty() && elem.is_subtype_of(&JuliaType::Union(pieces.clone()))
                });
                if fully_covered {
                    break;
                }
            }
            Some(results)
        })
    }

    /// `ml_matches`-style single lookup: the first (most specific)
    /// definition that `type_sig` could dispatch to, without invoking it.
    /// With `cache` set, a cached by-type entry is consulted before falling
    /// back to a full scan of `defs`.
    pub fn lookup_by_type(&self, type_sig: &Signature, cache: bool) -> Option<Rc<MethodEntry>> {
        if cache {
            if let Some(CacheEntry::Real { method, .. }) = self.table.lookup_cache_by_type(&type_sig.0) {
                return Some(method);
            }
        }
        self.table.with_defs(|defs| {
            defs.iter()
                .find(|e| {
                    if e.tvars.is_empty() {
                        type_sig.is_subtype_of_signature(&e.sig)
                    } else {
                        type_sig.is_subtype_of_signature_parametric(&e.sig, &e.tvars)
                    }
                })
                .map(Rc::clone)
        })
    }

    pub fn method_count(&self) -> usize {
        self.table.with_defs(crate::method::MethodList::len)
    }
}

/// Convenience constructor mirroring `value::arg_type_tuple`, useful for
/// building a `Signature` from live argument values for `invoke`/reflection
/// calls.
pub fn signature_of(args: &[Value]) -> Signature {
    Signature::new(crate::value::arg_type_tuple(args))
}
