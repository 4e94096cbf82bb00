//! `cache_method`: turns a successful full-search match into a cache
//! entry, generalizing the concrete argument types into a cache key so that
//! later calls with different-but-compatible argument types reuse the same
//! entry instead of growing the cache without bound.
//!
//! Grounded on the generalization steps gf.c's `cache_method` applies before
//! installing a tuple type into a method's cache, adapted to this crate's
//! simplified `JuliaType` lattice (no `Array`/`VectorOf` element-type
//! generalization, since those variants don't exist here).

use crate::cache::{CacheEntry, SENTINEL_TVAR};
use crate::error::DispatchError;
use crate::inference::TypeInference;
use crate::method::{MethodEntry, Specialization};
use crate::table::MethodTable;
use crate::types::{JuliaType, Signature};
use std::collections::HashMap;
use std::rc::Rc;

/// Build the generalized cache key for one dispatch, following the same
/// per-position rules `cache_method` applies, then cap the vararg tail so a
/// call with many trailing arguments doesn't grow the key without bound.
fn generalize(declared: &Signature, args: &[JuliaType], max_args: usize) -> Vec<JuliaType> {
    let mut key: Vec<JuliaType> = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        let decl = declared.elem(i.min(declared.arity().saturating_sub(1)));
        let declared_any = matches!(decl, Some(JuliaType::Any) | None);

        let generalized = match arg {
            // Type{Type{...}}: collapse entirely to the sentinel Type{T}.
            JuliaType::TypeOf(inner) if matches!(inner.as_ref(), JuliaType::TypeOf(_)) => {
                JuliaType::TypeOf(Box::new(JuliaType::TypeVar(SENTINEL_TVAR.into(), None)))
            }
            // Type{x} at an Any-declared slot: generalize to the sentinel so
            // every singleton type value shares one cache entry.
            JuliaType::TypeOf(_) if declared_any => {
                JuliaType::TypeOf(Box::new(JuliaType::TypeVar(SENTINEL_TVAR.into(), None)))
            }
            // A tuple-valued argument at an Any-declared slot: don't cache
            // per distinct tuple shape.
            JuliaType::TupleOf(_) if declared_any => JuliaType::Any,
            // Any other argument at an Any-declared slot generalizes to Any.
            other if declared_any => {
                if matches!(other, JuliaType::Any) {
                    other.clone()
                } else {
                    JuliaType::Any
                }
            }
            other => other.clone(),
        };
        key.push(generalized);
    }

    let cap = max_args + 2;
    if declared.is_vararg() && key.len() > cap {
        let tail = key[cap - 1..]
            .iter()
            .skip(1)
            .fold(key[cap - 1].clone(), |acc, t| acc.intersection(t));
        key.truncate(cap - 1);
        key.push(JuliaType::Vararg(Box::new(tail)));
    }
    key
}

/// Install the cache entry for a method that just matched `args` through the
/// full search, including the "need dummy entries" guard and the
/// sharing/inference hookup.
pub fn cache_method(
    table: &MethodTable,
    method: &Rc<MethodEntry>,
    args: &[JuliaType],
    sparams: HashMap<String, JuliaType>,
    inference: &dyn TypeInference,
) -> Result<(), DispatchError> {
    let key = generalize(&method.sig, args, table.max_args());
    let key_sig = Signature::new(key.clone());

    for other_sig in table.intersecting_defs(&key_sig, method.as_ref()) {
        table.cache_insert(CacheEntry::Dummy { sig: other_sig.0 }, args);
    }

    table.cache_insert(
        CacheEntry::Real {
            sig: key,
            method: Rc::clone(method),
            sparams: sparams.clone(),
        },
        args,
    );

    let spec_types = method.sig.instantiate(&sparams);
    if method.lambda.find(&spec_types).is_none() {
        let specialization = Specialization { spec_types, sparams };
        method
            .lambda
            .with_inference_guard(|| inference.infer(&method.lambda, &method.sig, method.as_ref()))?;
        method.lambda.insert(specialization);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(types: Vec<JuliaType>) -> Signature {
        Signature::new(types)
    }

    #[test]
    fn any_slot_generalizes_concrete_args_to_any() {
        let declared = sig(vec![JuliaType::Any, JuliaType::Any]);
        let key = generalize(&declared, &[JuliaType::Int64, JuliaType::String], 2);
        assert_eq!(key, vec![JuliaType::Any, JuliaType::Any]);
    }

    #[test]
    fn type_of_type_of_collapses_to_sentinel() {
        let declared = sig(vec![JuliaType::Any]);
        let nested = JuliaType::TypeOf(Box::new(JuliaType::TypeOf(Box::new(JuliaType::Int64))));
        let key = generalize(&declared, &[nested], 1);
        assert_eq!(
            key,
            vec![JuliaType::TypeOf(Box::new(JuliaType::TypeVar(SENTINEL_TVAR.into(), None)))]
        );
    }

    #[test]
    fn type_of_at_any_slot_generalizes_to_sentinel() {
        let declared = sig(vec![JuliaType::Any]);
        let key = generalize(&declared, &[JuliaType::TypeOf(Box::new(JuliaType::String))], 1);
        assert_eq!(
            key,
            vec![JuliaType::TypeOf(Box::new(JuliaType::TypeVar(SENTINEL_TVAR.into(), None)))]
        );
    }

    #[test]
    fn type_of_at_concrete_slot_stays_exact() {
        // k(Type{Int64}) = H: the declared slot is itself Type{Int64}, not
        // Any, so a Type{Int64} argument is not generalized away.
        let declared = sig(vec![JuliaType::TypeOf(Box::new(JuliaType::Int64))]);
        let key = generalize(&declared, &[JuliaType::TypeOf(Box::new(JuliaType::Int64))], 1);
        assert_eq!(key, vec![JuliaType::TypeOf(Box::new(JuliaType::Int64))]);
    }

    #[test]
    fn vararg_tail_caps_at_max_args_plus_two() {
        // h(Any...) called with five Int64 arguments, max_args=2: the cache
        // key keeps the first `max_args+1` positions and folds the rest into
        // one vararg tail (scenario 4).
        let declared = sig(vec![JuliaType::Vararg(Box::new(JuliaType::Any))]);
        let args = vec![
            JuliaType::Int64,
            JuliaType::Int64,
            JuliaType::Int64,
            JuliaType::Int64,
            JuliaType::Int64,
        ];
        let key = generalize(&declared, &args, 2);
        assert_eq!(key.len(), 4);
        assert_eq!(key[3], JuliaType::Vararg(Box::new(JuliaType::Int64)));
    }

    #[test]
    fn cache_method_installs_dummy_for_intersecting_definition() {
        let table = MethodTable::new();
        table.insert(
            "f",
            MethodEntry::new(sig(vec![JuliaType::Any, JuliaType::Int64]), vec![], Box::new(|_, _| unreachable!())),
        );
        table.insert(
            "f",
            MethodEntry::new(sig(vec![JuliaType::Int64, JuliaType::Any]), vec![], Box::new(|_, _| unreachable!())),
        );

        let wide = table
            .with_defs(|defs| defs.iter().find(|e| e.sig == sig(vec![JuliaType::Any, JuliaType::Int64])).map(Rc::clone))
            .expect("wide definition present");

        let args = [JuliaType::Int64, JuliaType::Int64];
        cache_method(&table, &wide, &args, HashMap::new(), &crate::inference::NoopInference).unwrap();

        // The same args that just populated the cache fall within the
        // narrow definition's intersection with the generalized key, so the
        // dummy entry must make this a miss rather than resolving to `wide`.
        assert!(table.lookup_cache(&args).is_none());
    }
}
