use dispatch_engine::{DispatchError, GenericFunction, JuliaType, Signature, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

fn tagged(tag: &'static str) -> Box<dyn Fn(&[Value], &HashMap<String, JuliaType>) -> Result<Value, DispatchError> + Send + Sync> {
    Box::new(move |_args, _sparams| Ok(Value::String(tag.to_string())))
}

fn tag_of(v: &Value) -> &str {
    match v {
        Value::String(s) => s.as_str(),
        _ => panic!("expected a tagged String result"),
    }
}

/// Scenario 6 / P5: redefining a signature must invalidate any cache entry
/// that was already populated for it; the next call sees the new body, not
/// a stale cached reference to the old one.
#[test]
fn redefinition_invalidates_the_populated_cache() {
    let f = GenericFunction::new("f");
    f.add_method(Signature::new(vec![JuliaType::Int64, JuliaType::Int64]), vec![], tagged("A"));

    // Populate the cache.
    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1), Value::Int64(2)]).unwrap()), "A");
    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1), Value::Int64(2)]).unwrap()), "A");

    f.add_method(Signature::new(vec![JuliaType::Int64, JuliaType::Int64]), vec![], tagged("A'"));

    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1), Value::Int64(2)]).unwrap()), "A'");
    assert_eq!(f.method_count(), 1);
}

/// A definition that merely intersects (without being identical to) an
/// already-cached, more-general signature still invalidates the stale entry.
#[test]
fn overlapping_new_definition_invalidates_a_broader_cached_entry() {
    let f = GenericFunction::new("f");
    f.add_method(Signature::new(vec![JuliaType::Any]), vec![], tagged("wide"));

    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1)]).unwrap()), "wide");

    // A new, more specific definition invalidates anything in the cache that
    // could have matched Int64 under the old, broader dispatch.
    f.add_method(Signature::new(vec![JuliaType::Int64]), vec![], tagged("narrow"));
    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1)]).unwrap()), "narrow");
    assert_eq!(tag_of(&f.dispatch(&[Value::String("x".into())]).unwrap()), "wide");
}

/// P6: `max_args` always reflects the maximum effective arity across `defs`,
/// tracked incrementally as definitions are added.
#[test]
fn max_args_tracks_the_widest_definition() {
    let f = GenericFunction::new("f");
    assert_eq!(f.method_count(), 0);

    f.add_method(Signature::new(vec![JuliaType::Int64]), vec![], tagged("one"));
    f.add_method(Signature::new(vec![JuliaType::Int64, JuliaType::Int64, JuliaType::Int64]), vec![], tagged("three"));
    f.add_method(Signature::new(vec![JuliaType::Int64, JuliaType::Int64]), vec![], tagged("two"));

    // max_args is internal to MethodTable; observe it indirectly through the
    // vararg generalization it drives (see scenario 4's unit test in
    // specialize.rs), and directly confirm all three arities still dispatch.
    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1)]).unwrap()), "one");
    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1), Value::Int64(2)]).unwrap()), "two");
    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1), Value::Int64(2), Value::Int64(3)]).unwrap()), "three");
}

/// A vararg definition is invoked exactly once per distinct call shape that
/// misses the cache, and repeated identical calls hit the cache instead of
/// re-running the full search.
#[test]
fn vararg_definition_dispatches_and_reuses_its_cache_entry() {
    let calls = Arc::new(AtomicU32::new(0));
    let counted_calls = Arc::clone(&calls);
    let body: Box<dyn Fn(&[Value], &HashMap<String, JuliaType>) -> Result<Value, DispatchError> + Send + Sync> =
        Box::new(move |_args, _sparams| {
            counted_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::String("G".into()))
        });

    let h = GenericFunction::new("h");
    h.add_method(Signature::new(vec![JuliaType::Vararg(Box::new(JuliaType::Any))]), vec![], body);

    let args = [Value::Int64(1), Value::Int64(2), Value::Int64(3), Value::Int64(4), Value::Int64(5)];
    for _ in 0..3 {
        assert_eq!(tag_of(&h.dispatch(&args).unwrap()), "G");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3, "the body itself runs every call; only the search is cached");
}
