use dispatch_engine::{DispatchError, GenericFunction, JuliaType, Signature, TypeParam, Value};
use std::collections::HashMap;

fn tagged(tag: &'static str) -> Box<dyn Fn(&[Value], &HashMap<String, JuliaType>) -> Result<Value, DispatchError> + Send + Sync> {
    Box::new(move |_args, _sparams| Ok(Value::String(tag.to_string())))
}

fn tag_of(v: &Value) -> &str {
    match v {
        Value::String(s) => s.as_str(),
        _ => panic!("expected a tagged String result"),
    }
}

/// Scenario 1: two overlapping numeric-tower definitions, most-specific wins.
#[test]
fn numeric_tower_dispatch_prefers_concrete_over_abstract() {
    let f = GenericFunction::new("f");
    f.add_method(Signature::new(vec![JuliaType::Int64, JuliaType::Int64]), vec![], tagged("A"));
    f.add_method(Signature::new(vec![JuliaType::Real, JuliaType::Real]), vec![], tagged("B"));

    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1), Value::Int64(2)]).unwrap()), "A");
    assert_eq!(tag_of(&f.dispatch(&[Value::Float64(1.0), Value::Float64(2.0)]).unwrap()), "B");
    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(1), Value::Float64(2.0)]).unwrap()), "B");
}

/// Scenario 3: a parametric method and its `Any, Any` fallback.
#[test]
fn parametric_method_binds_type_variable_and_falls_back_on_mismatch() {
    let g = GenericFunction::new("g");
    let t = TypeParam::new("T");
    g.add_method(
        Signature::new(vec![JuliaType::TypeVar("T".into(), None), JuliaType::TypeVar("T".into(), None)]),
        vec![t],
        tagged("E"),
    );
    g.add_method(Signature::new(vec![JuliaType::Any, JuliaType::Any]), vec![], tagged("F"));

    assert_eq!(tag_of(&g.dispatch(&[Value::Int64(1), Value::Int64(1)]).unwrap()), "E");
    assert_eq!(tag_of(&g.dispatch(&[Value::Int64(1), Value::String("x".into())]).unwrap()), "F");
}

/// Scenario 5: `Type{T}` dispatch, a concrete singleton beats the generic one.
#[test]
fn type_of_dispatch_prefers_concrete_singleton() {
    let k = GenericFunction::new("k");
    k.add_method(Signature::new(vec![JuliaType::TypeOf(Box::new(JuliaType::Int64))]), vec![], tagged("H"));
    let t = TypeParam::new("T");
    k.add_method(
        Signature::new(vec![JuliaType::TypeOf(Box::new(JuliaType::TypeVar("T".into(), None)))]),
        vec![t],
        tagged("I"),
    );

    assert_eq!(tag_of(&k.dispatch(&[Value::Type(JuliaType::Int64)]).unwrap()), "H");
    assert_eq!(tag_of(&k.dispatch(&[Value::Type(JuliaType::String)]).unwrap()), "I");
}

/// Repeated dispatch against the same argument types must keep returning the
/// same method once the cache has been populated (P2/P3 at the black-box
/// level: a cache hit agrees with what the full search would have chosen).
#[test]
fn repeated_dispatch_is_stable_across_cache_population() {
    let f = GenericFunction::new("f");
    f.add_method(Signature::new(vec![JuliaType::Int64]), vec![], tagged("only"));

    for _ in 0..5 {
        assert_eq!(tag_of(&f.dispatch(&[Value::Int64(7)]).unwrap()), "only");
    }
}

#[test]
fn total_miss_reports_no_method_found() {
    let f = GenericFunction::new("f");
    f.add_method(Signature::new(vec![JuliaType::Int64]), vec![], tagged("only"));

    let err = f.dispatch(&[Value::String("nope".into())]).unwrap_err();
    match err {
        DispatchError::NoMethodFound { name, .. } => assert_eq!(name, "f"),
        other => panic!("expected NoMethodFound, got {other:?}"),
    }
}
