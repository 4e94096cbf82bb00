use dispatch_engine::{DispatchError, GenericFunction, JuliaType, Signature, Value};
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

/// P7: `invoke` bypasses the normal most-specific-match search and instead
/// picks the first definition whose signature is a supertype of the
/// caller-supplied `T`, even when a more specific definition would have won
/// ordinary dispatch.
#[test]
fn invoke_restricts_to_the_requested_signature_not_the_most_specific_match() {
    let f = GenericFunction::new("f");
    f.add_method(Signature::new(vec![JuliaType::Int64]), vec![], tagged("concrete"));
    f.add_method(Signature::new(vec![JuliaType::Real]), vec![], tagged("abstract"));

    // Ordinary dispatch picks the concrete definition.
    assert_eq!(tag_of(&f.dispatch(&[Value::Int64(3)]).unwrap()), "concrete");

    // invoke(f, (Real,), (3,)) forces the Real method even though Int64 is
    // also applicable and more specific.
    let t = Signature::new(vec![JuliaType::Real]);
    assert_eq!(tag_of(&f.invoke(&t, &[Value::Int64(3)]).unwrap()), "abstract");
}

/// invoke at a signature with no matching definition reports a miss.
#[test]
fn invoke_with_no_matching_definition_reports_no_method_found() {
    let f = GenericFunction::new("f");
    f.add_method(Signature::new(vec![JuliaType::Int64]), vec![], tagged("concrete"));

    let t = Signature::new(vec![JuliaType::String]);
    let err = f.invoke(&t, &[Value::String("x".into())]).unwrap_err();
    assert!(matches!(err, DispatchError::NoMethodFound { .. }));
}

/// Repeated invoke calls at the same signature/argument types are stable.
#[test]
fn repeated_invoke_is_stable() {
    let f = GenericFunction::new("f");
    f.add_method(Signature::new(vec![JuliaType::Real]), vec![], tagged("abstract"));

    let t = Signature::new(vec![JuliaType::Real]);
    for _ in 0..5 {
        assert_eq!(tag_of(&f.invoke(&t, &[Value::Int64(1)]).unwrap()), "abstract");
    }
}
