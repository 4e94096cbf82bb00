//! A minimal runtime value representation, just rich enough to carry a
//! `JuliaType` tag through dispatch. Value allocation and the full numeric
//! tower are out of scope; the surrounding host embedding is expected
//! to supply its own richer value type and only needs `Typed::julia_type`.
//!
//! Grounded on the `Value`-tagged dynamic-dispatch idiom in
//! `subset_julia_vm_runtime::dispatch` (`dynamic_binop` et al. match on
//! `(Value, Value)` pairs to select an operator implementation); this crate
//! generalizes that idiom from a fixed operator set to arbitrary generic
//! functions.

use crate::types::JuliaType;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int64(i64),
    Float64(f64),
    Bool(bool),
    String(String),
    Char(char),
    Tuple(Vec<Value>),
    /// A value that is itself a type, the sole inhabitant of `Type{T}`.
    Type(JuliaType),
}

/// Anything that can report the `JuliaType` tag dispatch matches against.
pub trait Typed {
    fn julia_type(&self) -> JuliaType;
}

impl Typed for Value {
    fn julia_type(&self) -> JuliaType {
        match self {
            Value::Int64(_) => JuliaType::Int64,
            Value::Float64(_) => JuliaType::Float64,
            Value::Bool(_) => JuliaType::Bool,
            Value::String(_) => JuliaType::String,
            Value::Char(_) => JuliaType::Char,
            Value::Tuple(elems) => JuliaType::TupleOf(elems.iter().map(Typed::julia_type).collect()),
            Value::Type(t) => JuliaType::TypeOf(Box::new(t.clone())),
        }
    }
}

/// `arg_type_tuple`: for each argument, use `Type{a}` if `a` is itself a
/// non-tuple type value, else the argument's own type.
pub fn arg_type_tuple(args: &[Value]) -> Vec<JuliaType> {
    args.iter()
        .map(|a| match a {
            Value::Type(t) if !t.is_tuple_like() => JuliaType::TypeOf(Box::new(t.clone())),
            other => other.julia_type(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_type_wraps_as_type_of() {
        let args = vec![Value::Type(JuliaType::Int64)];
        assert_eq!(arg_type_tuple(&args), vec![JuliaType::TypeOf(Box::new(JuliaType::Int64))]);
    }

    #[test]
    fn ordinary_value_uses_its_own_type() {
        let args = vec![Value::Int64(1), Value::String("x".into())];
        assert_eq!(arg_type_tuple(&args), vec![JuliaType::Int64, JuliaType::String]);
    }
}
