//! Subtype checking, specificity, parametric matching, and type-variable
//! binding extraction for `JuliaType`.

use super::JuliaType;
use crate::types::type_param::TypeParam;
use std::collections::HashMap;

impl JuliaType {
    /// `self <: other`.
    pub fn is_subtype_of(&self, other: &JuliaType) -> bool {
        if self == other {
            return true;
        }
        if matches!(self, JuliaType::Bottom) {
            return true;
        }
        if let JuliaType::Union(self_types) = self {
            return self_types.iter().all(|t| t.is_subtype_of(other));
        }
        if let JuliaType::Union(other_types) = other {
            return other_types.iter().any(|t| self.is_subtype_of(t));
        }
        match other {
            JuliaType::Any => true,
            JuliaType::Bottom => false,
            JuliaType::TypeOf(inner) => {
                if let JuliaType::TypeOf(si) = self {
                    si.is_subtype_of(inner)
                } else {
                    false
                }
            }
            JuliaType::Number => self.is_subtype_of(&JuliaType::Real) || is_number_leaf(self),
            JuliaType::Real => is_real_leaf(self),
            JuliaType::Integer => is_integer_leaf(self),
            JuliaType::Signed => matches!(
                self,
                JuliaType::Int8
                    | JuliaType::Int16
                    | JuliaType::Int32
                    | JuliaType::Int64
                    | JuliaType::Int128
                    | JuliaType::Signed
            ),
            JuliaType::Unsigned => matches!(
                self,
                JuliaType::UInt8
                    | JuliaType::UInt16
                    | JuliaType::UInt32
                    | JuliaType::UInt64
                    | JuliaType::UInt128
                    | JuliaType::Unsigned
            ),
            JuliaType::AbstractFloat => matches!(
                self,
                JuliaType::Float16 | JuliaType::Float32 | JuliaType::Float64 | JuliaType::AbstractFloat
            ),
            JuliaType::AbstractString => matches!(self, JuliaType::String | JuliaType::AbstractString),
            JuliaType::AbstractChar => matches!(self, JuliaType::Char | JuliaType::AbstractChar),
            JuliaType::Function => matches!(self, JuliaType::Function),
            JuliaType::TupleOf(other_elems) => {
                if let JuliaType::TupleOf(self_elems) = self {
                    self_elems.len() == other_elems.len()
                        && self_elems
                            .iter()
                            .zip(other_elems.iter())
                            .all(|(s, o)| s.is_subtype_of(o))
                } else {
                    false
                }
            }
            JuliaType::TypeVar(_, bound) => match bound {
                None => true,
                Some(bt) => self.is_subtype_of(bt),
            },
            JuliaType::Vararg(oe) => {
                if let JuliaType::Vararg(se) = self {
                    se.is_subtype_of(oe)
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Greatest lower bound in the lattice. Used by the ambiguity detector
    /// and the specialization engine's generalization guards to decide
    /// whether two signatures could ever both apply.
    pub fn intersection(&self, other: &JuliaType) -> JuliaType {
        if self == other {
            return self.clone();
        }
        if self.is_subtype_of(other) {
            return self.clone();
        }
        if other.is_subtype_of(self) {
            return other.clone();
        }
        match (self, other) {
            (JuliaType::TupleOf(xs), JuliaType::TupleOf(ys)) if xs.len() == ys.len() => {
                let elems: Vec<JuliaType> = xs.iter().zip(ys.iter()).map(|(x, y)| x.intersection(y)).collect();
                if elems.iter().any(|e| matches!(e, JuliaType::Bottom)) {
                    JuliaType::Bottom
                } else {
                    JuliaType::TupleOf(elems)
                }
            }
            (JuliaType::Union(xs), _) => {
                let opts: Vec<JuliaType> = xs
                    .iter()
                    .map(|x| x.intersection(other))
                    .filter(|t| !matches!(t, JuliaType::Bottom))
                    .collect();
                match opts.len() {
                    0 => JuliaType::Bottom,
                    1 => opts.into_iter().next().expect("len checked above"),
                    _ => JuliaType::Union(opts),
                }
            }
            (_, JuliaType::Union(_)) => other.intersection(self),
            _ => JuliaType::Bottom,
        }
    }

    pub fn intersects(&self, other: &JuliaType) -> bool {
        !matches!(self.intersection(other), JuliaType::Bottom)
    }

    /// Higher is more specific. Mirrors the scoring table used to order
    /// method signatures: `Any` is least specific, concrete leaves are most
    /// specific, and compound types fold their elements' specificities.
    pub fn specificity(&self) -> u8 {
        match self {
            JuliaType::Any => 0,
            JuliaType::Number
            | JuliaType::AbstractString
            | JuliaType::AbstractChar
            | JuliaType::Function => 1,
            JuliaType::Real => 2,
            JuliaType::Integer | JuliaType::AbstractFloat => 3,
            JuliaType::Signed | JuliaType::Unsigned => 4,
            JuliaType::Int8
            | JuliaType::Int16
            | JuliaType::Int32
            | JuliaType::Int64
            | JuliaType::Int128
            | JuliaType::UInt8
            | JuliaType::UInt16
            | JuliaType::UInt32
            | JuliaType::UInt64
            | JuliaType::UInt128
            | JuliaType::Bool
            | JuliaType::Float16
            | JuliaType::Float32
            | JuliaType::Float64
            | JuliaType::String
            | JuliaType::Char
            | JuliaType::Symbol
            | JuliaType::Nothing => 5,
            JuliaType::TupleOf(elems) => {
                if elems.is_empty() {
                    5
                } else {
                    elems.iter().map(JuliaType::specificity).sum::<u8>()
                }
            }
            JuliaType::Vararg(elem) => elem.specificity(),
            JuliaType::TypeVar(_, _) | JuliaType::Bottom => 0,
            JuliaType::Union(_) => 1,
            JuliaType::TypeOf(inner) => {
                if inner.specificity() == 0 {
                    1
                } else {
                    5
                }
            }
        }
    }

    /// Extends [`is_subtype_of`](Self::is_subtype_of) with the "`Any` matches
    /// any primitive" compile-time dispatch rule and type-parameter bound
    /// checking, used when matching against a signature that carries `tvars`.
    pub fn is_subtype_of_parametric(&self, other: &JuliaType, type_params: &[TypeParam]) -> bool {
        if self.is_subtype_of(other) {
            return true;
        }
        if matches!(self, JuliaType::Any) && (other.is_primitive() || matches!(other, JuliaType::Any)) {
            return true;
        }
        if let JuliaType::TypeVar(name, _) = other {
            if let Some(tp) = type_params.iter().find(|p| &p.name == name) {
                if let Some(ub) = &tp.upper_bound {
                    if !self.is_subtype_of(ub) {
                        return false;
                    }
                }
                if let Some(lb) = &tp.lower_bound {
                    if !lb.is_subtype_of(self) {
                        return false;
                    }
                }
                return true;
            }
        }
        if let (JuliaType::TupleOf(st), JuliaType::TupleOf(ot)) = (self, other) {
            return st.len() == ot.len()
                && st
                    .iter()
                    .zip(ot.iter())
                    .all(|(s, o)| s.is_subtype_of_parametric(o, type_params));
        }
        false
    }

    /// Bind the type variables of `pattern` (drawn from `type_params`) against
    /// `self`. Returns `None` on mismatch, `Some(bindings)` (possibly empty)
    /// on a structural match. Used by the full definition search and by the
    /// diagonal-rule check's parametric-slot handling.
    pub fn extract_type_bindings(
        &self,
        pattern: &JuliaType,
        type_params: &[TypeParam],
    ) -> Option<HashMap<String, JuliaType>> {
        let mut bindings = HashMap::new();
        if !bind_into(self, pattern, type_params, &mut bindings) {
            return None;
        }
        if !Self::check_diagonal_rule_for_params(&[pattern.clone()], &bindings) {
            return None;
        }
        Some(bindings)
    }

    /// Diagonal Rule: a type variable that occurs more than once in covariant
    /// position, and never in invariant position, must be bound to a concrete
    /// type (otherwise e.g. `(T, T)` would accept `(Int64, Float64)`).
    pub fn check_diagonal_rule_for_params(
        param_types: &[JuliaType],
        bindings: &HashMap<String, JuliaType>,
    ) -> bool {
        let pattern = JuliaType::TupleOf(param_types.to_vec());
        bindings
            .iter()
            .all(|(var, bound)| satisfies_diagonal_rule(var, bound, &pattern))
    }
}

fn is_number_leaf(t: &JuliaType) -> bool {
    is_real_leaf(t)
}

fn is_real_leaf(t: &JuliaType) -> bool {
    matches!(
        t,
        JuliaType::Int8
            | JuliaType::Int16
            | JuliaType::Int32
            | JuliaType::Int64
            | JuliaType::Int128
            | JuliaType::UInt8
            | JuliaType::UInt16
            | JuliaType::UInt32
            | JuliaType::UInt64
            | JuliaType::UInt128
            | JuliaType::Bool
            | JuliaType::Float16
            | JuliaType::Float32
            | JuliaType::Float64
            | JuliaType::Integer
            | JuliaType::Signed
            | JuliaType::Unsigned
            | JuliaType::AbstractFloat
            | JuliaType::Real
            | JuliaType::Number
    )
}

fn is_integer_leaf(t: &JuliaType) -> bool {
    matches!(
        t,
        JuliaType::Int8
            | JuliaType::Int16
            | JuliaType::Int32
            | JuliaType::Int64
            | JuliaType::Int128
            | JuliaType::UInt8
            | JuliaType::UInt16
            | JuliaType::UInt32
            | JuliaType::UInt64
            | JuliaType::UInt128
            | JuliaType::Bool
            | JuliaType::Signed
            | JuliaType::Unsigned
            | JuliaType::Integer
    )
}

fn bind_into(
    value: &JuliaType,
    pattern: &JuliaType,
    type_params: &[TypeParam],
    bindings: &mut HashMap<String, JuliaType>,
) -> bool {
    match pattern {
        JuliaType::TypeVar(name, _) if type_params.iter().any(|p| &p.name == name) => {
            match bindings.get(name) {
                Some(existing) => existing == value,
                None => {
                    bindings.insert(name.clone(), value.clone());
                    true
                }
            }
        }
        JuliaType::TupleOf(pelems) => {
            if let JuliaType::TupleOf(velems) = value {
                velems.len() == pelems.len()
                    && velems
                        .iter()
                        .zip(pelems.iter())
                        .all(|(v, p)| bind_into(v, p, type_params, bindings))
            } else {
                false
            }
        }
        JuliaType::Vararg(pelem) => match value {
            JuliaType::Vararg(velem) => bind_into(velem, pelem, type_params, bindings),
            other => bind_into(other, pelem, type_params, bindings),
        },
        JuliaType::TypeOf(pinner) => {
            if let JuliaType::TypeOf(vinner) = value {
                bind_into(vinner, pinner, type_params, bindings)
            } else {
                false
            }
        }
        _ => value.is_subtype_of_parametric(pattern, type_params),
    }
}

fn analyze_type_var_occurrences(ty: &JuliaType, var_name: &str, inside_invariant: bool) -> (u8, u8) {
    let (mut cov, mut inv) = (0u8, 0u8);
    match ty {
        JuliaType::TypeVar(name, _) if name == var_name => {
            if inside_invariant {
                inv = 1;
            } else {
                cov = 1;
            }
        }
        JuliaType::TupleOf(elems) => {
            for e in elems {
                let (c, i) = analyze_type_var_occurrences(e, var_name, inside_invariant);
                cov = cov.saturating_add(c).min(2);
                inv = inv.saturating_add(i).min(2);
            }
        }
        JuliaType::Vararg(elem) => {
            let (c, i) = analyze_type_var_occurrences(elem, var_name, inside_invariant);
            cov = cov.saturating_add(c).min(2);
            inv = inv.saturating_add(i).min(2);
        }
        JuliaType::TypeOf(inner) => {
            // Type{T} binds T invariantly: Type{Int64} is not a subtype of Type{Real}.
            let (c, i) = analyze_type_var_occurrences(inner, var_name, true);
            cov = cov.saturating_add(c).min(2);
            inv = inv.saturating_add(i).min(2);
        }
        _ => {}
    }
    (cov, inv)
}

/// See [`JuliaType::check_diagonal_rule_for_params`].
pub fn satisfies_diagonal_rule(var_name: &str, bound_type: &JuliaType, pattern: &JuliaType) -> bool {
    let (cov, inv) = analyze_type_var_occurrences(pattern, var_name, false);
    if cov <= 1 || inv > 0 {
        return true;
    }
    bound_type.is_concrete()
}
