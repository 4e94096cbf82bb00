//! `Signature` (`Σ`): an ordered sequence of type terms, possibly ending in a
//! `Vararg` tail.

use crate::types::julia_type::JuliaType;
use crate::types::type_param::TypeParam;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<JuliaType>);

impl Signature {
    pub fn new(elems: Vec<JuliaType>) -> Self {
        Signature(elems)
    }

    /// `arity(Σ)`: the declared tuple length, including the vararg slot
    /// itself if present (not its multiplicity).
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn is_vararg(&self) -> bool {
        self.0.last().is_some_and(JuliaType::is_vararg)
    }

    /// The number of fixed (non-vararg) leading positions.
    pub fn fixed_arity(&self) -> usize {
        if self.is_vararg() {
            self.0.len() - 1
        } else {
            self.0.len()
        }
    }

    pub fn elem(&self, i: usize) -> Option<&JuliaType> {
        self.0.get(i)
    }

    fn vararg_elem(&self) -> Option<&JuliaType> {
        match self.0.last() {
            Some(JuliaType::Vararg(e)) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// `tuple_subtype(args_type, Σ)`: true iff the positional arg types are
    /// each a subtype of the corresponding declared element, with vararg
    /// tail positions checked against the sequence's element type.
    pub fn tuple_subtype(&self, args: &[JuliaType]) -> bool {
        if self.is_vararg() {
            if args.len() < self.fixed_arity() {
                return false;
            }
            for (a, d) in args.iter().zip(self.0.iter()).take(self.fixed_arity()) {
                if !a.is_subtype_of(d) {
                    return false;
                }
            }
            let tail_ty = self.vararg_elem().expect("checked is_vararg above");
            args[self.fixed_arity()..].iter().all(|a| a.is_subtype_of(tail_ty))
        } else {
            args.len() == self.0.len()
                && args.iter().zip(self.0.iter()).all(|(a, d)| a.is_subtype_of(d))
        }
    }

    /// `type_match(args_type, Σ)`: as `tuple_subtype`, but binds `tvars`
    /// and returns the binding environment. Rejects a match where any bound
    /// value is itself a type variable: parametric methods require every
    /// typevar resolved to a concrete/non-typevar type.
    pub fn type_match(
        &self,
        args: &[JuliaType],
        tvars: &[TypeParam],
    ) -> Option<HashMap<String, JuliaType>> {
        let mut bindings = HashMap::new();
        let arity_ok = if self.is_vararg() {
            args.len() >= self.fixed_arity()
        } else {
            args.len() == self.0.len()
        };
        if !arity_ok {
            return None;
        }
        for (a, d) in args.iter().zip(self.0.iter()).take(self.fixed_arity()) {
            let b = a.extract_type_bindings(d, tvars)?;
            if !merge(&mut bindings, b) {
                return None;
            }
        }
        if self.is_vararg() {
            let tail_ty = self.vararg_elem().expect("checked is_vararg above");
            for a in &args[self.fixed_arity()..] {
                let b = a.extract_type_bindings(tail_ty, tvars)?;
                if !merge(&mut bindings, b) {
                    return None;
                }
            }
        }
        if bindings.values().any(|v| matches!(v, JuliaType::TypeVar(..))) {
            return None;
        }
        Some(bindings)
    }

    /// Instantiate every bound typevar in the signature with its binding,
    /// producing the concrete (or partially concrete) tuple type used as a
    /// specialization cache key.
    pub fn instantiate(&self, env: &HashMap<String, JuliaType>) -> Vec<JuliaType> {
        self.0
            .iter()
            .map(|t| instantiate_type(t, env))
            .collect()
    }
}

fn instantiate_type(ty: &JuliaType, env: &HashMap<String, JuliaType>) -> JuliaType {
    match ty {
        JuliaType::TypeVar(name, _) => env.get(name).cloned().unwrap_or_else(|| ty.clone()),
        JuliaType::TupleOf(elems) => {
            JuliaType::TupleOf(elems.iter().map(|e| instantiate_type(e, env)).collect())
        }
        JuliaType::Vararg(elem) => JuliaType::Vararg(Box::new(instantiate_type(elem, env))),
        JuliaType::TypeOf(inner) => JuliaType::TypeOf(Box::new(instantiate_type(inner, env))),
        other => other.clone(),
    }
}

fn merge(into: &mut HashMap<String, JuliaType>, from: HashMap<String, JuliaType>) -> bool {
    for (k, v) in from {
        match into.get(&k) {
            Some(existing) if existing != &v => return false,
            _ => {
                into.insert(k, v);
            }
        }
    }
    true
}

impl Signature {
    /// `self <: other` at the signature level, with vararg tail handling
    /// (the building block `morespecific` is defined in terms of).
    pub fn is_subtype_of_signature(&self, other: &Signature) -> bool {
        match (self.is_vararg(), other.is_vararg()) {
            (false, false) => {
                self.0.len() == other.0.len()
                    && self.0.iter().zip(other.0.iter()).all(|(s, o)| s.is_subtype_of(o))
            }
            (false, true) => {
                if self.0.len() < other.fixed_arity() {
                    return false;
                }
                let tail = other.vararg_elem().expect("checked is_vararg above");
                self.0
                    .iter()
                    .take(other.fixed_arity())
                    .zip(other.0.iter())
                    .all(|(s, o)| s.is_subtype_of(o))
                    && self.0[other.fixed_arity()..].iter().all(|s| s.is_subtype_of(tail))
            }
            (true, false) => false,
            (true, true) => {
                let n = self.fixed_arity().min(other.fixed_arity());
                let prefix_ok = self
                    .0
                    .iter()
                    .take(n)
                    .zip(other.0.iter().take(n))
                    .all(|(s, o)| s.is_subtype_of(o));
                let self_tail = self.vararg_elem().expect("checked is_vararg above");
                let other_tail = other.vararg_elem().expect("checked is_vararg above");
                prefix_ok && self_tail.is_subtype_of(other_tail)
            }
        }
    }

    /// Sum of element specificities, used to break ties when both
    /// signatures are mutual subtypes of one another.
    pub fn specificity_score(&self) -> u32 {
        self.0.iter().map(|t| t.specificity() as u32).sum()
    }

    /// `morespecific(self, other)`: `self` should be tried before `other`
    /// during dispatch.
    pub fn morespecific(&self, other: &Signature) -> bool {
        let fwd = self.is_subtype_of_signature(other);
        let back = other.is_subtype_of_signature(self);
        match (fwd, back) {
            (true, false) => true,
            (true, true) => self.specificity_score() > other.specificity_score(),
            _ => false,
        }
    }

    /// Parametric-aware subtype check used by `morespecific` when either
    /// side carries `tvars`.
    pub fn is_subtype_of_signature_parametric(&self, other: &Signature, other_tvars: &[TypeParam]) -> bool {
        match (self.is_vararg(), other.is_vararg()) {
            (false, false) => {
                self.0.len() == other.0.len()
                    && self
                        .0
                        .iter()
                        .zip(other.0.iter())
                        .all(|(s, o)| s.is_subtype_of_parametric(o, other_tvars))
            }
            (false, true) => {
                if self.0.len() < other.fixed_arity() {
                    return false;
                }
                let tail = other.vararg_elem().expect("checked is_vararg above");
                self.0
                    .iter()
                    .take(other.fixed_arity())
                    .zip(other.0.iter())
                    .all(|(s, o)| s.is_subtype_of_parametric(o, other_tvars))
                    && self.0[other.fixed_arity()..]
                        .iter()
                        .all(|s| s.is_subtype_of_parametric(tail, other_tvars))
            }
            (true, false) => false,
            (true, true) => {
                let n = self.fixed_arity().min(other.fixed_arity());
                let prefix_ok = self
                    .0
                    .iter()
                    .take(n)
                    .zip(other.0.iter().take(n))
                    .all(|(s, o)| s.is_subtype_of_parametric(o, other_tvars));
                let self_tail = self.vararg_elem().expect("checked is_vararg above");
                let other_tail = other.vararg_elem().expect("checked is_vararg above");
                prefix_ok && self_tail.is_subtype_of_parametric(other_tail, other_tvars)
            }
        }
    }

    /// Full `morespecific(A, B)`, taking each side's `tvars` into
    /// account: when `other` is parametric, the parametric match decides
    /// unless it fails while `self` has no type variables of its own, in
    /// which case the raw (non-parametric) comparison is consulted instead.
    pub fn morespecific_with_tvars(
        &self,
        self_tvars: &[TypeParam],
        other: &Signature,
        other_tvars: &[TypeParam],
    ) -> bool {
        if !other_tvars.is_empty() {
            let fwd = self.is_subtype_of_signature_parametric(other, other_tvars);
            if !fwd && self_tvars.is_empty() {
                return self.morespecific(other);
            }
            if !self_tvars.is_empty() {
                let back = other.is_subtype_of_signature_parametric(self, self_tvars);
                return match (fwd, back) {
                    (true, false) => true,
                    (true, true) => self.specificity_score() > other.specificity_score(),
                    _ => false,
                };
            }
            return fwd && !other.is_subtype_of_signature(self);
        }
        self.morespecific(other)
    }

    /// Arities must align for two signatures to be comparable for
    /// ambiguity: equal, or off by one when exactly one is vararg.
    pub fn arities_align(&self, other: &Signature) -> bool {
        match (self.is_vararg(), other.is_vararg()) {
            (false, false) => self.0.len() == other.0.len(),
            (true, true) => true,
            (true, false) => other.0.len() + 1 >= self.fixed_arity(),
            (false, true) => self.0.len() + 1 >= other.fixed_arity(),
        }
    }

    /// Elementwise intersection of two signatures of matching shape. Only
    /// defined over the shared fixed prefix when either side is vararg,
    /// which is sufficient for the ambiguity detector's use.
    pub fn intersection(&self, other: &Signature) -> Signature {
        let n = self.fixed_arity().min(other.fixed_arity());
        let mut elems: Vec<JuliaType> = self
            .0
            .iter()
            .take(n)
            .zip(other.0.iter().take(n))
            .map(|(s, o)| s.intersection(o))
            .collect();
        if self.is_vararg() && other.is_vararg() {
            let self_tail = self.vararg_elem().expect("checked is_vararg above");
            let other_tail = other.vararg_elem().expect("checked is_vararg above");
            elems.push(JuliaType::Vararg(Box::new(self_tail.intersection(other_tail))));
        }
        Signature(elems)
    }

    pub fn intersects(&self, other: &Signature) -> bool {
        self.arities_align(other) && self.intersection(other).0.iter().all(|t| !matches!(t, JuliaType::Bottom))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{t}")?;
        }
        write!(f, ")")
    }
}
