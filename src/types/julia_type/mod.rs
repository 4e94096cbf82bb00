//! The type-term lattice (`τ` in the data model): concrete leaves, the abstract
//! numeric/string/char hierarchies, structural tuples, vararg (sequence) tails,
//! unions, the `Type{T}` singleton kind, and bounded type variables.
//!
//! This is the compile-time counterpart of argument type tags; it carries no
//! runtime value representation of its own (see `crate::value`).

mod comparison;
mod display;

pub use comparison::satisfies_diagonal_rule;

/// A type term. Every concrete non-tuple variant is registered with a stable
/// [`crate::types::uid::Uid`] on first construction (see `types::uid`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JuliaType {
    // Concrete signed integers
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    // Concrete unsigned integers
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    Bool,
    // Concrete floats
    Float16,
    Float32,
    Float64,
    // Other concrete leaves
    String,
    Char,
    Symbol,
    Nothing,

    // Abstract numeric hierarchy
    Any,
    Number,
    Real,
    Integer,
    Signed,
    Unsigned,
    AbstractFloat,
    AbstractString,
    AbstractChar,
    Function,

    /// `(τ1, …, τn)`, a structural tuple type.
    TupleOf(Vec<JuliaType>),
    /// `τ…`, a sequence (vararg) type. Only meaningful as the last element
    /// of a `Signature`; see `types::signature`.
    Vararg(Box<JuliaType>),
    /// `Union{τ1, …, τn}`.
    Union(Vec<JuliaType>),
    /// `Type{τ}`, the singleton kind whose only inhabitant is the type `τ`.
    TypeOf(Box<JuliaType>),
    /// A bound type variable, e.g. `T` or `T <: Real`.
    TypeVar(String, Option<Box<JuliaType>>),

    /// The bottom type; subtype of everything, no inhabitants.
    Bottom,
}

impl JuliaType {
    /// Resolve a type name to a concrete/abstract leaf. Returns `None` for
    /// names this lattice doesn't know about (tuples, unions, `Type{T}`, and
    /// type variables have no flat name form and are constructed directly).
    pub fn from_name(name: &str) -> Option<JuliaType> {
        Some(match name {
            "Int8" => JuliaType::Int8,
            "Int16" => JuliaType::Int16,
            "Int32" => JuliaType::Int32,
            "Int64" | "Int" => JuliaType::Int64,
            "Int128" => JuliaType::Int128,
            "UInt8" => JuliaType::UInt8,
            "UInt16" => JuliaType::UInt16,
            "UInt32" => JuliaType::UInt32,
            "UInt64" => JuliaType::UInt64,
            "UInt128" => JuliaType::UInt128,
            "Bool" => JuliaType::Bool,
            "Float16" => JuliaType::Float16,
            "Float32" => JuliaType::Float32,
            "Float64" => JuliaType::Float64,
            "String" => JuliaType::String,
            "Char" => JuliaType::Char,
            "Symbol" => JuliaType::Symbol,
            "Nothing" => JuliaType::Nothing,
            "Any" => JuliaType::Any,
            "Number" => JuliaType::Number,
            "Real" => JuliaType::Real,
            "Integer" => JuliaType::Integer,
            "Signed" => JuliaType::Signed,
            "Unsigned" => JuliaType::Unsigned,
            "AbstractFloat" => JuliaType::AbstractFloat,
            "AbstractString" => JuliaType::AbstractString,
            "AbstractChar" => JuliaType::AbstractChar,
            "Function" => JuliaType::Function,
            "Bottom" | "Union{}" => JuliaType::Bottom,
            _ => return None,
        })
    }

    /// True for every variant that is not an abstract type, a type variable,
    /// a union, or `Bottom`, i.e. a type a value can actually carry as its
    /// exact runtime tag.
    pub fn is_concrete(&self) -> bool {
        match self {
            JuliaType::Any
            | JuliaType::Number
            | JuliaType::Real
            | JuliaType::Integer
            | JuliaType::Signed
            | JuliaType::Unsigned
            | JuliaType::AbstractFloat
            | JuliaType::AbstractString
            | JuliaType::AbstractChar
            | JuliaType::Function
            | JuliaType::TypeVar(..)
            | JuliaType::Union(_)
            | JuliaType::Bottom => false,
            JuliaType::TupleOf(elems) => elems.iter().all(JuliaType::is_concrete),
            JuliaType::Vararg(elem) => elem.is_concrete(),
            JuliaType::TypeOf(inner) => inner.is_concrete(),
            _ => true,
        }
    }

    /// True for the numeric-tower leaves and abstract numeric supertypes;
    /// used by `is_subtype_of_parametric`'s `Any`-matches-primitive rule.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
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
                | JuliaType::Number
                | JuliaType::Real
                | JuliaType::Integer
                | JuliaType::Signed
                | JuliaType::Unsigned
                | JuliaType::AbstractFloat
        )
    }

    /// Replicates the original's `jl_is_nontuple_type` guard used by the
    /// cache-match predicates: a `Type{x}` argument only takes the scalar
    /// fast path when `x` itself is not a tuple type.
    pub fn is_tuple_like(&self) -> bool {
        matches!(self, JuliaType::TupleOf(_))
    }

    pub fn is_vararg(&self) -> bool {
        matches!(self, JuliaType::Vararg(_))
    }

    /// Substitute every free occurrence of `var` with `replacement`.
    pub fn substitute(&self, var: &str, replacement: &JuliaType) -> JuliaType {
        match self {
            JuliaType::TypeVar(name, bound) if name == var => {
                let _ = bound;
                replacement.clone()
            }
            JuliaType::TupleOf(elems) => {
                JuliaType::TupleOf(elems.iter().map(|e| e.substitute(var, replacement)).collect())
            }
            JuliaType::Vararg(elem) => {
                JuliaType::Vararg(Box::new(elem.substitute(var, replacement)))
            }
            JuliaType::Union(elems) => {
                JuliaType::Union(elems.iter().map(|e| e.substitute(var, replacement)).collect())
            }
            JuliaType::TypeOf(inner) => {
                JuliaType::TypeOf(Box::new(inner.substitute(var, replacement)))
            }
            other => other.clone(),
        }
    }
}
