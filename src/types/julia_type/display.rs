use super::JuliaType;
use std::fmt;

impl fmt::Display for JuliaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JuliaType::Int8 => write!(f, "Int8"),
            JuliaType::Int16 => write!(f, "Int16"),
            JuliaType::Int32 => write!(f, "Int32"),
            JuliaType::Int64 => write!(f, "Int64"),
            JuliaType::Int128 => write!(f, "Int128"),
            JuliaType::UInt8 => write!(f, "UInt8"),
            JuliaType::UInt16 => write!(f, "UInt16"),
            JuliaType::UInt32 => write!(f, "UInt32"),
            JuliaType::UInt64 => write!(f, "UInt64"),
            JuliaType::UInt128 => write!(f, "UInt128"),
            JuliaType::Bool => write!(f, "Bool"),
            JuliaType::Float16 => write!(f, "Float16"),
            JuliaType::Float32 => write!(f, "Float32"),
            JuliaType::Float64 => write!(f, "Float64"),
            JuliaType::String => write!(f, "String"),
            JuliaType::Char => write!(f, "Char"),
            JuliaType::Symbol => write!(f, "Symbol"),
            JuliaType::Nothing => write!(f, "Nothing"),
            JuliaType::Any => write!(f, "Any"),
            JuliaType::Number => write!(f, "Number"),
            JuliaType::Real => write!(f, "Real"),
            JuliaType::Integer => write!(f, "Integer"),
            JuliaType::Signed => write!(f, "Signed"),
            JuliaType::Unsigned => write!(f, "Unsigned"),
            JuliaType::AbstractFloat => write!(f, "AbstractFloat"),
            JuliaType::AbstractString => write!(f, "AbstractString"),
            JuliaType::AbstractChar => write!(f, "AbstractChar"),
            JuliaType::Function => write!(f, "Function"),
            JuliaType::TupleOf(elems) => {
                write!(f, "Tuple{{")?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, "}}")
            }
            JuliaType::Vararg(elem) => write!(f, "{elem}..."),
            JuliaType::Union(elems) => {
                write!(f, "Union{{")?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, "}}")
            }
            JuliaType::TypeOf(inner) => write!(f, "Type{{{inner}}}"),
            JuliaType::TypeVar(name, Some(bound)) => write!(f, "{name}<:{bound}"),
            JuliaType::TypeVar(name, None) => write!(f, "{name}"),
            JuliaType::Bottom => write!(f, "Union{{}}"),
        }
    }
}
