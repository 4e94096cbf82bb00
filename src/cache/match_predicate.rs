//! The two cache-match predicates: `cache_match` (exact/by-value) and
//! `cache_match_by_type` (subtype-based), sharing one chain-walking body so
//! the fast and slow paths can't silently diverge.

use crate::types::JuliaType;

/// The sentinel type-variable name used for a generalized `Type{T}` cache
/// key. Not a user-visible identifier.
pub const SENTINEL_TVAR: &str = "#s";

fn is_sentinel_type_of(decl: &JuliaType) -> bool {
    matches!(decl, JuliaType::TypeOf(inner) if matches!(inner.as_ref(), JuliaType::TypeVar(name, _) if name == SENTINEL_TVAR))
}

/// Shared chain-walk. `by_type` selects subtype-based matching for
/// non-`Type{T}`/non-tuple positions; both variants use `is_subtype_of` for
/// the `Type{T}` and tuple branches, matching the original's own predicate
/// (those two branches are never a plain identity check even in the
/// by-value form).
fn cache_match_generic(decl: &[JuliaType], args: &[JuliaType], by_type: bool) -> bool {
    let is_vararg = decl.last().is_some_and(JuliaType::is_vararg);
    let fixed = if is_vararg { decl.len() - 1 } else { decl.len() };

    if is_vararg {
        if args.len() < fixed {
            return false;
        }
    } else if args.len() != decl.len() {
        return false;
    }

    for i in 0..fixed {
        let d = &decl[i];
        let a = &args[i];
        if !positions_match(d, a, by_type) {
            return false;
        }
    }

    if is_vararg {
        let tail = match &decl[fixed] {
            JuliaType::Vararg(elem) => elem.as_ref(),
            _ => unreachable!("checked is_vararg above"),
        };
        args[fixed..].iter().all(|a| a.is_subtype_of(tail))
    } else {
        true
    }
}

fn positions_match(decl: &JuliaType, arg: &JuliaType, by_type: bool) -> bool {
    match decl {
        JuliaType::Any => true,
        JuliaType::TypeOf(decl_inner) => {
            // The `//***` non-tuple-type guard: a `Type{x}` declared slot
            // only takes this path when the argument is itself a non-tuple
            // type value (already wrapped as `Type{arg}` by `arg_type_tuple`).
            let JuliaType::TypeOf(arg_inner) = arg else {
                return false;
            };
            if arg_inner.is_tuple_like() {
                return false;
            }
            if is_sentinel_type_of(decl) {
                true
            } else if by_type {
                arg_inner.is_subtype_of(decl_inner) && decl_inner.is_subtype_of(arg_inner)
            } else {
                arg_inner == decl_inner.as_ref()
            }
        }
        JuliaType::TupleOf(_) => matches!(arg, JuliaType::TupleOf(_)) && arg.is_subtype_of(decl),
        _ => {
            if by_type {
                arg.is_subtype_of(decl)
            } else {
                arg == decl
            }
        }
    }
}

/// `cache_match`: the fast, dispatch-time predicate.
pub fn cache_match(decl: &[JuliaType], args: &[JuliaType]) -> bool {
    cache_match_generic(decl, args, false)
}

/// `cache_match_by_type`: the slower, compile-time-query predicate.
pub fn cache_match_by_type(decl: &[JuliaType], args: &[JuliaType]) -> bool {
    cache_match_generic(decl, args, true)
}
