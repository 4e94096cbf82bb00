//! Stable integer identity for concrete, non-tuple type terms. Every
//! concrete non-tuple type has a stable integer UID.
//!
//! Grounded on the registry idiom used throughout this codebase for
//! process-wide lookup tables (e.g. `once_cell::sync::Lazy` guarding a
//! `Mutex`/`RwLock`-protected map in its stdlib/base loaders), adapted here
//! to assign and intern UIDs for `cache_arg1`/`cache_targ` keys instead of
//! loading prelude definitions.

use crate::types::julia_type::JuliaType;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

pub type Uid = u32;

struct Registry {
    by_type: HashMap<JuliaType, Uid>,
    next: Uid,
}

static REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| {
    Mutex::new(Registry {
        by_type: HashMap::new(),
        next: 0,
    })
});

/// UID for a concrete, non-tuple type, assigning one on first use. Returns
/// `None` for types that have no stable UID (tuples, unions, `Any`, type
/// variables, `Bottom`); those never index `cache_arg1`/`cache_targ`.
pub fn uid_of(ty: &JuliaType) -> Option<Uid> {
    if !has_uid(ty) {
        return None;
    }
    let mut reg = REGISTRY.lock().expect("uid registry poisoned");
    if let Some(&u) = reg.by_type.get(ty) {
        return Some(u);
    }
    let u = reg.next;
    reg.next += 1;
    reg.by_type.insert(ty.clone(), u);
    Some(u)
}

fn has_uid(ty: &JuliaType) -> bool {
    !matches!(
        ty,
        JuliaType::TupleOf(_)
            | JuliaType::Union(_)
            | JuliaType::Any
            | JuliaType::TypeVar(..)
            | JuliaType::Bottom
            | JuliaType::Vararg(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_type_same_uid() {
        let a = uid_of(&JuliaType::Int64).unwrap();
        let b = uid_of(&JuliaType::Int64).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_types_distinct_uids() {
        let a = uid_of(&JuliaType::Int64).unwrap();
        let b = uid_of(&JuliaType::Float64).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tuple_has_no_uid() {
        assert_eq!(uid_of(&JuliaType::TupleOf(vec![JuliaType::Int64])), None);
        assert_eq!(uid_of(&JuliaType::Any), None);
    }
}
