//! `apply_generic`: the dispatcher. Checks the cache first, falls back
//! to the full definition search on a miss, and installs a cache entry for
//! future calls.

use crate::error::DispatchError;
use crate::inference::TypeInference;
use crate::method::MethodEntry;
use crate::specialize::cache_method;
use crate::table::MethodTable;
use crate::types::{JuliaType, Signature};
use crate::value::{arg_type_tuple, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Walk `defs` (already specificity-sorted) for the first entry whose
/// signature matches `arg_types`, binding its type variables if any.
fn full_search(
    table: &MethodTable,
    arg_types: &[JuliaType],
) -> Option<(Rc<MethodEntry>, HashMap<String, JuliaType>)> {
    table.with_defs(|defs| {
        for entry in defs.iter() {
            let bindings = if entry.tvars.is_empty() {
                if entry.sig.tuple_subtype(arg_types) {
                    Some(HashMap::new())
                } else {
                    None
                }
            } else {
                entry.sig.type_match(arg_types, &entry.tvars)
            };
            if let Some(sparams) = bindings {
                return Some((Rc::clone(entry), sparams));
            }
        }
        None
    })
}

/// `apply_generic(gf, args)`. `name` is used only for the error message on a
/// total miss.
pub fn apply_generic(
    name: &str,
    table: &MethodTable,
    args: &[Value],
    inference: &dyn TypeInference,
) -> Result<Value, DispatchError> {
    let arg_types = arg_type_tuple(args);

    if let Some(entry) = table.lookup_cache(&arg_types) {
        let crate::cache::CacheEntry::Real { method, sparams, .. } = entry else {
            unreachable!("MethodCache::lookup never returns a dummy entry")
        };
        return (method.body)(args, &sparams);
    }

    let Some((method, sparams)) = full_search(table, &arg_types) else {
        return Err(DispatchError::NoMethodFound {
            name: name.to_string(),
            arg_types: Signature::new(arg_types),
        });
    };

    // A recursive call arriving while this very method is mid-inference or
    // mid-compile skips re-entering specialization/caching and just runs the
    // method body against the binding this call produced.
    if method.lambda.is_in_inference() || method.lambda.is_in_compile() {
        return (method.body)(args, &sparams);
    }

    cache_method(table, &method, &arg_types, sparams.clone(), inference)?;
    (method.body)(args, &sparams)
}
