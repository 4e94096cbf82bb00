//! `invoke`-style dispatch: dispatch restricted to a caller-supplied
//! signature `T`, bypassing the normal most-specific-match search.
//!
//! A method's private `invokes` sub-table is grounded on the original's
//! per-method invoke cache, simplified here to hold only cache entries (no
//! nested definitions list) since `MethodEntry` isn't `Clone`; the sub-table
//! exists purely so repeated `invoke` calls at the same concrete argument
//! types skip re-deriving static parameters.

use crate::cache::CacheEntry;
use crate::error::DispatchError;
use crate::table::MethodTable;
use crate::types::Signature;
use crate::value::{arg_type_tuple, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// `gf_invoke(gf, T, args)`: find the first definition `M` with
/// `T <: M.sig`, then dispatch within `M`'s own private sub-table.
pub fn invoke(
    name: &str,
    table: &MethodTable,
    type_sig: &Signature,
    args: &[Value],
    inference: &dyn crate::inference::TypeInference,
) -> Result<Value, DispatchError> {
    let method = table.with_defs(|defs| {
        defs.iter()
            .find(|e| {
                if e.tvars.is_empty() {
                    type_sig.is_subtype_of_signature(&e.sig)
                } else {
                    type_sig.is_subtype_of_signature_parametric(&e.sig, &e.tvars)
                }
            })
            .map(Rc::clone)
    });

    let Some(method) = method else {
        return Err(DispatchError::NoMethodFound {
            name: name.to_string(),
            arg_types: type_sig.clone(),
        });
    };

    let arg_types = arg_type_tuple(args);

    if method.invokes.borrow().is_none() {
        *method.invokes.borrow_mut() = Some(Box::new(MethodTable::new()));
    }

    if let Some(sparams) = {
        let invokes_ref = method.invokes.borrow();
        let sub = invokes_ref.as_ref().expect("just initialized above");
        match sub.lookup_cache(&arg_types) {
            Some(CacheEntry::Real { sparams, .. }) => Some(sparams),
            _ => None,
        }
    } {
        return (method.body)(args, &sparams);
    }

    let sparams = if method.tvars.is_empty() {
        HashMap::new()
    } else {
        method
            .sig
            .type_match(&arg_types, &method.tvars)
            .unwrap_or_default()
    };
    inference.infer(&method.lambda, &method.sig, method.as_ref())?;

    {
        let invokes_ref = method.invokes.borrow();
        let sub = invokes_ref.as_ref().expect("just initialized above");
        sub.cache_insert(
            CacheEntry::Real {
                sig: arg_types.clone(),
                method: Rc::clone(&method),
                sparams: sparams.clone(),
            },
            &arg_types,
        );
    }

    (method.body)(args, &sparams)
}
