//! `MethodTable` (`MT`): owns the definitions list, the three-tier cache,
//! and `max_args`; exposes insert/lookup/invalidate.
//!
//! Grounded on `compile::method_table::MethodTable` in the codebase this
//! crate is extracted from, generalized from that struct's single
//! `RefCell<HashMap<Vec<JuliaType>, usize>>` cache into the full three-tier
//! cache this subsystem requires, and from single-threaded-only interior
//! mutability to a `RwLock`-guarded critical section standing in for the
//! original's signal-atomic bracketing.

use crate::cache::{CacheEntry, MethodCache};
use crate::method::{MethodEntry, MethodList};
use crate::types::Signature;
use std::sync::RwLock;

struct TableInner {
    defs: MethodList,
    cache: MethodCache,
    max_args: usize,
}

/// Owns one generic function's definitions and caches. See `GenericFunction`
/// for the public façade that also carries a name and the dispatcher.
pub struct MethodTable {
    inner: RwLock<TableInner>,
}

impl std::fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("method table lock poisoned");
        f.debug_struct("MethodTable")
            .field("defs", &inner.defs.len())
            .field("max_args", &inner.max_args)
            .finish()
    }
}

impl MethodTable {
    /// `new_method_table()`: `max_args=0`, caches empty.
    pub fn new() -> Self {
        MethodTable {
            inner: RwLock::new(TableInner {
                defs: MethodList::new(),
                cache: MethodCache::new(),
                max_args: 0,
            }),
        }
    }

    /// As `new`, but pre-sizes the definitions list for an expected
    /// definition count; embedders that know a generic function's
    /// approximate method count up front can avoid reallocation.
    pub fn with_capacity(expected_defs: usize) -> Self {
        MethodTable {
            inner: RwLock::new(TableInner {
                defs: MethodList::with_capacity(expected_defs),
                cache: MethodCache::new(),
                max_args: 0,
            }),
        }
    }

    pub fn max_args(&self) -> usize {
        self.inner.read().expect("method table lock poisoned").max_args
    }

    /// `insert(MT, sig, body, tvars)`: write-locks, delegates to
    /// `MethodList::insert`, invalidates any cache entries the new
    /// signature intersects, and updates `max_args`.
    pub fn insert(&self, name: &str, entry: MethodEntry) -> usize {
        let sig = entry.sig.clone();
        let effective_arity = if sig.is_vararg() { sig.fixed_arity() } else { sig.arity() };
        let mut inner = self.inner.write().expect("method table lock poisoned");
        let idx = inner.defs.insert(name, entry);
        inner.cache.invalidate_intersecting(&sig);
        if effective_arity > inner.max_args {
            inner.max_args = effective_arity;
        }
        idx
    }

    /// Cache lookup by runtime argument types.
    pub fn lookup_cache(&self, arg_types: &[crate::types::JuliaType]) -> Option<CacheEntry> {
        self.inner.read().expect("method table lock poisoned").cache.lookup(arg_types)
    }

    /// Cache lookup by a queried type tuple rather than concrete runtime
    /// argument types, via the subtype-based predicate. Used by
    /// `GenericFunction::lookup_by_type` when its caller opts into the
    /// cache.
    pub fn lookup_cache_by_type(&self, type_sig: &[crate::types::JuliaType]) -> Option<CacheEntry> {
        self.inner.read().expect("method table lock poisoned").cache.lookup_by_type(type_sig)
    }

    /// `dispatch_args` is the actual call that produced `entry`, used to pick
    /// the cache tier, which may differ from `entry`'s own declared
    /// signature once generalization has replaced a position with `Any`.
    pub fn cache_insert(&self, entry: CacheEntry, dispatch_args: &[crate::types::JuliaType]) {
        self.inner.write().expect("method table lock poisoned").cache.insert(entry, dispatch_args);
    }

    /// Run `f` over the definitions list under a read lock. Used by the full
    /// search and reflection.
    pub fn with_defs<R>(&self, f: impl FnOnce(&MethodList) -> R) -> R {
        f(&self.inner.read().expect("method table lock poisoned").defs)
    }

    /// All other definitions whose signature intersects `sig`, used by the
    /// specialization engine's "need dummy entries" step.
    pub fn intersecting_defs(&self, sig: &Signature, exclude: &crate::method::MethodEntry) -> Vec<Signature> {
        self.with_defs(|defs| {
            defs.iter()
                .filter(|m| !std::ptr::eq(m.as_ref(), exclude) && m.sig.intersects(sig))
                .map(|m| m.sig.intersection(sig))
                .collect()
        })
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::new()
    }
}
