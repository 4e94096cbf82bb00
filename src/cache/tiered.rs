//! The three-tier method cache: `cache_targ` (keyed by the UID of
//! a `Type{T}` singleton), `cache_arg1` (keyed by the first argument's
//! concrete-type UID), and `cache_fallback` (everything else).

use super::entry::CacheEntry;
use super::match_predicate::{cache_match, cache_match_by_type};
use crate::types::signature::Signature;
use crate::types::uid::{self, Uid};
use crate::types::JuliaType;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MethodCache {
    cache_targ: HashMap<Uid, Vec<CacheEntry>>,
    cache_arg1: HashMap<Uid, Vec<CacheEntry>>,
    cache_fallback: Vec<CacheEntry>,
}

/// Which chain a call (or an entry installed on its behalf) belongs in.
/// Classifying by the *actual* argument types, not by an entry's own
/// (possibly generalized) declared signature, is what keeps `lookup` and
/// `insert` looking in the same place: once generalization replaces a
/// declared position with `Any`, the entry's own first element no longer
/// carries a UID, but the call that produced it still does.
enum Tier {
    Targ(Uid),
    Arg1(Uid),
    Fallback,
}

fn classify(args: &[JuliaType]) -> Tier {
    let Some(a0) = args.first() else {
        return Tier::Fallback;
    };
    if let JuliaType::TypeOf(inner) = a0 {
        if !inner.is_tuple_like() {
            if let Some(u) = uid::uid_of(inner) {
                return Tier::Targ(u);
            }
        }
    }
    if let Some(u) = uid::uid_of(a0) {
        return Tier::Arg1(u);
    }
    Tier::Fallback
}

impl MethodCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe the tier selected by the first argument, walk the chain, and
    /// stop at the first match; a dummy match is reported as a miss so the
    /// caller falls through to the full search.
    pub fn lookup(&self, args: &[JuliaType]) -> Option<CacheEntry> {
        let chain = self.select_chain(args);
        let hit = chain.iter().find(|e| cache_match(e.sig(), args))?;
        if hit.is_dummy() {
            None
        } else {
            Some(hit.clone())
        }
    }

    /// As `lookup`, but via `cache_match_by_type`: a hit only requires the
    /// queried type tuple to be a subtype of the entry's cache key, not
    /// identical to it. Used by compile-time by-type queries that opt into
    /// the cache instead of always walking `defs`.
    pub fn lookup_by_type(&self, type_sig: &[JuliaType]) -> Option<CacheEntry> {
        let chain = self.select_chain(type_sig);
        let hit = chain.iter().find(|e| cache_match_by_type(e.sig(), type_sig))?;
        if hit.is_dummy() {
            None
        } else {
            Some(hit.clone())
        }
    }

    fn select_chain(&self, args: &[JuliaType]) -> &[CacheEntry] {
        match classify(args) {
            Tier::Targ(u) => self.cache_targ.get(&u).map(Vec::as_slice).unwrap_or(&[]),
            Tier::Arg1(u) => self.cache_arg1.get(&u).map(Vec::as_slice).unwrap_or(&[]),
            Tier::Fallback => &self.cache_fallback,
        }
    }

    /// Install `entry` into the tier selected by the arguments that produced
    /// it, which may differ from the entry's own declared signature once
    /// generalization has run.
    pub fn insert(&mut self, entry: CacheEntry, dispatch_args: &[JuliaType]) {
        match classify(dispatch_args) {
            Tier::Targ(u) => self.cache_targ.entry(u).or_default().push(entry),
            Tier::Arg1(u) => self.cache_arg1.entry(u).or_default().push(entry),
            Tier::Fallback => self.cache_fallback.push(entry),
        }
    }

    /// Remove every entry (in all three tiers) whose signature intersects
    /// `sig`.
    pub fn invalidate_intersecting(&mut self, sig: &Signature) {
        let keep = |e: &CacheEntry| !Signature::new(e.sig().to_vec()).intersects(sig);
        for chain in self.cache_targ.values_mut() {
            chain.retain(keep);
        }
        for chain in self.cache_arg1.values_mut() {
            chain.retain(keep);
        }
        self.cache_fallback.retain(keep);
    }

    #[cfg(test)]
    pub fn total_len(&self) -> usize {
        self.cache_targ.values().map(Vec::len).sum::<usize>()
            + self.cache_arg1.values().map(Vec::len).sum::<usize>()
            + self.cache_fallback.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::MethodEntry;
    use std::rc::Rc;

    #[test]
    fn entry_generalized_past_its_own_first_position_stays_reachable() {
        // The declared cache key has Any in position 0 (post-generalization),
        // but the call that produced it had a concrete Int64 there, the
        // entry must be filed (and found) under that call's tier, not under
        // its own now-Any first element, or `lookup` (which classifies by
        // the call's actual first argument) would never find it.
        let mut cache = MethodCache::new();
        let dispatch_args = [JuliaType::Int64, JuliaType::Int64];
        let method = Rc::new(MethodEntry::new(
            Signature::new(vec![JuliaType::Any, JuliaType::Int64]),
            vec![],
            Box::new(|_, _| unreachable!()),
        ));
        cache.insert(
            CacheEntry::Real {
                sig: vec![JuliaType::Any, JuliaType::Int64],
                method,
                sparams: Default::default(),
            },
            &dispatch_args,
        );
        assert!(cache.lookup(&dispatch_args).is_some());
    }

    #[test]
    fn dummy_entry_reports_a_miss() {
        let mut cache = MethodCache::new();
        let dispatch_args = [JuliaType::Int64, JuliaType::Int64];
        cache.insert(CacheEntry::Dummy { sig: vec![JuliaType::Int64, JuliaType::Int64] }, &dispatch_args);
        assert!(cache.lookup(&dispatch_args).is_none());
    }

    #[test]
    fn lookup_by_type_matches_a_supertype_query() {
        let mut cache = MethodCache::new();
        let dispatch_args = [JuliaType::Int64, JuliaType::Int64];
        let method = Rc::new(MethodEntry::new(
            Signature::new(vec![JuliaType::Int64, JuliaType::Int64]),
            vec![],
            Box::new(|_, _| unreachable!()),
        ));
        cache.insert(
            CacheEntry::Real {
                sig: vec![JuliaType::Int64, JuliaType::Int64],
                method,
                sparams: Default::default(),
            },
            &dispatch_args,
        );
        // A query for the broader `(Integer, Integer)` still resolves via
        // the subtype-based predicate even though it's not byte-for-byte
        // equal to the cached key.
        let query = [JuliaType::Integer, JuliaType::Integer];
        assert!(cache.lookup(&query).is_none());
        assert!(cache.lookup_by_type(&query).is_none());
        assert!(cache.lookup_by_type(&dispatch_args).is_some());
    }
}
