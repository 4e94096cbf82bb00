//! The specificity-sorted sequence of method definitions plus the ambiguity
//! detector.

use crate::diagnostics::{AmbiguityCollector, AmbiguityWarning};
use crate::method::entry::MethodEntry;
use std::rc::Rc;

#[derive(Default)]
pub struct MethodList {
    entries: Vec<Rc<MethodEntry>>,
}

impl MethodList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        MethodList { entries: Vec::with_capacity(n) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<MethodEntry>> {
        self.entries.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&Rc<MethodEntry>> {
        self.entries.get(idx)
    }

    /// `insert(MT, sig, body, tvars)`, minus the cache-invalidation and
    /// `max_args` bookkeeping that the owning `MethodTable` performs around
    /// this call. Returns the index the entry ended up at.
    ///
    /// Entries are kept behind `Rc` rather than stored inline so that cache
    /// entries can hold a stable reference to a method independent of later
    /// insertions shifting this vector's indices.
    pub fn insert(&mut self, name: &str, entry: MethodEntry) -> usize {
        if let Some(idx) = self.entries.iter().position(|e| e.same_signature(&entry)) {
            self.entries[idx] = Rc::new(entry);
            return idx;
        }

        for existing in &self.entries {
            if let Some(warning) = ambiguity_between(name, &entry, existing, &self.entries) {
                AmbiguityCollector::emit(warning);
            }
        }

        let slot = self
            .entries
            .iter()
            .position(|existing| entry.is_more_specific_than(existing))
            .unwrap_or(self.entries.len());

        let has_union = entry.sig.0.iter().any(|t| matches!(t, crate::types::JuliaType::Union(_)));
        self.entries.insert(slot, Rc::new(entry));

        if has_union {
            self.resort_tail(slot);
        }
        slot
    }

    /// A union in the newly-inserted signature may make some later entry
    /// more specific than the one at `from`; re-insert that tail in place
    /// rather than performing a full re-sort.
    fn resort_tail(&mut self, from: usize) {
        let mut i = from + 1;
        while i < self.entries.len() {
            if self.entries[i].is_more_specific_than(&self.entries[i - 1]) {
                self.entries.swap(i - 1, i);
                if i > from + 1 {
                    i -= 1;
                    continue;
                }
            }
            i += 1;
        }
    }
}

/// Two signatures are ambiguous iff neither is more specific than the other,
/// their arities align, their intersection is inhabited, and that
/// intersection isn't already fully covered by some other definition already
/// in `defs` that is more specific than both `a` and `b` (a call landing in
/// the intersection would resolve to that third definition, not ambiguously
/// between `a` and `b`).
fn ambiguity_between(
    name: &str,
    a: &MethodEntry,
    b: &MethodEntry,
    defs: &[Rc<MethodEntry>],
) -> Option<AmbiguityWarning> {
    if a.is_more_specific_than(b) || b.is_more_specific_than(a) {
        return None;
    }
    if !a.sig.arities_align(&b.sig) {
        return None;
    }
    if !a.sig.intersects(&b.sig) {
        return None;
    }
    let intersection = a.sig.intersection(&b.sig);
    let covered = defs.iter().any(|m| {
        !std::ptr::eq(m.as_ref(), b)
            && m.is_more_specific_than(a)
            && m.is_more_specific_than(b)
            && intersection.is_subtype_of_signature(&m.sig)
    });
    if covered {
        return None;
    }
    Some(AmbiguityWarning {
        name: name.to_string(),
        new_sig: a.sig.clone(),
        existing_sig: b.sig.clone(),
        intersection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{JuliaType, Signature};

    fn entry(types: Vec<JuliaType>) -> MethodEntry {
        MethodEntry::new(Signature::new(types), vec![], Box::new(|_, _| unreachable!()))
    }

    #[test]
    fn more_specific_sorts_first() {
        let mut list = MethodList::new();
        list.insert("f", entry(vec![JuliaType::Real, JuliaType::Real]));
        list.insert("f", entry(vec![JuliaType::Int64, JuliaType::Int64]));
        assert_eq!(list.get(0).unwrap().sig, Signature::new(vec![JuliaType::Int64, JuliaType::Int64]));
        assert_eq!(list.get(1).unwrap().sig, Signature::new(vec![JuliaType::Real, JuliaType::Real]));
    }

    #[test]
    fn redefinition_overwrites_in_place() {
        let mut list = MethodList::new();
        list.insert("f", entry(vec![JuliaType::Int64, JuliaType::Int64]));
        assert_eq!(list.len(), 1);
        list.insert("f", entry(vec![JuliaType::Int64, JuliaType::Int64]));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn ambiguous_pair_still_both_inserted() {
        AmbiguityCollector::enable();
        AmbiguityCollector::clear();
        let mut list = MethodList::new();
        list.insert("f", entry(vec![JuliaType::Any, JuliaType::Int64]));
        list.insert("f", entry(vec![JuliaType::Int64, JuliaType::Any]));
        assert_eq!(list.len(), 2);
        assert_eq!(AmbiguityCollector::count(), 1);
        AmbiguityCollector::disable();
    }

    #[test]
    fn ambiguity_suppressed_when_intersection_already_covered() {
        // f(Any, Int64) and f(Int64, Any) would tie at (Int64, Int64), but
        // f(Int64, Int64) is already defined and more specific than both, so
        // any call in that intersection resolves there, not ambiguously.
        AmbiguityCollector::enable();
        AmbiguityCollector::clear();
        let mut list = MethodList::new();
        list.insert("f", entry(vec![JuliaType::Int64, JuliaType::Int64]));
        list.insert("f", entry(vec![JuliaType::Any, JuliaType::Int64]));
        list.insert("f", entry(vec![JuliaType::Int64, JuliaType::Any]));
        assert_eq!(list.len(), 3);
        assert_eq!(AmbiguityCollector::count(), 0);
        AmbiguityCollector::disable();
    }
}
