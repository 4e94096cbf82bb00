//! One record in a cache chain.

use crate::method::MethodEntry;
use crate::types::JuliaType;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum CacheEntry {
    /// A shadow entry: matching it means "miss, fall through to the full
    /// search" rather than "call this method".
    Dummy { sig: Vec<JuliaType> },
    Real {
        sig: Vec<JuliaType>,
        method: Rc<MethodEntry>,
        sparams: HashMap<String, JuliaType>,
    },
}

impl CacheEntry {
    pub fn sig(&self) -> &[JuliaType] {
        match self {
            CacheEntry::Dummy { sig } | CacheEntry::Real { sig, .. } => sig,
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self, CacheEntry::Dummy { .. })
    }
}
