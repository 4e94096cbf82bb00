//! The method cache.

pub mod entry;
pub mod match_predicate;
pub mod tiered;

pub use entry::CacheEntry;
pub use match_predicate::{cache_match, cache_match_by_type, SENTINEL_TVAR};
pub use tiered::MethodCache;
