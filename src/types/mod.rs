//! The type lattice consumed by the dispatch engine: `JuliaType` (the type
//! term), `TypeParam` (bounded static parameters), `Signature` (a tuple of
//! type terms), and the UID registry used as the cache's primary key.

pub mod julia_type;
pub mod signature;
pub mod type_param;
pub mod uid;

pub use julia_type::JuliaType;
pub use signature::Signature;
pub use type_param::TypeParam;
pub use uid::Uid;
