//! Method definitions: signatures, static parameters, the specialization
//! list per method, and the specificity-sorted method list.

pub mod entry;
pub mod lambda;
pub mod list;

pub use entry::{MethodBody, MethodEntry};
pub use lambda::{LambdaInfo, Specialization};
pub use list::MethodList;
