//! One method definition `M`: a signature, its static parameters, the body
//! callable, its specialization bookkeeping, and a lazily-created private
//! sub-table for `invoke`-style dispatch.

use crate::error::DispatchError;
use crate::method::lambda::LambdaInfo;
use crate::table::MethodTable;
use crate::types::{JuliaType, Signature, TypeParam};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// The method body: an opaque callable carrying its own static-parameter
/// environment. Code generation is out of scope, so the body is simply
/// invoked directly, with the bound static parameters (`T ↦ Int64`, etc.)
/// passed alongside the arguments rather than compiled into a specialized
/// instruction stream.
pub type MethodBody =
    Box<dyn Fn(&[Value], &HashMap<String, JuliaType>) -> Result<Value, DispatchError> + Send + Sync>;

pub struct MethodEntry {
    pub sig: Signature,
    pub tvars: Vec<TypeParam>,
    pub body: MethodBody,
    pub lambda: LambdaInfo,
    /// Lazily-created private sub-table pre-seeded with this entry itself.
    /// `RefCell` because `invoke` populates it on first use through a shared
    /// `&MethodEntry`.
    pub invokes: RefCell<Option<Box<MethodTable>>>,
}

impl MethodEntry {
    pub fn new(sig: Signature, tvars: Vec<TypeParam>, body: MethodBody) -> Self {
        MethodEntry {
            sig,
            tvars,
            body,
            lambda: LambdaInfo::new(),
            invokes: RefCell::new(None),
        }
    }

    pub fn is_vararg(&self) -> bool {
        self.sig.is_vararg()
    }

    /// `morespecific(self.sig, other.sig)` with each side's `tvars`.
    pub fn is_more_specific_than(&self, other: &MethodEntry) -> bool {
        self.sig
            .morespecific_with_tvars(&self.tvars, &other.sig, &other.tvars)
    }

    /// Structural signature equality, used by insertion to detect
    /// redefinition of the same method.
    pub fn same_signature(&self, other: &MethodEntry) -> bool {
        self.sig == other.sig
    }
}

impl fmt::Debug for MethodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodEntry")
            .field("sig", &self.sig)
            .field("tvars", &self.tvars)
            .field("specializations", &self.lambda.specialization_count())
            .finish()
    }
}
