//! Collaborator traits standing in for the opaque type-inference pass and
//! compilation trampoline. The original threads a process-global
//! `jl_in_inference` flag and calls a fixed `jl_typeinf_func`; this crate
//! instead takes `&dyn TypeInference` and `&dyn CompileTrampoline` as
//! explicit collaborators, so global mutable state becomes a context object
//! threaded through dispatch.

use crate::error::InferenceFailure;
use crate::method::lambda::LambdaInfo;
use crate::method::MethodEntry;
use crate::types::Signature;

/// Invoked once per freshly specialized lambda. An embedder with a real
/// type-inference pass implements this to annotate `lambda` in place; this
/// crate does not interpret the result.
pub trait TypeInference {
    fn infer(
        &self,
        lambda: &LambdaInfo,
        arg_types: &Signature,
        origin: &MethodEntry,
    ) -> Result<(), InferenceFailure>;
}

/// Invoked to compile a specialized lambda to a callable. Code generation,
/// trampolines, and JIT compilation are out of scope here, so this is
/// invoked as an opaque operation.
pub trait CompileTrampoline {
    fn compile(&self, lambda: &LambdaInfo) -> Result<(), InferenceFailure>;
}

/// Default used when no inference pass is mounted: always succeeds
/// immediately, since the absence of a real inference pass should not block
/// dispatch.
#[derive(Debug, Default)]
pub struct NoopInference;

impl TypeInference for NoopInference {
    fn infer(&self, _lambda: &LambdaInfo, _arg_types: &Signature, _origin: &MethodEntry) -> Result<(), InferenceFailure> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NoopCompile;

impl CompileTrampoline for NoopCompile {
    fn compile(&self, _lambda: &LambdaInfo) -> Result<(), InferenceFailure> {
        Ok(())
    }
}
