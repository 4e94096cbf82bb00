//! Ambiguity reporting raised by method-list insertion.
//!
//! Grounded on `compile::diagnostics::DiagnosticsCollector` in the codebase
//! this crate is extracted from: a `thread_local!`-backed collector with
//! `enable`/`disable`/`is_enabled`/`emit`/`take`/`clear`, disabled by default
//! to avoid noisy output. Library code in that codebase denies
//! `clippy::print_stderr`, so warnings are collected here rather than written
//! directly to stderr; `AmbiguityCollector::enable_stderr()` opts a process
//! into the original's unconditional print-on-definition behavior.

use crate::types::Signature;
use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityWarning {
    pub name: String,
    pub new_sig: Signature,
    pub existing_sig: Signature,
    pub intersection: Signature,
}

impl fmt::Display for AmbiguityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning: New definition {name}{new} is ambiguous with {name}{existing}.\n  Make sure {name}{inter} is defined first.",
            name = self.name,
            new = self.new_sig,
            existing = self.existing_sig,
            inter = self.intersection,
        )
    }
}

thread_local! {
    static ENABLED: RefCell<bool> = const { RefCell::new(false) };
    static STDERR_ON_EMIT: RefCell<bool> = const { RefCell::new(false) };
    static WARNINGS: RefCell<Vec<AmbiguityWarning>> = const { RefCell::new(Vec::new()) };
}

/// Thread-local sink for [`AmbiguityWarning`]s raised during `add_method`.
#[derive(Debug)]
pub struct AmbiguityCollector;

impl AmbiguityCollector {
    pub fn enable() {
        ENABLED.with(|e| *e.borrow_mut() = true);
    }

    pub fn disable() {
        ENABLED.with(|e| *e.borrow_mut() = false);
    }

    pub fn is_enabled() -> bool {
        ENABLED.with(|e| *e.borrow())
    }

    /// Opt this thread into the original's unconditional stderr behavior, in
    /// addition to collection. Isolated in its own narrowly-scoped allow,
    /// mirroring the targeted-allow idiom the grounded codebase uses for an
    /// isolated, justified exception to a crate-wide lint.
    #[allow(clippy::print_stderr)]
    pub fn enable_stderr() {
        STDERR_ON_EMIT.with(|s| *s.borrow_mut() = true);
        Self::enable();
    }

    pub fn emit(warning: AmbiguityWarning) {
        if !Self::is_enabled() {
            return;
        }
        let print = STDERR_ON_EMIT.with(|s| *s.borrow());
        if print {
            Self::print_to_stderr(&warning);
        }
        WARNINGS.with(|w| w.borrow_mut().push(warning));
    }

    #[allow(clippy::print_stderr)]
    fn print_to_stderr(warning: &AmbiguityWarning) {
        eprintln!("{warning}");
    }

    /// Drain and return all collected warnings.
    pub fn take() -> Vec<AmbiguityWarning> {
        WARNINGS.with(|w| std::mem::take(&mut *w.borrow_mut()))
    }

    pub fn clear() {
        WARNINGS.with(|w| w.borrow_mut().clear());
    }

    pub fn count() -> usize {
        WARNINGS.with(|w| w.borrow().len())
    }
}
