//! Rollback selectors.

use crate::error::FailureKind;

/// Decides what a unit of work does with its transaction when the body fails.
///
/// `always()` rolls back on any failure. `only(kinds)` rolls back when the
/// failure's kind is listed and commits the work done so far otherwise.
/// Either way the failure itself is returned to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RollbackPolicy {
    selector: Option<&'static [FailureKind]>,
}

impl RollbackPolicy {
    /// Roll back on every failure.
    pub const fn always() -> Self {
        Self { selector: None }
    }

    /// Roll back only on the listed kinds.
    pub const fn only(kinds: &'static [FailureKind]) -> Self {
        Self {
            selector: Some(kinds),
        }
    }

    pub fn selector(&self) -> Option<&'static [FailureKind]> {
        self.selector
    }

    /// Whether a failure of `kind` rolls the transaction back.
    pub fn rolls_back(&self, kind: FailureKind) -> bool {
        match self.selector {
            None => true,
            Some(kinds) => kinds.contains(&kind),
        }
    }
}
