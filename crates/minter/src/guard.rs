//! Non-reentrant entry guard.

use crate::error::MinterError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Rejects nested entry into state-mutating operations.
///
/// A call holds the guard from entry until the returned [`Entered`] token is
/// dropped, which covers every exit path including early returns through `?`.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: AtomicBool,
}

impl ReentrancyGuard {
    /// Creates an unlocked guard.
    pub const fn new() -> Self {
        Self { entered: AtomicBool::new(false) }
    }

    /// Enters the guarded section, failing if it is already held.
    pub fn enter(&self) -> Result<Entered<'_>, MinterError> {
        if self.entered.swap(true, Ordering::AcqRel) {
            tracing::warn!(target: "allowlist_minter", "reentrant call rejected");
            return Err(MinterError::Reentrancy);
        }
        Ok(Entered { guard: self })
    }

    /// Returns true while a guarded call is running.
    pub fn is_entered(&self) -> bool {
        self.entered.load(Ordering::Acquire)
    }
}

/// Proof of holding a [`ReentrancyGuard`]; releases it on drop.
#[derive(Debug)]
#[must_use = "the guard is released as soon as this is dropped"]
pub struct Entered<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.guard.entered.store(false, Ordering::Release);
    }
}
