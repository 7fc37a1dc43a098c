//! Cooperative cancellation for scanners.
//!
//! In the original source this was a named, process-wide singleton
//! (`current::WaitableTerminateSignal`) that scanners registered with while
//! waiting, so a publisher's notify and an operator's termination request
//! could wake the same condition variable. Per spec.md §9's design note,
//! the shared-scope decision is the caller's concern in a re-implementation:
//! here `TerminateSignal` is an ordinary, cheaply-`Clone`-able value a
//! caller creates once and passes to every [`crate::scan`] call it wants to
//! cancel together. Many scanners may hold the same signal (many-to-many);
//! raising it is a single atomic store observed by all of them at their
//! next wait tick or cursor advance.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cooperative, many-to-many cancellation flag.
///
/// Cloning a `TerminateSignal` shares the same underlying flag (it is an
/// `Arc<AtomicBool>` under the hood); raising any clone raises all of them.
#[derive(Debug, Clone, Default)]
pub struct TerminateSignal {
    raised: Arc<AtomicBool>,
}

impl TerminateSignal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            raised: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request that every scanner holding this signal stop at its next
    /// opportunity.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Whether [`raise`](Self::raise) has been called.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}
