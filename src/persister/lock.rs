//! The three-stage admission/commit/notify lock.
//!
//! The original source modeled this as three independent bare mutexes
//! (`stage1_`/`stage2_`/`stage3_`) with a hand-rolled type-state guard that
//! advanced a publisher through them one at a time, releasing each stage as
//! soon as the next was acquired. Two of those stages (container-read and
//! notify) ended up sharing one mutex in the original's actual read path,
//! which — as spec.md §9 itself notes — is an implementation detail, not an
//! externally observable guarantee: "An implementer may equivalently use a
//! single mutex guarding all three phases plus a separate condition
//! variable; the externally visible guarantees are identical." This module
//! takes that option: one [`Mutex`] guards backend admission *and*
//! container commit together (so a scanner's `size()`/`get()` read can
//! never observe a torn write), and a [`Condvar`] on the same mutex serves
//! as the notify stage. The three named stages still exist conceptually —
//! admission, commit, notify happen in that order within one critical
//! section — they're just collapsed into a single lock here, which is
//! simpler and provably race-free in safe Rust.

use std::sync::{Mutex, MutexGuard, Condvar};
use std::time::Duration;

use crate::persister::backend::Backend;
use crate::persister::container::{Container, LogRecord};
use crate::persister::entry::Entry;
use crate::persister::error::PersisterError;
use crate::persister::idx_ts::IdxTs;
use crate::persister::notify::TerminateSignal;
use std::sync::Arc;

/// How long a scanner blocks between re-checks of the terminate signal
/// while waiting at the tail. New data wakes a waiter immediately via the
/// condvar; this bound only governs how quickly a *termination* request
/// (raised on a signal this lock doesn't own) is noticed.
const TERMINATE_POLL_INTERVAL: Duration = Duration::from_millis(20);

struct Shared<B, E: Entry> {
    backend: B,
    container: Container<E>,
}

/// Owns the backend and the container behind one admission/commit lock,
/// plus the condvar subscribers wait on for "new data".
pub(crate) struct ThreeStageLock<B, E: Entry> {
    state: Mutex<Shared<B, E>>,
    condvar: Condvar,
}

/// Outcome of a bounded wait at the tail of the log.
pub(crate) enum WaitOutcome {
    /// More data is now available (or was already, spuriously woken).
    DataAvailable,
    /// The caller's terminate signal was raised.
    Terminated,
    /// Neither happened within this poll tick; caller should check again.
    TimedOut,
}

impl<B: Backend<E>, E: Entry> ThreeStageLock<B, E> {
    pub(crate) fn new(backend: B, container: Container<E>) -> Self {
        Self {
            state: Mutex::new(Shared { backend, container }),
            condvar: Condvar::new(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Shared<B, E>>, PersisterError> {
        self.state.lock().map_err(|_| PersisterError::MutexPoisoned)
    }

    /// Stage 1 (admission) + stage 2 (commit) + stage 3 (notify), run
    /// end-to-end under one critical section. `admit` performs the backend
    /// write and returns the `(IdxTs, Entry)` pair to commit; if `admit`
    /// fails, nothing is committed and nothing is notified.
    pub(crate) fn publish_with<F>(&self, admit: F) -> Result<IdxTs, PersisterError>
    where
        F: FnOnce(&mut B) -> Result<(IdxTs, E), PersisterError>,
    {
        let mut guard = self.lock()?;
        let (idx_ts, entry) = admit(&mut guard.backend)?;
        guard.container.push(idx_ts, entry);
        drop(guard);
        self.condvar.notify_all();
        Ok(idx_ts)
    }

    pub(crate) fn size(&self) -> Result<u64, PersisterError> {
        Ok(self.lock()?.container.len())
    }

    pub(crate) fn last_idx_ts(&self) -> Result<IdxTs, PersisterError> {
        Ok(self.lock()?.container.last_idx_ts())
    }

    pub(crate) fn get(&self, index: u64) -> Result<Option<Arc<LogRecord<E>>>, PersisterError> {
        Ok(self.lock()?.container.get(index))
    }

    /// Block until either the container holds at least `want_index`
    /// records or `terminate` is raised, whichever comes first.
    pub(crate) fn wait_for_data(
        &self,
        want_index: u64,
        terminate: &TerminateSignal,
    ) -> Result<WaitOutcome, PersisterError> {
        if terminate.is_raised() {
            return Ok(WaitOutcome::Terminated);
        }
        let guard = self.lock()?;
        if guard.container.len() >= want_index {
            return Ok(WaitOutcome::DataAvailable);
        }
        let (guard, _) = self
            .condvar
            .wait_timeout(guard, TERMINATE_POLL_INTERVAL)
            .map_err(|_| PersisterError::MutexPoisoned)?;
        if guard.container.len() >= want_index {
            return Ok(WaitOutcome::DataAvailable);
        }
        drop(guard);
        if terminate.is_raised() {
            Ok(WaitOutcome::Terminated)
        } else {
            Ok(WaitOutcome::TimedOut)
        }
    }
}
