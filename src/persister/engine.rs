//! The publication engine: `Persister<B, E>` itself.

use crate::persister::backend::Backend;
use crate::persister::container::Container;
use crate::persister::entry::Entry;
use crate::persister::error::PersisterError;
use crate::persister::idx_ts::IdxTs;
use crate::persister::lock::ThreeStageLock;
use crate::persister::notify::TerminateSignal;
use crate::persister::scan::{ScanSink, run_scan};

/// An in-process, append-only event log over entries of type `E`, backed
/// by `B`.
///
/// Construction replays `B`'s on-disk state (if any) into the in-memory
/// container; from then on every `publish*` call durably appends to `B`
/// and commits to the container under the same lock before any scanner can
/// observe it (I3). The type is `Send + Sync` whenever `B` and `E` are, so
/// callers typically share it behind an `Arc` across publisher and
/// scanner threads.
pub struct Persister<B, E: Entry> {
    lock: ThreeStageLock<B, E>,
}

impl<B: Backend<E>, E: Entry> Persister<B, E> {
    /// Construct a persister over `backend`, replaying any existing state.
    ///
    /// # Errors
    ///
    /// Propagates whatever [`Backend::replay`] returns; the backend's
    /// on-disk state is left untouched on failure.
    pub fn new(mut backend: B) -> Result<Self, PersisterError> {
        let mut container = Container::new();
        let mut push = |idx_ts: IdxTs, entry: E| -> Result<(), PersisterError> {
            container.push(idx_ts, entry);
            Ok(())
        };
        backend.replay(&mut push)?;
        Ok(Self {
            lock: ThreeStageLock::new(backend, container),
        })
    }

    /// Number of records currently committed.
    ///
    /// # Errors
    ///
    /// Returns [`PersisterError::MutexPoisoned`] if a prior publish or
    /// scan panicked while holding the lock.
    pub fn size(&self) -> Result<u64, PersisterError> {
        self.lock.size()
    }

    /// Publish `entry`, returning its assigned `IdxTs`.
    ///
    /// # Errors
    ///
    /// Returns [`PersisterError::InconsistentTimestamp`] if the clock
    /// regressed since the last publish, or an I/O error from the backend.
    /// On failure, nothing is committed and no scanner is woken.
    pub fn publish(&self, entry: &E) -> Result<IdxTs, PersisterError> {
        self.lock
            .publish_with(|backend| backend.publish(entry).map(|idx_ts| (idx_ts, entry.clone())))
    }

    /// Publish a concrete variant `V` of a polymorphic entry type, cloning
    /// it into an owned `E` before committing — the Rust equivalent of the
    /// original's "deep copy, keep the most-derived type" requirement (see
    /// `src/persister/entry.rs`).
    ///
    /// # Errors
    ///
    /// Same as [`publish`](Self::publish).
    pub fn publish_derived<V>(&self, variant: &V) -> Result<IdxTs, PersisterError>
    where
        V: Clone,
        E: From<V>,
    {
        let owned = E::from(variant.clone());
        self.publish(&owned)
    }

    /// Construct an entry in place via `build`, then publish it.
    ///
    /// This is the idiomatic Rust stand-in for the original's variadic
    /// `emplace(args...)`: there is no variadic-constructor analog in
    /// Rust, so callers supply the construction as a closure instead.
    ///
    /// # Errors
    ///
    /// Same as [`publish`](Self::publish).
    pub fn emplace(&self, build: impl FnOnce() -> E) -> Result<IdxTs, PersisterError> {
        let entry = build();
        self.publish(&entry)
    }

    /// Publish `entry` under an externally-assigned `idx_ts`, bypassing
    /// the clock. Used by upstream replicators that must preserve
    /// identifiers assigned elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`PersisterError::InconsistentIndex`] or
    /// [`PersisterError::InconsistentTimestamp`] if `idx_ts` does not
    /// extend the log's current tail.
    pub fn publish_replayed(&self, entry: &E, idx_ts: IdxTs) -> Result<(), PersisterError> {
        self.lock.publish_with(|backend| {
            backend.publish_replayed(entry, idx_ts)?;
            Ok((idx_ts, entry.clone()))
        })?;
        Ok(())
    }

    /// Drive one subscriber's replay-then-follow scan to completion, on
    /// the calling thread. See [`ScanSink`] and spec.md §4.6 for the state
    /// machine this implements.
    ///
    /// # Errors
    ///
    /// Returns [`PersisterError::MutexPoisoned`] if a prior operation
    /// panicked while holding the lock; sink errors are the sink's own
    /// responsibility and are not represented here (spec.md §7).
    pub fn scan<S: ScanSink<E> + ?Sized>(
        &self,
        terminate: &TerminateSignal,
        sink: &mut S,
    ) -> Result<(), PersisterError> {
        run_scan(&self.lock, terminate, sink)
    }
}
