//! The per-subscriber replay-then-follow state machine.

use tracing::trace;

use crate::persister::backend::Backend;
use crate::persister::entry::Entry;
use crate::persister::error::PersisterError;
use crate::persister::idx_ts::IdxTs;
use crate::persister::lock::{ThreeStageLock, WaitOutcome};
use crate::persister::notify::TerminateSignal;

/// The capability a scanner drives [`crate::Persister::scan`] with.
///
/// Only [`on_entry`](Self::on_entry) is required; the other two have
/// sensible defaults (never caring about the replay/live boundary, and
/// stopping immediately on the first termination request).
pub trait ScanSink<E: Entry> {
    /// Called once per record, in index order. Returning `false` stops the
    /// scan immediately, without a further `on_terminate` call.
    fn on_entry(&mut self, record: (IdxTs, &E), last_idx_ts: IdxTs) -> bool;

    /// Called exactly once: right before the first record that did not
    /// exist when this scan started, or immediately if the log was empty
    /// at that point.
    fn on_replay_done(&mut self) {}

    /// Called at most once, the first time the scan observes its
    /// terminate signal raised. Returning `true` (the default) stops the
    /// scan; returning `false` lets it keep delivering any backlog.
    fn on_terminate(&mut self) -> bool {
        true
    }
}

/// Drive one subscriber's scan of the log to completion (or until its
/// sink or terminate signal stops it). Runs in the calling thread.
pub(crate) fn run_scan<B, E, S>(
    lock: &ThreeStageLock<B, E>,
    terminate: &TerminateSignal,
    sink: &mut S,
) -> Result<(), PersisterError>
where
    B: Backend<E>,
    E: Entry,
    S: ScanSink<E> + ?Sized,
{
    let size_at_start = lock.size()?;
    let mut cursor: u64 = 0;
    let mut replay_done = false;
    let mut terminate_notified = false;

    if size_at_start == 0 {
        sink.on_replay_done();
        replay_done = true;
    }

    loop {
        if terminate.is_raised() && !terminate_notified {
            terminate_notified = true;
            if !replay_done {
                sink.on_replay_done();
                replay_done = true;
            }
            if sink.on_terminate() {
                trace!("scan stopped: sink acknowledged termination");
                return Ok(());
            }
        }

        match lock.get(cursor + 1)? {
            Some(record) => {
                let last_idx_ts = lock.last_idx_ts()?;
                let keep_going = sink.on_entry((record.idx_ts, &record.entry), last_idx_ts);
                cursor = record.idx_ts.index;

                if !replay_done && cursor >= size_at_start + 1 {
                    sink.on_replay_done();
                    replay_done = true;
                }

                if !keep_going {
                    return Ok(());
                }
            }
            None => {
                let outcome = lock.wait_for_data(cursor + 1, terminate)?;
                if matches!(outcome, WaitOutcome::Terminated) && !terminate_notified {
                    terminate_notified = true;
                    if !replay_done {
                        sink.on_replay_done();
                        replay_done = true;
                    }
                    if sink.on_terminate() {
                        return Ok(());
                    }
                }
            }
        }
    }
}
