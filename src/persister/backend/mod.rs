//! Pluggable append sinks behind the persister.
//!
//! Grounded on `sequencer/journal.rs`'s `Journal<T>` trait
//! (`append`/`read_from`/`last_sequence`): this trait keeps the same
//! "the implementation owns durability, the caller owns ordering" split,
//! reshaped to the three operations spec.md §4.2 requires.

mod framed_json;
mod legacy_text;
mod null;

pub use framed_json::FramedJsonBackend;
pub use legacy_text::LegacyTextBackend;
pub use null::NullBackend;

use crate::persister::entry::Entry;
use crate::persister::error::PersisterError;
use crate::persister::idx_ts::IdxTs;

/// A pluggable, append-only store behind the persister.
///
/// `replay` is called exactly once, by the persister's constructor, before
/// any `publish`/`publish_replayed` call. Implementations do not need to
/// guard against being replayed twice — the persister enforces the
/// call-once contract.
pub trait Backend<E: Entry>: Send {
    /// Replay every previously-persisted record, in order, invoking `push`
    /// for each. Put the backend into "appending" mode once done.
    ///
    /// # Errors
    ///
    /// Returns [`PersisterError::MalformedEntry`],
    /// [`PersisterError::InconsistentIndex`], or
    /// [`PersisterError::InconsistentTimestamp`] if the on-disk log is
    /// corrupt, and propagates whatever `push` itself returns.
    fn replay(
        &mut self,
        push: &mut dyn FnMut(IdxTs, E) -> Result<(), PersisterError>,
    ) -> Result<(), PersisterError>;

    /// Durably append `entry`, assigning it the next `IdxTs`.
    ///
    /// # Errors
    ///
    /// Returns [`PersisterError::InconsistentTimestamp`] if the clock
    /// regressed, or an I/O error from the underlying write.
    fn publish(&mut self, entry: &E) -> Result<IdxTs, PersisterError>;

    /// Durably append `entry` under an externally-assigned `idx_ts`,
    /// bypassing the clock.
    ///
    /// # Errors
    ///
    /// Returns [`PersisterError::InconsistentIndex`] or
    /// [`PersisterError::InconsistentTimestamp`] if `idx_ts` does not
    /// extend the backend's current tail.
    fn publish_replayed(&mut self, entry: &E, idx_ts: IdxTs) -> Result<(), PersisterError>;
}

/// Read a file's full contents, enforcing that it ends in a newline (or is
/// empty), and split it into lines.
///
/// Both file-backed backends reject a truncated trailing line — one with
/// no terminating `\n` — as [`PersisterError::MalformedEntry`], per
/// spec.md §6: "crash-truncated partial lines be detectable by the
/// parser."
fn read_strict_lines(path: &std::path::Path) -> Result<Vec<String>, PersisterError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if contents.is_empty() {
        return Ok(Vec::new());
    }
    if !contents.ends_with('\n') {
        let last_line = contents.rsplit('\n').next().unwrap_or(&contents);
        return Err(PersisterError::MalformedEntry {
            line: last_line.to_string(),
        });
    }
    Ok(contents.lines().map(str::to_string).collect())
}
