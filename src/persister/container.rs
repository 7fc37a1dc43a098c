//! The in-memory, append-only sequence backing low-latency reads.
//!
//! The original source used a `std::forward_list<>` specifically because
//! appending to it never invalidates existing iterators or references — a
//! `std::vector`-like structure that reallocates on growth would not do.
//! This module reproduces that guarantee with a segmented layout: records
//! are grouped into fixed-capacity chunks, and a chunk's backing `Vec` is
//! never grown past its reserved capacity, so an already-placed record
//! never moves once inserted. Handing scanners an [`Arc`] clone of a record
//! (rather than a raw reference) lets a cursor hold on to it across an
//! unlocked region with no lifetime games and no `unsafe`.

use std::sync::Arc;

use crate::persister::entry::Entry;
use crate::persister::idx_ts::IdxTs;

/// Records per chunk. Chosen so a freshly-created log doesn't allocate a
/// huge first chunk, while steady-state logs amortize allocation well.
const CHUNK_LEN: usize = 1024;

/// One stored record: its assigned `IdxTs` paired with the entry.
#[derive(Debug)]
pub struct LogRecord<E: Entry> {
    pub idx_ts: IdxTs,
    pub entry: E,
}

struct Chunk<E: Entry> {
    records: Vec<Arc<LogRecord<E>>>,
}

impl<E: Entry> Chunk<E> {
    fn new() -> Self {
        Self {
            records: Vec::with_capacity(CHUNK_LEN),
        }
    }
}

/// The append-only container. Not `Sync` on its own — callers serialize
/// access through the persister's three-stage lock (see `lock.rs`); this
/// type only implements the data structure itself.
pub struct Container<E: Entry> {
    chunks: Vec<Chunk<E>>,
    len: u64,
    last: IdxTs,
}

impl<E: Entry> Container<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            len: 0,
            last: IdxTs::ZERO,
        }
    }

    /// Number of records currently stored.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `IdxTs` of the tail record, or `IdxTs::ZERO` if empty.
    #[must_use]
    pub fn last_idx_ts(&self) -> IdxTs {
        self.last
    }

    /// Append a record to the tail. Never reallocates an existing chunk.
    pub fn push(&mut self, idx_ts: IdxTs, entry: E) {
        if self.chunks.is_empty() || self.chunks.last().unwrap().records.len() == CHUNK_LEN {
            self.chunks.push(Chunk::new());
        }
        let record = Arc::new(LogRecord { idx_ts, entry });
        self.chunks.last_mut().unwrap().records.push(record);
        self.len += 1;
        self.last = idx_ts;
    }

    /// Fetch the record at 1-based `index`, if it exists.
    ///
    /// Returns an owned [`Arc`] handle so callers can hold it across an
    /// unlocked region (I4: the handle is never invalidated by later
    /// pushes).
    #[must_use]
    pub fn get(&self, index: u64) -> Option<Arc<LogRecord<E>>> {
        if index == 0 || index > self.len {
            return None;
        }
        let zero_based = (index - 1) as usize;
        let chunk_idx = zero_based / CHUNK_LEN;
        let within = zero_based % CHUNK_LEN;
        self.chunks.get(chunk_idx)?.records.get(within).cloned()
    }
}

impl<E: Entry> Default for Container<E> {
    fn default() -> Self {
        Self::new()
    }
}
