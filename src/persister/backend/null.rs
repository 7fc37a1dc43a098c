//! The "publisher into nowhere" backend: no I/O, counter only.

use crate::persister::entry::Entry;
use crate::persister::error::PersisterError;
use crate::persister::idx_ts::IdxTs;
use crate::utils::now_us;

use super::Backend;

/// Records nothing but a running count and the last assigned `IdxTs`.
/// Useful for tests and for callers who want the publish/scan protocol
/// without durability.
#[derive(Debug, Default)]
pub struct NullBackend {
    last: IdxTs,
}

impl NullBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Entry> Backend<E> for NullBackend {
    fn replay(
        &mut self,
        _push: &mut dyn FnMut(IdxTs, E) -> Result<(), PersisterError>,
    ) -> Result<(), PersisterError> {
        Ok(())
    }

    fn publish(&mut self, _entry: &E) -> Result<IdxTs, PersisterError> {
        let us = now_us();
        if self.last.index > 0 && us <= self.last.us {
            return Err(PersisterError::InconsistentTimestamp {
                last_us: self.last.us,
                new_us: us,
            });
        }
        self.last = IdxTs::new(self.last.index + 1, us);
        Ok(self.last)
    }

    fn publish_replayed(&mut self, _entry: &E, idx_ts: IdxTs) -> Result<(), PersisterError> {
        if idx_ts.index != self.last.index + 1 {
            return Err(PersisterError::InconsistentIndex {
                expected: self.last.index + 1,
                actual: idx_ts.index,
            });
        }
        self.last = idx_ts;
        Ok(())
    }
}
