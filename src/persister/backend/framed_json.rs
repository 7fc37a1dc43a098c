//! Framed-JSON backend: richer per-line headers than the legacy format.
//!
//! On-disk format, one record per line (spec.md §6):
//! `<json-IdxTs>\t<json-entry>\n`, where `json-IdxTs` is
//! `{"index":N,"us":T}`.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::persister::entry::Entry;
use crate::persister::error::PersisterError;
use crate::persister::idx_ts::IdxTs;
use crate::utils::now_us;

use super::{Backend, read_strict_lines};

/// Appends `json(IdxTs)\tjson(entry)\n` lines to a plain file.
pub struct FramedJsonBackend {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    last: IdxTs,
}

impl FramedJsonBackend {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: None,
            last: IdxTs::ZERO,
        }
    }

    fn appender(&mut self) -> &mut BufWriter<File> {
        self.writer
            .as_mut()
            .expect("replay must run before any publish")
    }

    fn validate_advance(&self, idx_ts: IdxTs) -> Result<(), PersisterError> {
        if idx_ts.index != self.last.index + 1 {
            return Err(PersisterError::InconsistentIndex {
                expected: self.last.index + 1,
                actual: idx_ts.index,
            });
        }
        if self.last.index > 0 && idx_ts.us <= self.last.us {
            return Err(PersisterError::InconsistentTimestamp {
                last_us: self.last.us,
                new_us: idx_ts.us,
            });
        }
        Ok(())
    }
}

impl<E: Entry> Backend<E> for FramedJsonBackend {
    fn replay(
        &mut self,
        push: &mut dyn FnMut(IdxTs, E) -> Result<(), PersisterError>,
    ) -> Result<(), PersisterError> {
        for line in read_strict_lines(&self.path)? {
            let tab_pos = line
                .find('\t')
                .ok_or_else(|| PersisterError::MalformedEntry { line: line.clone() })?;
            let header = &line[..tab_pos];
            let body = &line[tab_pos + 1..];
            let idx_ts: IdxTs = serde_json::from_str(header)
                .map_err(|_| PersisterError::MalformedEntry { line: line.clone() })?;
            self.validate_advance(idx_ts)?;
            let entry: E = serde_json::from_str(body)?;
            push(idx_ts, entry)?;
            self.last = idx_ts;
        }
        debug!(path = %self.path.display(), last_index = self.last.index, "framed json replay complete");

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    fn publish(&mut self, entry: &E) -> Result<IdxTs, PersisterError> {
        let us = now_us();
        if self.last.index > 0 && us <= self.last.us {
            return Err(PersisterError::InconsistentTimestamp {
                last_us: self.last.us,
                new_us: us,
            });
        }
        let idx_ts = IdxTs::new(self.last.index + 1, us);
        let header = serde_json::to_string(&idx_ts)?;
        let body = serde_json::to_string(entry)?;
        let writer = self.appender();
        writeln!(writer, "{header}\t{body}")?;
        writer.flush()?;
        self.last = idx_ts;
        Ok(idx_ts)
    }

    fn publish_replayed(&mut self, entry: &E, idx_ts: IdxTs) -> Result<(), PersisterError> {
        self.validate_advance(idx_ts)?;
        let header = serde_json::to_string(&idx_ts)?;
        let body = serde_json::to_string(entry)?;
        let writer = self.appender();
        writeln!(writer, "{header}\t{body}")?;
        writer.flush()?;
        self.last = idx_ts;
        Ok(())
    }
}
