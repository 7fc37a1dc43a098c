//! Tab-separated legacy text backend.
//!
//! On-disk format, one record per line (spec.md §6):
//! `<decimal-index>\t<decimal-us>\t<json-entry>\n`

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::persister::entry::Entry;
use crate::persister::error::PersisterError;
use crate::persister::idx_ts::IdxTs;
use crate::utils::now_us;

use super::{Backend, read_strict_lines};

/// Appends `index\tus\tjson\n` lines to a plain file.
pub struct LegacyTextBackend {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    last: IdxTs,
}

impl LegacyTextBackend {
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
}

impl<E: Entry> Backend<E> for LegacyTextBackend {
    fn replay(
        &mut self,
        push: &mut dyn FnMut(IdxTs, E) -> Result<(), PersisterError>,
    ) -> Result<(), PersisterError> {
        for line in read_strict_lines(&self.path)? {
            let mut parts = line.splitn(3, '\t');
            let (Some(idx_str), Some(us_str), Some(json)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(PersisterError::MalformedEntry { line });
            };
            let index: u64 = idx_str
                .parse()
                .map_err(|_| PersisterError::MalformedEntry { line: line.clone() })?;
            let us: i64 = us_str
                .parse()
                .map_err(|_| PersisterError::MalformedEntry { line: line.clone() })?;
            if index != self.last.index + 1 {
                warn!(expected = self.last.index + 1, actual = index, "legacy text replay: index gap");
                return Err(PersisterError::InconsistentIndex {
                    expected: self.last.index + 1,
                    actual: index,
                });
            }
            if self.last.index > 0 && us <= self.last.us {
                return Err(PersisterError::InconsistentTimestamp {
                    last_us: self.last.us,
                    new_us: us,
                });
            }
            let entry: E = serde_json::from_str(json)?;
            let idx_ts = IdxTs::new(index, us);
            push(idx_ts, entry)?;
            self.last = idx_ts;
        }
        debug!(path = %self.path.display(), last_index = self.last.index, "legacy text replay complete");

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
        let json = serde_json::to_string(entry)?;
        let writer = self.appender();
        writeln!(writer, "{}\t{}\t{json}", idx_ts.index, idx_ts.us)?;
        writer.flush()?;
        self.last = idx_ts;
        Ok(idx_ts)
    }

    fn publish_replayed(&mut self, entry: &E, idx_ts: IdxTs) -> Result<(), PersisterError> {
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
        let json = serde_json::to_string(entry)?;
        let writer = self.appender();
        writeln!(writer, "{}\t{}\t{json}", idx_ts.index, idx_ts.us)?;
        writer.flush()?;
        self.last = idx_ts;
        Ok(())
    }
}
