//! Error types for the persister.
//!
//! [`PersisterError`] covers all failure modes of the append-only log:
//! replay-time corruption, clock regression, and polymorphic-entry misuse.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur within the persister.
#[derive(Debug)]
#[non_exhaustive]
pub enum PersisterError {
    /// A record's index did not equal `last.index + 1` (I1 violation).
    InconsistentIndex {
        /// The index that was expected (`last.index + 1`).
        expected: u64,
        /// The index actually observed.
        actual: u64,
    },

    /// A record's timestamp did not strictly exceed the previous one (I2
    /// violation).
    InconsistentTimestamp {
        /// The previous record's timestamp.
        last_us: i64,
        /// The new timestamp that failed to strictly exceed it.
        new_us: i64,
    },

    /// A line in a replayed file could not be parsed.
    MalformedEntry {
        /// The raw line (or line fragment) that failed to parse.
        line: String,
    },

    /// A required polymorphic entry slot was read or published without a
    /// value ever having been set.
    UninitializedRequiredVariant,

    /// The polymorphic entry container was asked for a variant it does not
    /// currently hold.
    NoValueOfType {
        /// The name of the variant that was requested.
        type_name: &'static str,
    },

    /// An I/O error occurred while reading or writing the backend file.
    Io {
        /// The underlying I/O error message.
        message: String,
        /// The file path involved, if known.
        path: Option<PathBuf>,
    },

    /// The entry could not be serialized to JSON.
    SerializationError {
        /// The underlying serde error message.
        message: String,
    },

    /// An internal mutex was poisoned (another thread panicked while
    /// holding the lock).
    MutexPoisoned,
}

impl fmt::Display for PersisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersisterError::InconsistentIndex { expected, actual } => {
                write!(
                    f,
                    "inconsistent index: expected {expected}, got {actual}"
                )
            }
            PersisterError::InconsistentTimestamp { last_us, new_us } => {
                write!(
                    f,
                    "inconsistent timestamp: last was {last_us}us, new is {new_us}us (must strictly increase)"
                )
            }
            PersisterError::MalformedEntry { line } => {
                write!(f, "malformed entry during replay: {line:?}")
            }
            PersisterError::UninitializedRequiredVariant => {
                write!(f, "required polymorphic entry slot has no value")
            }
            PersisterError::NoValueOfType { type_name } => {
                write!(f, "polymorphic entry does not hold a value of type {type_name}")
            }
            PersisterError::Io { message, path } => {
                if let Some(p) = path {
                    write!(f, "persister I/O error at {}: {message}", p.display())
                } else {
                    write!(f, "persister I/O error: {message}")
                }
            }
            PersisterError::SerializationError { message } => {
                write!(f, "persister serialization error: {message}")
            }
            PersisterError::MutexPoisoned => {
                write!(f, "persister internal mutex poisoned")
            }
        }
    }
}

impl std::error::Error for PersisterError {}

impl From<std::io::Error> for PersisterError {
    #[cold]
    fn from(err: std::io::Error) -> Self {
        PersisterError::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for PersisterError {
    #[cold]
    fn from(err: serde_json::Error) -> Self {
        PersisterError::SerializationError {
            message: err.to_string(),
        }
    }
}
