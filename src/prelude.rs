//! Convenience re-export of the crate's public surface.
//!
//! ```
//! use eventlog_rs::prelude::*;
//! ```

pub use crate::{
    Backend, Entry, FramedJsonBackend, IdxTs, LegacyTextBackend, LogRecord, NullBackend,
    Persister, PersisterError, PolymorphicEntry, ScanSink, TerminateSignal,
};
