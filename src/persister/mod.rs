//! The append-only event log: durable publication plus resumable scans.

mod backend;
mod container;
mod engine;
mod entry;
mod error;
mod idx_ts;
mod lock;
mod notify;
mod scan;

pub use backend::{Backend, FramedJsonBackend, LegacyTextBackend, NullBackend};
pub use container::LogRecord;
pub use engine::Persister;
pub use entry::{Entry, PolymorphicEntry};
pub use error::PersisterError;
pub use idx_ts::IdxTs;
pub use notify::TerminateSignal;
pub use scan::ScanSink;
