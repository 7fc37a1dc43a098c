//! # eventlog-rs
//!
//! An in-process, append-only event log: durable, strictly-ordered
//! publication backed by a pluggable store, plus resumable live-tailing
//! for subscribers via a replay-then-follow scan.
//!
//! ## Core types
//!
//! - [`Persister`] — the engine. Construct over a [`Backend`], then
//!   [`publish`](Persister::publish) entries and
//!   [`scan`](Persister::scan) them from any number of threads.
//! - [`Backend`] — pluggable durability: [`NullBackend`] (counter only,
//!   no I/O), [`LegacyTextBackend`] (tab-separated text), and
//!   [`FramedJsonBackend`] (JSON-framed text).
//! - [`IdxTs`] — the 1-based index plus microsecond timestamp assigned to
//!   every record.
//! - [`ScanSink`] — the trait a subscriber implements to consume a scan.
//! - [`TerminateSignal`] — a cheap, cloneable, many-to-many cancellation
//!   flag for stopping one or more in-flight scans.
//!
//! ## Guarantees
//!
//! Every published record gets a strictly-increasing index and a
//! strictly-increasing timestamp (enforced per backend, both on live
//! publication and on replay). A scanner that starts mid-stream first
//! observes every record that existed at that instant (in order), is
//! told exactly once when it has caught up to live traffic, and then
//! keeps observing new records as they're published — with no gap and
//! no duplicate at the boundary.
//!
//! ```
//! use eventlog_rs::{NullBackend, Persister, ScanSink, IdxTs, TerminateSignal};
//!
//! struct Collect(Vec<String>);
//! impl ScanSink<String> for Collect {
//!     fn on_entry(&mut self, record: (IdxTs, &String), _last: IdxTs) -> bool {
//!         self.0.push(record.1.clone());
//!         self.0.len() < 2
//!     }
//! }
//!
//! let persister = Persister::new(NullBackend::new()).unwrap();
//! persister.publish(&"first".to_string()).unwrap();
//! persister.publish(&"second".to_string()).unwrap();
//!
//! let mut sink = Collect(Vec::new());
//! persister.scan(&TerminateSignal::new(), &mut sink).unwrap();
//! assert_eq!(sink.0, vec!["first", "second"]);
//! ```

mod persister;
pub mod prelude;
mod utils;

pub use persister::{
    Backend, Entry, FramedJsonBackend, IdxTs, LegacyTextBackend, LogRecord, NullBackend,
    Persister, PersisterError, PolymorphicEntry, ScanSink, TerminateSignal,
};
