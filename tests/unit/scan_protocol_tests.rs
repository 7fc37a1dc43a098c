use std::sync::Arc;
use std::thread;
use std::time::Duration;

use eventlog_rs::{IdxTs, NullBackend, Persister, ScanSink, TerminateSignal};

struct BoundarySink {
    replay_done_at: Option<usize>,
    entries_before_boundary: Vec<u64>,
    entries_after_boundary: Vec<u64>,
}

impl BoundarySink {
    fn new() -> Self {
        Self {
            replay_done_at: None,
            entries_before_boundary: Vec::new(),
            entries_after_boundary: Vec::new(),
        }
    }
}

impl ScanSink<u64> for BoundarySink {
    fn on_entry(&mut self, record: (IdxTs, &u64), _last: IdxTs) -> bool {
        if self.replay_done_at.is_some() {
            self.entries_after_boundary.push(record.0.index);
        } else {
            self.entries_before_boundary.push(record.0.index);
        }
        record.0.index < 8
    }

    fn on_replay_done(&mut self) {
        assert!(
            self.replay_done_at.is_none(),
            "on_replay_done must fire exactly once"
        );
        self.replay_done_at = Some(self.entries_before_boundary.len());
    }
}

#[test]
fn empty_log_triggers_replay_done_before_any_entry() {
    let persister = Persister::new(NullBackend::new()).unwrap();
    let terminate = TerminateSignal::new();

    struct ImmediateStop;
    impl ScanSink<u64> for ImmediateStop {
        fn on_entry(&mut self, _record: (IdxTs, &u64), _last: IdxTs) -> bool {
            panic!("no entries expected");
        }
        fn on_replay_done(&mut self) {}
        fn on_terminate(&mut self) -> bool {
            true
        }
    }

    terminate.raise();
    let mut sink = ImmediateStop;
    persister.scan(&terminate, &mut sink).unwrap();
}

#[test]
fn scan_started_mid_stream_sees_replay_then_live_boundary_exactly_once() {
    let persister = Arc::new(Persister::new(NullBackend::new()).unwrap());
    for _ in 0..5 {
        persister.publish(&0u64).unwrap();
    }

    let terminate = TerminateSignal::new();
    let scan_persister = Arc::clone(&persister);
    let scan_terminate = terminate.clone();
    let handle = thread::spawn(move || {
        let mut sink = BoundarySink::new();
        scan_persister.scan(&scan_terminate, &mut sink).unwrap();
        sink
    });

    thread::sleep(Duration::from_millis(40));
    for _ in 0..5 {
        persister.publish(&0u64).unwrap();
    }

    let sink = handle.join().unwrap();
    assert_eq!(sink.replay_done_at, Some(6));
    assert_eq!(sink.entries_before_boundary, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(sink.entries_after_boundary, vec![7, 8]);
}

#[test]
fn on_terminate_returning_false_lets_scan_drain_remaining_backlog() {
    let persister = Arc::new(Persister::new(NullBackend::new()).unwrap());
    for _ in 0..3 {
        persister.publish(&0u64).unwrap();
    }

    struct DrainOnTerminate {
        seen: Vec<u64>,
        terminate_calls: usize,
    }
    impl ScanSink<u64> for DrainOnTerminate {
        fn on_entry(&mut self, record: (IdxTs, &u64), _last: IdxTs) -> bool {
            self.seen.push(record.0.index);
            self.seen.len() < 3
        }
        fn on_terminate(&mut self) -> bool {
            self.terminate_calls += 1;
            false
        }
    }

    let terminate = TerminateSignal::new();
    terminate.raise();
    let mut sink = DrainOnTerminate {
        seen: Vec::new(),
        terminate_calls: 0,
    };
    persister.scan(&terminate, &mut sink).unwrap();

    assert_eq!(sink.seen, vec![1, 2, 3]);
    assert_eq!(sink.terminate_calls, 1);
}
