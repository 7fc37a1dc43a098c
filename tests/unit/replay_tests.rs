use eventlog_rs::{FramedJsonBackend, IdxTs, LegacyTextBackend, Persister};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Event {
    name: String,
    amount: u64,
}

#[test]
fn empty_log_round_trips_through_legacy_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");

    let persister = Persister::new(LegacyTextBackend::new(&path)).unwrap();
    assert_eq!(persister.size().unwrap(), 0);
    drop(persister);

    let reopened = Persister::new(LegacyTextBackend::new(&path)).unwrap();
    assert_eq!(reopened.size().unwrap(), 0);
}

#[test]
fn empty_log_round_trips_through_framed_json_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.jsonl");

    let persister = Persister::new(FramedJsonBackend::new(&path)).unwrap();
    assert_eq!(persister.size().unwrap(), 0);
    drop(persister);

    let reopened = Persister::new(FramedJsonBackend::new(&path)).unwrap();
    assert_eq!(reopened.size().unwrap(), 0);
}

#[test]
fn three_publishes_then_restart_preserves_order_and_assignment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.jsonl");

    let published: Vec<IdxTs> = {
        let persister = Persister::new(FramedJsonBackend::new(&path)).unwrap();
        let mut idx_tss = Vec::new();
        for i in 0..3 {
            idx_tss.push(
                persister
                    .publish(&Event {
                        name: format!("event-{i}"),
                        amount: i,
                    })
                    .unwrap(),
            );
        }
        idx_tss
    };

    assert_eq!(published.len(), 3);
    assert!(published.windows(2).all(|w| w[0].index < w[1].index));
    assert!(published.windows(2).all(|w| w[0].us < w[1].us));

    let restarted = Persister::new(FramedJsonBackend::new(&path)).unwrap();
    assert_eq!(restarted.size().unwrap(), 3);

    for (i, idx_ts) in published.iter().enumerate() {
        restarted
            .publish_replayed(
                &Event {
                    name: format!("would-be-duplicate-{i}"),
                    amount: 999,
                },
                *idx_ts,
            )
            .unwrap_err();
    }
}

#[test]
fn legacy_backend_rejects_corrupt_on_disk_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    std::fs::write(&path, "1\t100\t\"a\"\n3\t300\t\"c\"\n").unwrap();

    let err = Persister::new(LegacyTextBackend::new(&path)).unwrap_err();
    assert!(matches!(
        err,
        eventlog_rs::PersisterError::InconsistentIndex {
            expected: 2,
            actual: 3
        }
    ));
}
