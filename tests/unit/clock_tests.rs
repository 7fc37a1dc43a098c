use eventlog_rs::{IdxTs, NullBackend, Persister, PersisterError};
use proptest::prelude::*;

#[test]
fn publish_replayed_rejects_non_increasing_timestamp() {
    let persister = eventlog_rs::Persister::new(NullBackend::new()).unwrap();
    persister
        .publish_replayed(&1u64, IdxTs::new(1, 1_000))
        .unwrap();

    let err = persister
        .publish_replayed(&2u64, IdxTs::new(2, 999))
        .unwrap_err();
    assert!(matches!(
        err,
        PersisterError::InconsistentTimestamp {
            last_us: 1_000,
            new_us: 999
        }
    ));
    assert_eq!(persister.size().unwrap(), 1);
}

#[test]
fn publish_replayed_rejects_equal_timestamp() {
    let persister = eventlog_rs::Persister::new(NullBackend::new()).unwrap();
    persister
        .publish_replayed(&1u64, IdxTs::new(1, 1_000))
        .unwrap();

    let err = persister
        .publish_replayed(&2u64, IdxTs::new(2, 1_000))
        .unwrap_err();
    assert!(matches!(err, PersisterError::InconsistentTimestamp { .. }));
}

#[test]
fn publish_replayed_rejects_index_that_does_not_extend_the_tail() {
    let persister = eventlog_rs::Persister::new(NullBackend::new()).unwrap();
    persister
        .publish_replayed(&1u64, IdxTs::new(1, 1_000))
        .unwrap();

    let err = persister
        .publish_replayed(&2u64, IdxTs::new(5, 2_000))
        .unwrap_err();
    assert!(matches!(
        err,
        PersisterError::InconsistentIndex {
            expected: 2,
            actual: 5
        }
    ));
}

proptest! {
    /// For any sequence of N publishes against a fresh persister, the
    /// assigned indices are exactly 1..=N and timestamps strictly increase.
    #[test]
    fn n_publishes_assign_contiguous_indices_and_increasing_timestamps(n in 1usize..200) {
        let persister = Persister::new(NullBackend::new()).unwrap();
        let mut idx_tss = Vec::with_capacity(n);
        for i in 0..n {
            idx_tss.push(persister.publish(&(i as u64)).unwrap());
        }

        prop_assert_eq!(
            idx_tss.iter().map(|it| it.index).collect::<Vec<_>>(),
            (1..=n as u64).collect::<Vec<_>>()
        );
        prop_assert!(idx_tss.windows(2).all(|w| w[0].us < w[1].us));
        prop_assert_eq!(persister.size().unwrap(), n as u64);
    }
}
