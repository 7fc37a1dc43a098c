//! Small, standalone helpers shared across the crate.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAST_US: AtomicI64 = AtomicI64::new(0);

/// Current wall-clock time in microseconds since the Unix epoch, strictly
/// increasing call-over-call.
///
/// This is the crate's sole timestamp source (spec: Timebase). Plain
/// `SystemTime` sampling is not enough on its own: back-to-back calls can
/// land in the same microsecond tick, and every backend rejects a publish
/// whose timestamp does not strictly exceed the previous one. A
/// process-wide counter tracks the last value this function returned and
/// bumps it by one whenever the wall clock hasn't advanced past it, so
/// `now_us()` itself never regresses or repeats.
#[must_use]
#[inline]
pub fn now_us() -> i64 {
    let wall = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as i64;

    let mut last = LAST_US.load(Ordering::Relaxed);
    loop {
        let candidate = wall.max(last + 1);
        match LAST_US.compare_exchange_weak(
            last,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}
