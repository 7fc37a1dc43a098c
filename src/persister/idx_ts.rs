//! The `(index, timestamp)` pair assigned to every log record.

use serde::{Deserialize, Serialize};

/// A 1-based sequence number paired with the microsecond timestamp the
/// backend assigned it.
///
/// `IdxTs` is totally ordered by `index` alone (see [`Ord`] impl below);
/// `us` is carried for display/diagnostics and for the strict-monotonicity
/// check (I2) but two `IdxTs` values are never compared on `us`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdxTs {
    /// 1-based, strictly-increasing sequence number.
    pub index: u64,
    /// Microsecond timestamp assigned at admission.
    pub us: i64,
}

impl IdxTs {
    /// The zero-value `IdxTs` used as "no record yet" sentinel, matching the
    /// convention that a fresh log has `last_idx_ts == IdxTs::ZERO`.
    pub const ZERO: IdxTs = IdxTs { index: 0, us: 0 };

    #[must_use]
    pub const fn new(index: u64, us: i64) -> Self {
        Self { index, us }
    }
}

impl Default for IdxTs {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for IdxTs {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IdxTs {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl std::fmt::Display for IdxTs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}@{}us", self.index, self.us)
    }
}
