//! Pass-scoped progress counters shared with the status endpoint.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use serde::Serialize;

/// Counters for the current pass.
///
/// The orchestrator task is the only writer; the status endpoint takes
/// read-only snapshots. Within a pass every counter is monotonically
/// non-decreasing; `reset` runs once at pass start. Never persisted.
#[derive(Debug, Default)]
pub struct Progress {
    last_attempted_id: AtomicI64,
    last_succeeded_id: AtomicI64,
    total_candidates: AtomicU64,
    updated_count: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub last_attempted_id: i64,
    pub last_succeeded_id: i64,
    pub total_candidates: u64,
    pub updated_count: u64,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&self) {
        self.last_attempted_id.store(0, Ordering::Relaxed);
        self.last_succeeded_id.store(0, Ordering::Relaxed);
        self.total_candidates.store(0, Ordering::Relaxed);
        self.updated_count.store(0, Ordering::Relaxed);
    }

    /// Known candidate count for this pass. Scan mode never knows one and
    /// leaves it at zero.
    pub fn set_total(&self, total: u64) {
        self.total_candidates.store(total, Ordering::Relaxed);
    }

    pub fn record_attempt(&self, id: i64) {
        self.last_attempted_id.fetch_max(id, Ordering::Relaxed);
    }

    pub fn record_success(&self, id: i64) {
        self.last_succeeded_id.fetch_max(id, Ordering::Relaxed);
        self.updated_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            last_attempted_id: self.last_attempted_id.load(Ordering::Relaxed),
            last_succeeded_id: self.last_succeeded_id.load(Ordering::Relaxed),
            total_candidates: self.total_candidates.load(Ordering::Relaxed),
            updated_count: self.updated_count.load(Ordering::Relaxed),
        }
    }
}

impl ProgressSnapshot {
    /// Candidates not yet updated in this pass, floored at zero.
    pub fn remaining(&self) -> u64 {
        self.total_candidates.saturating_sub(self.updated_count)
    }
}
