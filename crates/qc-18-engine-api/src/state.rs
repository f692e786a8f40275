//! Shared sync state
//!
//! The process-wide "a round is outstanding" flag plus the last verdict the
//! pipeline delivered. One instance is created by the node, handed to the
//! coordinator and to the pipeline side of the bridge, and guarded by a
//! single mutex so test-and-set on the flag is atomic.

use parking_lot::Mutex;
use primitive_types::H256;

use crate::domain::ExecutionStatus;

/// Phase of the single-flight slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncPhase {
    /// No round outstanding.
    Idle,
    /// A round was dispatched and has not been finished by the pipeline.
    AwaitingHeaders,
}

/// Result of trying to claim the round slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundAdmission {
    /// Caller owns the new round and must dispatch it.
    Leader,
    /// A round is already outstanding. `cached_head` is the head hash of the
    /// last delivered verdict, if any.
    Coalesced { cached_head: Option<H256> },
}

#[derive(Debug)]
struct Inner {
    phase: SyncPhase,
    last_verdict: Option<ExecutionStatus>,
    rounds_started: u64,
}

/// Sync flag and verdict cache.
#[derive(Debug)]
pub struct SyncState {
    inner: Mutex<Inner>,
}

impl SyncState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                phase: SyncPhase::Idle,
                last_verdict: None,
                rounds_started: 0,
            }),
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.inner.lock().phase
    }

    pub fn is_syncing(&self) -> bool {
        self.phase() == SyncPhase::AwaitingHeaders
    }

    pub fn last_verdict(&self) -> Option<ExecutionStatus> {
        self.inner.lock().last_verdict
    }

    /// Number of rounds ever dispatched.
    pub fn rounds_started(&self) -> u64 {
        self.inner.lock().rounds_started
    }

    /// Atomically claim the round slot.
    pub fn try_begin_round(&self) -> RoundAdmission {
        let mut inner = self.inner.lock();
        match inner.phase {
            SyncPhase::AwaitingHeaders => RoundAdmission::Coalesced {
                cached_head: inner.last_verdict.map(|v| v.head_hash),
            },
            SyncPhase::Idle => {
                inner.phase = SyncPhase::AwaitingHeaders;
                inner.rounds_started += 1;
                RoundAdmission::Leader
            }
        }
    }

    /// Cache a verdict delivered by the pipeline. Leaves the flag alone.
    pub fn record_verdict(&self, verdict: ExecutionStatus) {
        self.inner.lock().last_verdict = Some(verdict);
    }

    /// Clear the flag. Called by whoever completes the round, never by the
    /// coordinator on the success path.
    pub fn finish_round(&self) {
        self.inner.lock().phase = SyncPhase::Idle;
    }

    /// Release the slot for a round the pipeline abandoned.
    pub(crate) fn abort_round(&self) {
        self.finish_round();
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}
