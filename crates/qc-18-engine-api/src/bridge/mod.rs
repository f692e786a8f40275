//! # Execution Bridge
//!
//! Connects the sync coordinator to the external execution pipeline with two
//! rendezvous handoffs:
//!
//! ```text
//! SyncCoordinator ──PayloadRequest──→ PipelineEndpoint   (backfill / execute)
//! SyncCoordinator ←─ExecutionStatus── PipelineEndpoint   (verdict)
//! ```
//!
//! Exactly one request goes out and one verdict comes back per round. The
//! bridge never retries; that is the pipeline's business.

pub mod rendezvous;

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;

use crate::domain::{ExecutionPayload, ExecutionStatus, H256};
use crate::state::SyncState;
pub use rendezvous::HandoffError;
use rendezvous::{RendezvousReceiver, RendezvousSender};

/// What the pipeline has to do before it can judge the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// Parent is the persisted head; execute directly.
    Execute,
    /// Parent is unknown; ancestor headers must be fetched first.
    Backfill,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Execute => f.write_str("execute"),
            Self::Backfill => f.write_str("backfill"),
        }
    }
}

/// Work item handed to the pipeline for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadRequest {
    pub kind: RequestKind,
    pub payload: ExecutionPayload,
}

impl PayloadRequest {
    /// Classify `payload` against the persisted head hash.
    pub fn for_head(payload: ExecutionPayload, head_hash: &H256) -> Self {
        let kind = if payload.extends(head_hash) {
            RequestKind::Execute
        } else {
            RequestKind::Backfill
        };
        Self { kind, payload }
    }

    /// Routing hint for the header downloader.
    pub fn parent_hash(&self) -> H256 {
        self.payload.parent_hash
    }
}

/// Build a connected bridge. `sync_state` must be the same instance the
/// coordinator was constructed with.
pub fn execution_bridge(sync_state: Arc<SyncState>) -> (ExecutionBridge, PipelineEndpoint) {
    let (request_tx, request_rx) = rendezvous::channel();
    let (verdict_tx, verdict_rx) = rendezvous::channel();

    let bridge = ExecutionBridge {
        requests: request_tx,
        verdicts: Arc::new(AsyncMutex::new(verdict_rx)),
    };
    let endpoint = PipelineEndpoint {
        requests: request_rx,
        verdicts: verdict_tx,
        sync_state,
    };
    (bridge, endpoint)
}

/// Coordinator side of the bridge.
#[derive(Clone)]
pub struct ExecutionBridge {
    requests: RendezvousSender<PayloadRequest>,
    verdicts: Arc<AsyncMutex<RendezvousReceiver<ExecutionStatus>>>,
}

impl ExecutionBridge {
    /// Hand `request` to the pipeline and wait for its verdict.
    ///
    /// The verdict receiver is held for the whole round so a verdict can
    /// only ever reach the round that asked for it.
    pub async fn dispatch(&self, request: PayloadRequest) -> Result<ExecutionStatus, HandoffError> {
        let mut verdicts = self.verdicts.lock().await;
        self.requests.send(request).await?;
        verdicts.recv().await.ok_or(HandoffError)
    }
}

impl fmt::Debug for ExecutionBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionBridge")
            .field("closed", &self.requests.is_closed())
            .finish()
    }
}

/// Pipeline side of the bridge, owned by the external execution pipeline.
#[derive(Debug)]
pub struct PipelineEndpoint {
    requests: RendezvousReceiver<PayloadRequest>,
    verdicts: RendezvousSender<ExecutionStatus>,
    sync_state: Arc<SyncState>,
}

impl PipelineEndpoint {
    /// Wait for the next round's request. `None` once the coordinator is gone.
    pub async fn next_request(&mut self) -> Option<PayloadRequest> {
        self.requests.recv().await
    }

    /// Deliver the verdict for the current round.
    pub async fn deliver(&self, verdict: ExecutionStatus) -> Result<(), HandoffError> {
        self.verdicts.send(verdict).await
    }

    /// Mark the outstanding round as complete, clearing the sync flag.
    pub fn finish_round(&self) {
        self.sync_state.finish_round();
    }

    pub fn sync_state(&self) -> &Arc<SyncState> {
        &self.sync_state
    }
}
