//! # Sync Coordinator
//!
//! Decides, per submitted payload, whether to start a new round with the
//! execution pipeline or to answer immediately from the verdict cache.
//!
//! ## Round lifecycle
//!
//! ```text
//! IDLE ──submit (leader)──→ AWAITING_HEADERS ──pipeline finish_round──→ IDLE
//!                                 │
//!                                 └── submit (any other task) → SYNCING(cached head)
//! ```
//!
//! Only the leader of a round suspends. The coordinator records the verdict
//! but never clears the flag itself: the pipeline does that through
//! [`PipelineEndpoint::finish_round`](crate::bridge::PipelineEndpoint::finish_round).
//! Writing a new head to the store does not end a round on its own; until
//! the pipeline finishes it, every submission is answered `SYNCING`.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::bridge::{ExecutionBridge, PayloadRequest};
use crate::config::EngineApiConfig;
use crate::domain::{
    build_reply, ChainConfig, EngineApiError, EngineApiResult, ExecutePayloadReply,
    ExecutionPayloadV1, ExecutionStatus, HeadPointer, PayloadStatus,
};
use crate::metrics;
use crate::ports::{EngineApi, HeadStore};
use crate::state::{RoundAdmission, SyncPhase, SyncState};
use crate::validation::PayloadValidator;

/// Engine API service.
pub struct SyncCoordinator<H: HeadStore> {
    validator: PayloadValidator,
    head_store: Arc<H>,
    sync_state: Arc<SyncState>,
    bridge: ExecutionBridge,
    config: EngineApiConfig,
}

impl<H: HeadStore + 'static> SyncCoordinator<H> {
    /// `sync_state` must be the instance the bridge was built with.
    pub fn new(
        chain: ChainConfig,
        head_store: Arc<H>,
        sync_state: Arc<SyncState>,
        bridge: ExecutionBridge,
        config: EngineApiConfig,
    ) -> Self {
        Self {
            validator: PayloadValidator::new(chain),
            head_store,
            sync_state,
            bridge,
            config,
        }
    }

    pub fn sync_state(&self) -> &Arc<SyncState> {
        &self.sync_state
    }

    pub fn head_store(&self) -> &Arc<H> {
        &self.head_store
    }

    pub fn config(&self) -> &EngineApiConfig {
        &self.config
    }

    /// Validate, then either coalesce or lead a round.
    pub async fn submit(&self, request: ExecutionPayloadV1) -> EngineApiResult<ExecutePayloadReply> {
        metrics::record_payload_received();

        let result = self.process(request).await;
        match &result {
            Ok(reply) => metrics::record_reply(&reply.status),
            Err(err) => {
                debug!(
                    reason = err.reason(),
                    error = %err,
                    "[qc-18] execute_payload rejected"
                );
                metrics::record_rejection(err.reason());
            }
        }
        result
    }

    async fn process(&self, request: ExecutionPayloadV1) -> EngineApiResult<ExecutePayloadReply> {
        let payload = self.validator.validate(request)?;
        let head = self.head_store.read_head()?;

        if let RoundAdmission::Coalesced { cached_head } = self.sync_state.try_begin_round() {
            let head_hash = cached_head.unwrap_or(head.hash);
            debug!(
                block_number = payload.block_number,
                block_hash = ?payload.block_hash,
                latest_valid = ?head_hash,
                "[qc-18] Round outstanding, answering SYNCING"
            );
            metrics::record_coalesced();
            return Ok(build_reply(PayloadStatus::Syncing, head_hash));
        }

        let request = PayloadRequest::for_head(payload, &head.hash);
        info!(
            block_number = request.payload.block_number,
            block_hash = ?request.payload.block_hash,
            head_number = head.number,
            kind = %request.kind,
            "[qc-18] Starting execution round"
        );

        // The round owns the rendezvous; it survives the caller giving up.
        let round = tokio::spawn(run_round(
            self.bridge.clone(),
            Arc::clone(&self.sync_state),
            request,
        ));

        let joined = match self.config.verdict_timeout() {
            None => round.await,
            Some(limit) => match tokio::time::timeout(limit, round).await {
                Ok(joined) => joined,
                Err(_) => return Ok(self.timed_out_reply(&head)),
            },
        };

        let verdict = joined.map_err(|e| EngineApiError::Internal(e.to_string()))??;
        Ok(verdict.into())
    }

    fn timed_out_reply(&self, head: &HeadPointer) -> ExecutePayloadReply {
        let head_hash = self
            .sync_state
            .last_verdict()
            .map(|v| v.head_hash)
            .unwrap_or(head.hash);
        warn!(
            timeout_ms = ?self.config.verdict_timeout_ms,
            latest_valid = ?head_hash,
            "[qc-18] Verdict not delivered in time, answering SYNCING"
        );
        metrics::record_verdict_timeout();
        build_reply(PayloadStatus::Syncing, head_hash)
    }
}

/// One dispatch-and-wait round. The flag is left set on success.
async fn run_round(
    bridge: ExecutionBridge,
    sync_state: Arc<SyncState>,
    request: PayloadRequest,
) -> EngineApiResult<ExecutionStatus> {
    let started = Instant::now();
    let kind = request.kind;

    match bridge.dispatch(request).await {
        Ok(verdict) => {
            sync_state.record_verdict(verdict);
            metrics::record_round_latency(started.elapsed().as_secs_f64());
            info!(
                %kind,
                status = %verdict.status,
                head_hash = ?verdict.head_hash,
                "[qc-18] Execution round answered"
            );
            Ok(verdict)
        }
        Err(err) => {
            sync_state.abort_round();
            warn!(
                %kind,
                error = %err,
                "[qc-18] Execution pipeline unavailable, round aborted"
            );
            Err(EngineApiError::PipelineUnavailable)
        }
    }
}

#[async_trait]
impl<H: HeadStore + 'static> EngineApi for SyncCoordinator<H> {
    async fn execute_payload(
        &self,
        request: ExecutionPayloadV1,
    ) -> EngineApiResult<ExecutePayloadReply> {
        self.submit(request).await
    }

    fn sync_phase(&self) -> SyncPhase {
        self.sync_state.phase()
    }
}
