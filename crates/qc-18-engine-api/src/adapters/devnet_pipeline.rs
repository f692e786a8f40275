//! Devnet execution pipeline.
//!
//! Minimal in-process stand-in for the real staged-sync pipeline. It never
//! downloads anything: a payload extending the current head by one block is
//! accepted and becomes the new head, a payload whose parent is not the
//! head is answered `SYNCING`, anything else is `INVALID`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::bridge::{PayloadRequest, PipelineEndpoint};
use crate::domain::{ExecutionStatus, StorageError};
use crate::ports::HeadStore;

/// Pipeline task that serves one coordinator.
pub struct DevnetPipeline<H: HeadStore> {
    endpoint: PipelineEndpoint,
    head_store: Arc<H>,
}

impl<H: HeadStore> DevnetPipeline<H> {
    pub fn new(endpoint: PipelineEndpoint, head_store: Arc<H>) -> Self {
        Self {
            endpoint,
            head_store,
        }
    }

    /// Verdict for one request, applying it to the head store when accepted.
    ///
    /// Linkage is checked against the head read here, not against the
    /// request kind: the coordinator classified the request from a head it
    /// read before the round started, and that head may have moved since.
    pub fn judge(&self, request: &PayloadRequest) -> Result<ExecutionStatus, StorageError> {
        let head = self.head_store.read_head()?;
        let payload = &request.payload;

        let verdict = if !payload.extends(&head.hash) {
            ExecutionStatus::syncing(head.hash)
        } else if head.number.checked_add(1) == Some(payload.block_number) {
            self.head_store
                .write_header_number(payload.block_hash, payload.block_number)?;
            self.head_store.write_head(payload.block_hash)?;
            if self.head_store.transition_block()?.is_none() {
                self.head_store.mark_transition(payload.block_number)?;
                info!(
                    block_number = payload.block_number,
                    "[qc-18] First proof-of-stake block accepted"
                );
            }
            ExecutionStatus::valid(payload.block_hash)
        } else {
            ExecutionStatus::invalid(head.hash)
        };
        Ok(verdict)
    }

    /// Serve rounds until the coordinator goes away.
    ///
    /// Each round is finished before its verdict is delivered, so the
    /// coordinator is idle again by the time the caller sees the reply.
    /// A storage failure stops the pipeline; the outstanding round then
    /// fails with `PipelineUnavailable`.
    pub async fn run(mut self) -> Result<(), StorageError> {
        while let Some(request) = self.endpoint.next_request().await {
            let verdict = self.judge(&request)?;
            debug!(
                kind = %request.kind,
                block_number = request.payload.block_number,
                status = %verdict.status,
                "[qc-18] Round judged"
            );
            self.endpoint.finish_round();
            if self.endpoint.deliver(verdict).await.is_err() {
                break;
            }
        }
        debug!("[qc-18] Coordinator gone, pipeline stopping");
        Ok(())
    }
}
