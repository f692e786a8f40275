//! Driving Ports (API - Inbound)

use async_trait::async_trait;

use crate::domain::{EngineApiResult, ExecutePayloadReply, ExecutionPayloadV1};
use crate::state::SyncPhase;

/// Primary Engine API.
///
/// This is the driving port called by the consensus component for every
/// candidate block it wants executed.
#[async_trait]
pub trait EngineApi: Send + Sync {
    /// Submit a payload and wait for the verdict.
    ///
    /// Verdicts (`VALID`, `INVALID`, `SYNCING`) are successful replies.
    /// Only malformed payloads, non-PoS chains and infrastructure failures
    /// are errors.
    async fn execute_payload(
        &self,
        request: ExecutionPayloadV1,
    ) -> EngineApiResult<ExecutePayloadReply>;

    /// Current phase of the single-flight round slot.
    fn sync_phase(&self) -> SyncPhase;
}
