//! # qc-18-engine-api
//!
//! Execution-side intake for candidate blocks pushed by the consensus
//! component.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Payload validation**: required fields present, chain is proof-of-stake
//! - **Single-flight rounds**: at most one payload is with the execution
//!   pipeline at a time; everything else is answered `SYNCING`
//! - **Rendezvous bridge**: one request out, one verdict back, per round
//! - **Replies**: `{status, latestValidHash}` built from the verdict
//!
//! ## Architecture
//!
//! ```text
//! Consensus ──ExecutionPayloadV1──→ SyncCoordinator ──PayloadRequest──→ Pipeline
//!                                        │   ↑                             │
//!                                        │   └───────ExecutionStatus───────┘
//!                                        │
//!                                        └── HeadStore (read head)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use qc_18_engine_api::{
//!     execution_bridge, ChainConfig, DevnetPipeline, EngineApi, EngineApiConfig,
//!     InMemoryHeadStore, SyncCoordinator, SyncState,
//! };
//!
//! let store = Arc::new(InMemoryHeadStore::with_head(genesis_hash, 0));
//! let state = Arc::new(SyncState::new());
//! let (bridge, endpoint) = execution_bridge(Arc::clone(&state));
//! tokio::spawn(DevnetPipeline::new(endpoint, Arc::clone(&store)).run());
//!
//! let coordinator = SyncCoordinator::new(chain, store, state, bridge, EngineApiConfig::default());
//! let reply = coordinator.execute_payload(request).await?;
//! ```

pub mod adapters;
pub mod bridge;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod state;
pub mod validation;

pub use adapters::{DevnetPipeline, InMemoryHeadStore};
pub use bridge::{
    execution_bridge, ExecutionBridge, HandoffError, PayloadRequest, PipelineEndpoint,
    RequestKind,
};
pub use config::EngineApiConfig;
pub use domain::{
    build_reply, ChainConfig, EngineApiError, EngineApiResult, ExecutePayloadReply,
    ExecutionPayload, ExecutionPayloadV1, ExecutionStatus, HeadPointer, LogsBloom,
    PayloadStatus, StorageError, H160, H256, U256,
};
pub use ports::{EngineApi, HeadStore};
pub use service::SyncCoordinator;
pub use state::{RoundAdmission, SyncPhase, SyncState};
pub use validation::PayloadValidator;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
