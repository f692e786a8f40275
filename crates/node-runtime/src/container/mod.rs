//! # Engine Container
//!
//! Builds the engine subsystem and its devnet pipeline from a
//! [`NodeConfig`] and holds them for the node's lifetime.

pub mod config;

pub use config::{ConfigError, NodeConfig};

use std::sync::Arc;

use qc_18_engine_api::{
    execution_bridge, DevnetPipeline, InMemoryHeadStore, StorageError, SyncCoordinator,
    SyncState,
};
use tokio::task::JoinHandle;
use tracing::info;

/// Wired engine subsystem.
pub struct EngineContainer {
    pub config: NodeConfig,
    pub coordinator: SyncCoordinator<InMemoryHeadStore>,
    pub head_store: Arc<InMemoryHeadStore>,
    pipeline: JoinHandle<Result<(), StorageError>>,
}

impl EngineContainer {
    /// Seed the head store and start the pipeline task. Must be called
    /// inside a tokio runtime.
    pub fn new(config: NodeConfig) -> Self {
        let head_store = Arc::new(InMemoryHeadStore::with_head(
            config.genesis.hash,
            config.genesis.number,
        ));
        let sync_state = Arc::new(SyncState::new());
        let (bridge, endpoint) = execution_bridge(Arc::clone(&sync_state));

        let pipeline = tokio::spawn(DevnetPipeline::new(endpoint, Arc::clone(&head_store)).run());

        let coordinator = SyncCoordinator::new(
            config.chain.clone(),
            Arc::clone(&head_store),
            sync_state,
            bridge,
            config.engine.clone(),
        );

        info!(
            chain_id = config.chain.chain_id,
            proof_of_stake = config.chain.is_proof_of_stake(),
            genesis_number = config.genesis.number,
            genesis_hash = ?config.genesis.hash,
            "[qc-18] Engine subsystem initialized"
        );

        Self {
            config,
            coordinator,
            head_store,
            pipeline,
        }
    }

    /// Drop the coordinator and wait for the pipeline to wind down.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        let Self {
            coordinator,
            pipeline,
            ..
        } = self;
        drop(coordinator);
        pipeline.await??;
        info!("[qc-18] Pipeline stopped");
        Ok(())
    }
}
