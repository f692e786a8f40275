//! # Quantum-Chain Engine Node
//!
//! Reads `ExecutionPayloadV1` JSON objects from stdin, one per line, and
//! writes one response per line to stdout. Logs go to stderr.

use std::sync::Arc;

use anyhow::Result;
use quantum_telemetry::{init_telemetry, TelemetryConfig};
use tokio::io::BufReader;
use tracing::{info, warn};

use node_runtime::{serve, EngineContainer, NodeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::for_subsystem("18", "engine-api"))?;

    let config = NodeConfig::from_env()?;
    let container = Arc::new(EngineContainer::new(config));

    info!("===========================================");
    info!("  Quantum-Chain Engine Node v{}", qc_18_engine_api::VERSION);
    info!("===========================================");
    info!("Reading payloads from stdin. Press Ctrl+C to stop.");

    let input = BufReader::new(tokio::io::stdin());
    tokio::select! {
        served = serve(Arc::clone(&container), input, tokio::io::stdout()) => {
            let served = served?;
            info!(requests = served, "Input closed");
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received");
        }
    }

    match Arc::try_unwrap(container) {
        Ok(container) => container.shutdown().await?,
        Err(_) => warn!("Requests still in flight at shutdown"),
    }

    Ok(())
}
