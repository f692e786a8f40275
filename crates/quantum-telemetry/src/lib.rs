//! # Quantum Telemetry
//!
//! Structured logging setup shared by Quantum-Chain services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::for_subsystem("18", "engine-api"))?;
//!     // tracing macros now emit to stderr
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directives |
//! | `QC_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `QC_CONSOLE_OUTPUT` | `true` | Disable to silence logs |
//! | `QC_SUBSYSTEM_ID` | `00` | Subsystem identifier |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging and return a guard to hold for the process lifetime.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    let service = config.full_service_name();
    tracing::info!(
        service = %service,
        network = %config.network,
        json = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { service })
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service: String,
}

impl TelemetryGuard {
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service, "Shutting down telemetry...");
    }
}
