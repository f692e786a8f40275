//! # Quantum-Chain Engine Node
//!
//! Library half of the `node-runtime` binary, split out so the wiring can
//! be tested without a process boundary.
//!
//! ## Modular Structure
//!
//! - `container/` - Node configuration and engine subsystem wiring
//! - `wiring/` - Newline-delimited JSON request loop
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry
//! 2. Load configuration from the environment
//! 3. Seed the head store with the genesis head
//! 4. Start the execution pipeline task
//! 5. Serve requests from stdin until EOF or Ctrl+C

pub mod container;
pub mod wiring;

pub use container::{ConfigError, EngineContainer, NodeConfig};
pub use wiring::{handle_line, serve, ResponseLine};
