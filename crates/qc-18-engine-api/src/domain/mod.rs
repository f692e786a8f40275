//! # Domain Module
//!
//! Core types for the Engine API: payloads, verdicts, replies, head pointer.

pub mod chain;
pub mod encoding;
pub mod errors;
pub mod payload;
pub mod reply;
pub mod status;

pub use chain::*;
pub use errors::*;
pub use payload::*;
pub use reply::*;
pub use status::*;

/// Re-exported primitives so callers don't need `primitive-types` directly.
pub use primitive_types::{H160, H256, U256};
