//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-process implementations of the outbound ports, used by the devnet
//! runtime and by tests.

mod devnet_pipeline;
mod head_store;

pub use devnet_pipeline::DevnetPipeline;
pub use head_store::InMemoryHeadStore;
