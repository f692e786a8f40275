//! Ports module for the Engine API subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::EngineApi;
pub use outbound::HeadStore;
