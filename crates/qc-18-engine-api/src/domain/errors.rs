//! # Domain Errors
//!
//! Error types for the Engine API subsystem.
//!
//! Only structurally or configurationally invalid requests are errors.
//! A payload the chain disagrees with is answered with an `INVALID` status,
//! never with an error.

use primitive_types::H256;
use thiserror::Error;

/// Result alias used across the subsystem.
pub type EngineApiResult<T> = Result<T, EngineApiError>;

/// Errors surfaced to the caller of `execute_payload`.
#[derive(Debug, Error)]
pub enum EngineApiError {
    /// A required digest, address, bloom or base-fee field is absent.
    #[error("invalid execution payload")]
    InvalidPayload,

    /// The chain configuration defines no terminal total difficulty.
    #[error("not a proof-of-stake chain")]
    NotProofOfStake,

    /// The head store could not be read.
    #[error("head store error: {0}")]
    Storage(#[from] StorageError),

    /// The execution pipeline side of the bridge was dropped.
    #[error("execution pipeline unavailable")]
    PipelineUnavailable,

    /// A round task failed unexpectedly.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineApiError {
    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidPayload => "invalid_payload",
            Self::NotProofOfStake => "not_proof_of_stake",
            Self::Storage(_) => "storage",
            Self::PipelineUnavailable => "pipeline_unavailable",
            Self::Internal(_) => "internal",
        }
    }
}

/// Head store failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// No head block hash has been written yet.
    #[error("head block hash not found")]
    MissingHead,

    /// The head hash has no header number entry.
    #[error("header number not found for {0:?}")]
    MissingHeaderNumber(H256),

    /// Backend-specific failure.
    #[error("storage backend: {0}")]
    Backend(String),
}
