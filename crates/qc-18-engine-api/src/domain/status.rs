//! # Payload Status & Verdicts

use primitive_types::H256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of processing an execution payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadStatus {
    /// The payload is now canonical up to the reported head.
    Valid,
    /// The payload is permanently rejected.
    Invalid,
    /// Not enough local chain data yet. Retry later.
    Syncing,
}

impl PayloadStatus {
    /// Wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Invalid => "INVALID",
            Self::Syncing => "SYNCING",
        }
    }
}

impl fmt::Display for PayloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VALID" => Ok(Self::Valid),
            "INVALID" => Ok(Self::Invalid),
            "SYNCING" => Ok(Self::Syncing),
            other => Err(format!("unknown payload status: {}", other)),
        }
    }
}

/// Verdict produced by the execution pipeline for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStatus {
    /// Hash the pipeline considers canonical after processing.
    pub head_hash: H256,
    pub status: PayloadStatus,
}

impl ExecutionStatus {
    pub fn new(head_hash: H256, status: PayloadStatus) -> Self {
        Self { head_hash, status }
    }

    pub fn valid(head_hash: H256) -> Self {
        Self::new(head_hash, PayloadStatus::Valid)
    }

    pub fn invalid(last_valid: H256) -> Self {
        Self::new(last_valid, PayloadStatus::Invalid)
    }

    pub fn syncing(head_hash: H256) -> Self {
        Self::new(head_hash, PayloadStatus::Syncing)
    }
}
