//! # Execution Payloads
//!
//! Two shapes of the same candidate block:
//!
//! - [`ExecutionPayloadV1`] is what the consensus component sends. Any
//!   digest, address or bloom field may be missing on the wire.
//! - [`ExecutionPayload`] is the checked form. Every required field is
//!   present by construction, so nothing downstream re-checks presence.
//!
//! The only way from the first to the second is [`TryFrom`], which fails
//! with [`EngineApiError::InvalidPayload`].

use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::fmt;

use super::encoding::PrefixedHex;
use super::errors::EngineApiError;

/// Size of the logs bloom filter in bytes.
pub const LOGS_BLOOM_SIZE: usize = 256;

/// 2048-bit logs bloom. Hex-encoded on the wire.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogsBloom(#[serde_as(as = "PrefixedHex")] pub [u8; LOGS_BLOOM_SIZE]);

impl LogsBloom {
    /// An all-zero bloom (no logs).
    pub fn empty() -> Self {
        Self([0u8; LOGS_BLOOM_SIZE])
    }
}

impl Default for LogsBloom {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for LogsBloom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = self.0.iter().filter(|b| **b != 0).count();
        write!(f, "LogsBloom({} non-zero bytes)", set)
    }
}

/// Execution payload as received from the consensus component.
///
/// Byte fields are `0x`-prefixed hex strings on the wire, quantities follow
/// `primitive-types` (hex for `U256`, plain numbers for `u64`).
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayloadV1 {
    pub parent_hash: Option<H256>,
    pub block_hash: Option<H256>,
    pub receipts_root: Option<H256>,
    pub state_root: Option<H256>,
    pub random: Option<H256>,
    pub logs_bloom: Option<LogsBloom>,
    #[serde_as(as = "Option<PrefixedHex>")]
    pub extra_data: Option<Vec<u8>>,
    pub base_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub block_number: u64,
    #[serde(default)]
    pub gas_limit: u64,
    #[serde(default)]
    pub gas_used: u64,
    #[serde(default)]
    pub timestamp: u64,
    pub coinbase: Option<H160>,
    /// Raw transactions. Absent and empty are the same thing.
    #[serde_as(as = "Vec<PrefixedHex>")]
    #[serde(default)]
    pub transactions: Vec<Vec<u8>>,
}

/// A structurally valid execution payload.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayload {
    pub parent_hash: H256,
    pub block_hash: H256,
    pub receipts_root: H256,
    pub state_root: H256,
    pub random: H256,
    pub logs_bloom: LogsBloom,
    #[serde_as(as = "PrefixedHex")]
    pub extra_data: Vec<u8>,
    pub base_fee_per_gas: U256,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub coinbase: H160,
    #[serde_as(as = "Vec<PrefixedHex>")]
    pub transactions: Vec<Vec<u8>>,
}

impl ExecutionPayload {
    /// Whether this payload directly extends the given head.
    pub fn extends(&self, head_hash: &H256) -> bool {
        self.parent_hash == *head_hash
    }

    /// Number of raw transactions carried.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

impl TryFrom<ExecutionPayloadV1> for ExecutionPayload {
    type Error = EngineApiError;

    fn try_from(raw: ExecutionPayloadV1) -> Result<Self, Self::Error> {
        Ok(Self {
            parent_hash: raw.parent_hash.ok_or(EngineApiError::InvalidPayload)?,
            block_hash: raw.block_hash.ok_or(EngineApiError::InvalidPayload)?,
            receipts_root: raw.receipts_root.ok_or(EngineApiError::InvalidPayload)?,
            state_root: raw.state_root.ok_or(EngineApiError::InvalidPayload)?,
            random: raw.random.ok_or(EngineApiError::InvalidPayload)?,
            logs_bloom: raw.logs_bloom.ok_or(EngineApiError::InvalidPayload)?,
            extra_data: raw.extra_data.ok_or(EngineApiError::InvalidPayload)?,
            base_fee_per_gas: raw.base_fee_per_gas.ok_or(EngineApiError::InvalidPayload)?,
            block_number: raw.block_number,
            gas_limit: raw.gas_limit,
            gas_used: raw.gas_used,
            timestamp: raw.timestamp,
            coinbase: raw.coinbase.ok_or(EngineApiError::InvalidPayload)?,
            transactions: raw.transactions,
        })
    }
}

impl From<ExecutionPayload> for ExecutionPayloadV1 {
    fn from(payload: ExecutionPayload) -> Self {
        Self {
            parent_hash: Some(payload.parent_hash),
            block_hash: Some(payload.block_hash),
            receipts_root: Some(payload.receipts_root),
            state_root: Some(payload.state_root),
            random: Some(payload.random),
            logs_bloom: Some(payload.logs_bloom),
            extra_data: Some(payload.extra_data),
            base_fee_per_gas: Some(payload.base_fee_per_gas),
            block_number: payload.block_number,
            gas_limit: payload.gas_limit,
            gas_used: payload.gas_used,
            timestamp: payload.timestamp,
            coinbase: Some(payload.coinbase),
            transactions: payload.transactions,
        }
    }
}
