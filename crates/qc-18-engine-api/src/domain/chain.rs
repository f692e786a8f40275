//! # Chain Head & Configuration

use primitive_types::{H256, U256};
use serde::{Deserialize, Serialize};

/// Persisted canonical head as read from the head store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadPointer {
    /// Canonical head block hash (`headBlockHash`).
    pub hash: H256,
    /// Block number of the head (`headerNumber[hash]`).
    pub number: u64,
}

impl HeadPointer {
    pub fn new(hash: H256, number: u64) -> Self {
        Self { hash, number }
    }
}

/// The subset of chain configuration the engine API cares about.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: u64,
    /// Difficulty at which the chain leaves proof-of-work.
    #[serde(default)]
    pub terminal_total_difficulty: Option<U256>,
}

impl ChainConfig {
    /// Proof-of-stake configuration with the given terminal total difficulty.
    pub fn proof_of_stake(chain_id: u64, terminal_total_difficulty: U256) -> Self {
        Self {
            chain_id,
            terminal_total_difficulty: Some(terminal_total_difficulty),
        }
    }

    /// A zero terminal total difficulty counts as unset.
    pub fn is_proof_of_stake(&self) -> bool {
        self.terminal_total_difficulty
            .map(|ttd| !ttd.is_zero())
            .unwrap_or(false)
    }
}
