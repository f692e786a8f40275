//! # Node Configuration
//!
//! Everything the engine node needs at startup, read from the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_CHAIN_ID` | `1337` | Chain identifier |
//! | `QC_TERMINAL_TOTAL_DIFFICULTY` | `1` | Decimal or `0x` hex; empty or `none` disables proof-of-stake |
//! | `QC_GENESIS_HASH` | `0x…01` | Head hash seeded into the store |
//! | `QC_GENESIS_NUMBER` | `0` | Head number seeded into the store |
//! | `QC_ENGINE_VERDICT_TIMEOUT_MS` | unset | Verdict wait bound |

use std::env;

use primitive_types::{H256, U256};
use qc_18_engine_api::{ChainConfig, EngineApiConfig, HeadPointer};
use thiserror::Error;

pub const CHAIN_ID_ENV: &str = "QC_CHAIN_ID";
pub const TTD_ENV: &str = "QC_TERMINAL_TOTAL_DIFFICULTY";
pub const GENESIS_HASH_ENV: &str = "QC_GENESIS_HASH";
pub const GENESIS_NUMBER_ENV: &str = "QC_GENESIS_NUMBER";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: expected a 32-byte hex hash, got {value:?}")]
    InvalidHash { var: &'static str, value: String },
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub engine: EngineApiConfig,
    pub chain: ChainConfig,
    /// Head the store starts from.
    pub genesis: HeadPointer,
}

impl Default for NodeConfig {
    /// Devnet: proof-of-stake from the first block.
    fn default() -> Self {
        Self {
            engine: EngineApiConfig::default(),
            chain: ChainConfig::proof_of_stake(1337, U256::one()),
            genesis: HeadPointer::new(H256::from_low_u64_be(1), 0),
        }
    }
}

impl NodeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_vars(|name| env::var(name).ok())?;
        config.engine = EngineApiConfig::from_env();
        Ok(config)
    }

    /// Build from an arbitrary variable source. Engine settings stay at
    /// their defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let chain_id = match lookup(CHAIN_ID_ENV) {
            Some(value) => parse_u64(CHAIN_ID_ENV, &value)?,
            None => defaults.chain.chain_id,
        };

        let terminal_total_difficulty = match lookup(TTD_ENV) {
            Some(value) => parse_difficulty(&value)?,
            None => defaults.chain.terminal_total_difficulty,
        };

        let genesis_hash = match lookup(GENESIS_HASH_ENV) {
            Some(value) => parse_hash(GENESIS_HASH_ENV, &value)?,
            None => defaults.genesis.hash,
        };

        let genesis_number = match lookup(GENESIS_NUMBER_ENV) {
            Some(value) => parse_u64(GENESIS_NUMBER_ENV, &value)?,
            None => defaults.genesis.number,
        };

        Ok(Self {
            engine: defaults.engine,
            chain: ChainConfig {
                chain_id,
                terminal_total_difficulty,
            },
            genesis: HeadPointer::new(genesis_hash, genesis_number),
        })
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}

fn parse_difficulty(value: &str) -> Result<Option<U256>, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let parsed = match trimmed.strip_prefix("0x") {
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16).ok(),
        None => U256::from_dec_str(trimmed).ok(),
    };
    parsed.map(Some).ok_or_else(|| ConfigError::InvalidNumber {
        var: TTD_ENV,
        value: value.to_string(),
    })
}

fn parse_hash(var: &'static str, value: &str) -> Result<H256, ConfigError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let invalid = || ConfigError::InvalidHash {
        var,
        value: value.to_string(),
    };
    if digits.is_empty() || digits.len() > 64 {
        return Err(invalid());
    }
    let padded = format!("{:0>64}", digits);
    let bytes = hex::decode(padded).map_err(|_| invalid())?;
    Ok(H256::from_slice(&bytes))
}
