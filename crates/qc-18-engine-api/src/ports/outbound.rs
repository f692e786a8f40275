//! Driven Ports (SPI - Outbound)

use crate::domain::{HeadPointer, StorageError, H256};

/// Port: canonical head storage.
///
/// Conceptual keys: `headBlockHash`, `headerNumber[hash]` and
/// `transitionBlockNumber`. The coordinator only reads; the execution
/// pipeline writes.
pub trait HeadStore: Send + Sync {
    /// Current head hash joined with its header number.
    fn read_head(&self) -> Result<HeadPointer, StorageError>;

    fn write_head(&self, hash: H256) -> Result<(), StorageError>;

    fn write_header_number(&self, hash: H256, number: u64) -> Result<(), StorageError>;

    fn read_header_number(&self, hash: &H256) -> Result<Option<u64>, StorageError>;

    /// Record the block number of the proof-of-work to proof-of-stake switch.
    fn mark_transition(&self, number: u64) -> Result<(), StorageError>;

    fn transition_block(&self) -> Result<Option<u64>, StorageError>;
}
