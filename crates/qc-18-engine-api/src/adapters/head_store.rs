//! In-memory head store.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::{HeadPointer, StorageError, H256};
use crate::ports::HeadStore;

#[derive(Debug, Default)]
struct HeadTables {
    head_block_hash: Option<H256>,
    header_numbers: HashMap<H256, u64>,
    transition_block_number: Option<u64>,
}

/// `HeadStore` backed by a lock-protected map.
#[derive(Debug, Default)]
pub struct InMemoryHeadStore {
    tables: RwLock<HeadTables>,
}

impl InMemoryHeadStore {
    /// Empty store; `read_head` fails until a head is written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a head and its header number.
    pub fn with_head(hash: H256, number: u64) -> Self {
        let tables = HeadTables {
            head_block_hash: Some(hash),
            header_numbers: HashMap::from([(hash, number)]),
            transition_block_number: None,
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl HeadStore for InMemoryHeadStore {
    fn read_head(&self) -> Result<HeadPointer, StorageError> {
        let tables = self.tables.read();
        let hash = tables.head_block_hash.ok_or(StorageError::MissingHead)?;
        let number = tables
            .header_numbers
            .get(&hash)
            .copied()
            .ok_or(StorageError::MissingHeaderNumber(hash))?;
        Ok(HeadPointer::new(hash, number))
    }

    fn write_head(&self, hash: H256) -> Result<(), StorageError> {
        self.tables.write().head_block_hash = Some(hash);
        Ok(())
    }

    fn write_header_number(&self, hash: H256, number: u64) -> Result<(), StorageError> {
        self.tables.write().header_numbers.insert(hash, number);
        Ok(())
    }

    fn read_header_number(&self, hash: &H256) -> Result<Option<u64>, StorageError> {
        Ok(self.tables.read().header_numbers.get(hash).copied())
    }

    fn mark_transition(&self, number: u64) -> Result<(), StorageError> {
        self.tables.write().transition_block_number = Some(number);
        Ok(())
    }

    fn transition_block(&self) -> Result<Option<u64>, StorageError> {
        Ok(self.tables.read().transition_block_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_head() {
        let store = InMemoryHeadStore::new();
        assert_eq!(store.read_head(), Err(StorageError::MissingHead));
        assert_eq!(store.transition_block(), Ok(None));
    }

    #[test]
    fn test_seeded_head_reads_back() {
        let hash = H256::from_low_u64_be(1);
        let store = InMemoryHeadStore::with_head(hash, 50);
        assert_eq!(store.read_head(), Ok(HeadPointer::new(hash, 50)));
    }

    #[test]
    fn test_head_without_number_is_an_error() {
        let store = InMemoryHeadStore::with_head(H256::from_low_u64_be(1), 50);
        let orphan = H256::from_low_u64_be(9);
        store.write_head(orphan).unwrap();
        assert_eq!(
            store.read_head(),
            Err(StorageError::MissingHeaderNumber(orphan))
        );

        store.write_header_number(orphan, 51).unwrap();
        assert_eq!(store.read_head().unwrap().number, 51);
        assert_eq!(store.read_header_number(&orphan), Ok(Some(51)));
    }

    #[test]
    fn test_transition_marker() {
        let store = InMemoryHeadStore::new();
        store.mark_transition(0).unwrap();
        assert_eq!(store.transition_block(), Ok(Some(0)));
    }
}
