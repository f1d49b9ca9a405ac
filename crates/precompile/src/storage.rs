//! Storage layout of the random party precompile.
//!
//! All persistent state lives under [`RANDOM_PARTY_ADDRESS`] in the host
//! word store. Round metadata and counters occupy single-byte-keyed slots;
//! the indexed tables (commitments, owners, preimages, recipients, results)
//! use keys of the form `prefix || '/' || minimal-big-endian(index)`,
//! right-zero-padded to 32 bytes.
//!
//! The key shape is consensus-critical: the delimiter keeps `table[0]`
//! (whose index contributes zero bytes) distinct from the table's counter
//! slot, and the minimal big-endian index encoding must match across
//! validators bit for bit.

use alloy_primitives::{B256, U256};
use randomparty_state::StateDB;

use crate::params::RANDOM_PARTY_ADDRESS;

/// Commit-phase deadline; zero when no round is active.
pub const COMMIT_DEADLINE_SLOT: u8 = 0x01;
/// Reveal-phase deadline; zero when no round is active.
pub const REVEAL_DEADLINE_SLOT: u8 = 0x02;
/// Commitment counter; also the commitment table prefix.
pub const COMMIT_SLOT: u8 = 0x03;
/// Reveal counter; also the preimage table prefix.
pub const REVEAL_SLOT: u8 = 0x04;
/// Completed-round counter; also the result table prefix.
pub const RESULT_SLOT: u8 = 0x05;
/// Configured phase duration in seconds.
pub const PHASE_SECONDS_SLOT: u8 = 0x06;
/// Configured commit stake in wei.
pub const COMMIT_STAKE_SLOT: u8 = 0x07;
/// Commitment owner table prefix (stake refund recipients).
pub const COMMIT_OWNER_SLOT: u8 = 0x08;
/// Sponsor pool balance; also the reward recipient table prefix.
pub const REWARD_SLOT: u8 = 0x09;

const INDEX_DELIMITER: u8 = b'/';

/// Key of a single-byte metadata slot.
pub fn slot(byte: u8) -> B256 {
    let mut key = [0u8; 32];
    key[0] = byte;
    B256::new(key)
}

/// Key of table entry `index` under `prefix`.
///
/// The index contributes its minimal big-endian bytes; index 0 contributes
/// none.
pub fn indexed_slot(prefix: u8, index: u64) -> B256 {
    let mut key = [0u8; 32];
    key[0] = prefix;
    key[1] = INDEX_DELIMITER;
    let be = index.to_be_bytes();
    let skip = (index.leading_zeros() / 8) as usize;
    key[2..2 + (be.len() - skip)].copy_from_slice(&be[skip..]);
    B256::new(key)
}

/// Read a raw word from the precompile's storage.
pub fn load<S: StateDB>(state: &S, key: B256) -> B256 {
    state.get_state(RANDOM_PARTY_ADDRESS, key)
}

/// Write a raw word into the precompile's storage. All-zeros deletes.
pub fn store<S: StateDB>(state: &mut S, key: B256, value: B256) {
    state.set_state(RANDOM_PARTY_ADDRESS, key, value);
}

/// Read a word as an unsigned big-endian 256-bit integer.
pub fn load_u256<S: StateDB>(state: &S, key: B256) -> U256 {
    U256::from_be_bytes(load(state, key).0)
}

/// Write an unsigned 256-bit integer as a big-endian word.
pub fn store_u256<S: StateDB>(state: &mut S, key: B256, value: U256) {
    store(state, key, B256::new(value.to_be_bytes::<32>()));
}

/// Read a table counter for iteration.
///
/// Counters grow one gas-metered append at a time, so any reachable value
/// fits a machine word.
pub fn counter<S: StateDB>(state: &S, slot_byte: u8) -> u64 {
    load_u256(state, slot(slot_byte)).saturating_to::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use randomparty_state::InMemoryStateDB;

    #[test]
    fn test_metadata_slot_key_layout() {
        let key = slot(PHASE_SECONDS_SLOT);
        assert_eq!(key[0], 0x06);
        assert!(key[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_indexed_key_golden_vectors() {
        // Index 0 contributes no bytes.
        let mut expected = [0u8; 32];
        expected[0] = 0x03;
        expected[1] = 0x2f;
        assert_eq!(indexed_slot(COMMIT_SLOT, 0), B256::new(expected));

        // Single significant byte.
        expected[2] = 0x01;
        assert_eq!(indexed_slot(COMMIT_SLOT, 1), B256::new(expected));

        // Leading zero bytes are suppressed, interior zeros kept.
        let mut expected = [0u8; 32];
        expected[0] = 0x05;
        expected[1] = 0x2f;
        expected[2] = 0x01;
        expected[3] = 0x00;
        assert_eq!(indexed_slot(RESULT_SLOT, 256), B256::new(expected));

        let mut expected = [0u8; 32];
        expected[0] = 0x04;
        expected[1] = 0x2f;
        expected[2..5].copy_from_slice(&[0x01, 0x00, 0x02]);
        assert_eq!(indexed_slot(REVEAL_SLOT, 0x010002), B256::new(expected));
    }

    #[test]
    fn test_counter_slot_distinct_from_first_entry() {
        assert_ne!(slot(COMMIT_SLOT), indexed_slot(COMMIT_SLOT, 0));
        assert_ne!(slot(REWARD_SLOT), indexed_slot(REWARD_SLOT, 0));
    }

    #[test]
    fn test_u256_roundtrip_through_store() {
        let mut db = InMemoryStateDB::new();
        let value = U256::from(0xDEAD_BEEFu64);
        store_u256(&mut db, slot(REWARD_SLOT), value);
        assert_eq!(load_u256(&db, slot(REWARD_SLOT)), value);
    }

    #[test]
    fn test_unset_slot_reads_zero() {
        let db = InMemoryStateDB::new();
        assert_eq!(load(&db, indexed_slot(COMMIT_SLOT, 12)), B256::ZERO);
        assert_eq!(counter(&db, COMMIT_SLOT), 0);
    }

    #[test]
    fn test_counter_reads_stored_value() {
        let mut db = InMemoryStateDB::new();
        store_u256(&mut db, slot(REVEAL_SLOT), U256::from(42));
        assert_eq!(counter(&db, REVEAL_SLOT), 42);
    }
}
