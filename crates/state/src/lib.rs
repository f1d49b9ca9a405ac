//! Account and word-store abstraction for the random party precompile.
//!
//! The precompile keeps every persistent word under its own address in the
//! host chain's account state. This crate defines the narrow slice of that
//! state the precompile actually needs — per-address 32-byte key/value slots
//! plus wei balances — and provides an in-memory implementation for tests
//! and local development.
//!
//! Host integrations implement [`StateDB`] over their real state trie; the
//! precompile never observes anything else about the chain.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod memory;

pub use memory::InMemoryStateDB;

use alloy_primitives::{Address, B256, U256};

/// Word-addressable account state store.
///
/// Semantics required from implementations:
/// - an unset slot reads as all-zeros, and storing all-zeros is
///   indistinguishable from deleting the slot;
/// - balances are unsigned 256-bit wei amounts;
/// - all operations are infallible and deterministic.
pub trait StateDB {
    /// Read the 32-byte value stored at `key` under `address`.
    fn get_state(&self, address: Address, key: B256) -> B256;

    /// Write a 32-byte value at `key` under `address`. Writing all-zeros
    /// deletes the slot.
    fn set_state(&mut self, address: Address, key: B256, value: B256);

    /// Whether an account exists at `address`.
    fn exists(&self, address: Address) -> bool;

    /// Create an empty account at `address`. No-op if it already exists.
    fn create_account(&mut self, address: Address);

    /// Wei balance of `address` (zero for absent accounts).
    fn get_balance(&self, address: Address) -> U256;

    /// Credit `amount` wei to `address`.
    fn add_balance(&mut self, address: Address, amount: U256);
}
