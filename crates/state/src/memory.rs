//! In-memory state store for testing and development.

use std::collections::HashMap;

use alloy_primitives::{Address, B256, U256};

use crate::StateDB;

/// HashMap-backed [`StateDB`].
///
/// Not persistent; intended for tests and local tooling. Zero-valued slots
/// are removed from the map so that storage equality reflects observable
/// state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStateDB {
    balances: HashMap<Address, U256>,
    storage: HashMap<(Address, B256), B256>,
}

impl InMemoryStateDB {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateDB for InMemoryStateDB {
    fn get_state(&self, address: Address, key: B256) -> B256 {
        self.storage
            .get(&(address, key))
            .copied()
            .unwrap_or(B256::ZERO)
    }

    fn set_state(&mut self, address: Address, key: B256, value: B256) {
        if value.is_zero() {
            self.storage.remove(&(address, key));
        } else {
            self.storage.insert((address, key), value);
        }
    }

    fn exists(&self, address: Address) -> bool {
        self.balances.contains_key(&address)
    }

    fn create_account(&mut self, address: Address) {
        self.balances.entry(address).or_insert(U256::ZERO);
    }

    fn get_balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or(U256::ZERO)
    }

    fn add_balance(&mut self, address: Address, amount: U256) {
        let balance = self.balances.entry(address).or_insert(U256::ZERO);
        *balance = balance.saturating_add(amount);
    }
}
