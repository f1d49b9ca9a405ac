//! Activation configuration for the random party precompile.

use alloy_primitives::{Address, U256};
use randomparty_state::StateDB;
use serde::{Deserialize, Serialize};

use crate::params::RANDOM_PARTY_ADDRESS;
use crate::storage::{self, COMMIT_STAKE_SLOT, PHASE_SECONDS_SLOT};

/// Parameters applied once when the precompile activates.
///
/// The chain's upgrade config carries one of these; at the activation
/// timestamp the host calls [`RandomPartyConfig::configure`] exactly once to
/// persist the parameters into the word store, where every later operation
/// reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomPartyConfig {
    /// Block timestamp at which the precompile becomes callable.
    pub block_timestamp: U256,
    /// Duration of the commit window and of the reveal window, in seconds.
    /// One hour is the recommended production value.
    pub phase_seconds: U256,
    /// Wei a committer must attach to `commit`; refunded on reveal.
    pub commit_stake: U256,
}

impl RandomPartyConfig {
    /// Address the configuration applies to.
    pub fn address(&self) -> Address {
        RANDOM_PARTY_ADDRESS
    }

    /// Timestamp at which the precompile should be enabled.
    pub fn timestamp(&self) -> U256 {
        self.block_timestamp
    }

    /// Persist the phase duration and commit stake into the word store.
    pub fn configure<S: StateDB>(&self, state: &mut S) {
        set_phase_seconds(state, self.phase_seconds);
        set_commit_stake(state, self.commit_stake);
    }
}

/// Write the phase duration. Public so tests can seed state directly.
pub fn set_phase_seconds<S: StateDB>(state: &mut S, phase_seconds: U256) {
    storage::store_u256(state, storage::slot(PHASE_SECONDS_SLOT), phase_seconds);
}

/// Write the commit stake. Public so tests can seed state directly.
pub fn set_commit_stake<S: StateDB>(state: &mut S, commit_stake: U256) {
    storage::store_u256(state, storage::slot(COMMIT_STAKE_SLOT), commit_stake);
}

#[cfg(test)]
mod tests {
    use super::*;
    use randomparty_state::InMemoryStateDB;

    #[test]
    fn test_configure_persists_parameters() {
        let config = RandomPartyConfig {
            block_timestamp: U256::ZERO,
            phase_seconds: U256::from(3600),
            commit_stake: U256::from(1000),
        };

        let mut db = InMemoryStateDB::new();
        config.configure(&mut db);

        assert_eq!(
            storage::load_u256(&db, storage::slot(PHASE_SECONDS_SLOT)),
            U256::from(3600)
        );
        assert_eq!(
            storage::load_u256(&db, storage::slot(COMMIT_STAKE_SLOT)),
            U256::from(1000)
        );
        assert_eq!(config.address(), RANDOM_PARTY_ADDRESS);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = RandomPartyConfig {
            block_timestamp: U256::from(1_700_000_000u64),
            phase_seconds: U256::from(3600),
            commit_stake: U256::from(1000),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("blockTimestamp"), "camelCase keys: {json}");
        assert!(json.contains("phaseSeconds"));
        assert!(json.contains("commitStake"));

        let parsed: RandomPartyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
