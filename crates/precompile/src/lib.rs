//! Random Party: an incentivized commit-reveal randomness beacon packaged
//! as a stateful precompiled contract.
//!
//! The precompile lives at a fixed address
//! (`0x0300000000000000000000000000000000000000`) inside a deterministic
//! execution environment: every validator must compute identical state
//! transitions, gas usage, and return data from identical inputs. All
//! mutable state is kept in the host's word store under that address — the
//! module itself is stateless.
//!
//! # Protocol
//!
//! 1. `start()` opens a round and fixes the commit and reveal deadlines
//!    (`phaseSeconds` apart).
//! 2. `commit(bytes32)` locks `commitStake` wei on a hash commitment;
//!    `sponsor()` grows the round's reward pool.
//! 3. `reveal(uint256,bytes32)` publishes a preimage, refunding the stake.
//!    Withheld preimages forfeit their stake.
//! 4. `compute()` writes the round result — the keccak-256 of all revealed
//!    preimages concatenated — and splits the reward pool equally among
//!    revealers.
//! 5. `result(uint256)` and `next()` let contracts read completed rounds.
//!
//! # Host integration
//!
//! The host implements [`StateDB`] over its account state and
//! [`AccessibleState`] over its block environment, transfers the call value
//! before invoking [`RandomPartyPrecompile::run`], and applies
//! [`RandomPartyConfig::configure`] once at the activation timestamp.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod abi;
pub mod config;
pub mod error;
pub mod gas;
pub mod host;
pub mod params;
pub mod random_party;
pub mod round;
pub mod storage;

pub use config::{set_commit_stake, set_phase_seconds, RandomPartyConfig};
pub use error::{PrecompileError, PrecompileFailure, PrecompileOutput, PrecompileResult};
pub use host::AccessibleState;
pub use params::RANDOM_PARTY_ADDRESS;
pub use random_party::RandomPartyPrecompile;
pub use round::Phase;

// Re-export the primitive types and the store so hosts and tests do not
// need to spell out the underlying crates.
pub use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
pub use randomparty_state::{InMemoryStateDB, StateDB};
