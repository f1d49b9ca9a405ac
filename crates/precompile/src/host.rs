//! Host execution context consumed by the precompile.

use alloy_primitives::U256;
use randomparty_state::StateDB;

/// What the host VM exposes to a precompile call.
///
/// The host owns the account state and the block environment; the precompile
/// reaches both through this trait and nothing else. Block time is the only
/// temporal input — it is monotonic across blocks but may repeat — so every
/// state transition is a pure function of the call inputs and the store.
pub trait AccessibleState {
    /// Concrete state store supplied by the host.
    type Db: StateDB;

    /// Mutable access to the account state store.
    fn state_db(&mut self) -> &mut Self::Db;

    /// Timestamp of the enclosing block, in seconds since the epoch.
    fn block_time(&self) -> U256;
}
