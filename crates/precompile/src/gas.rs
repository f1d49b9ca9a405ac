//! Gas costs and the gas meter.
//!
//! Every cost in this module is consensus-critical: validators disagreeing
//! on any value would compute divergent remaining gas and fork.

use crate::error::PrecompileFailure;

/// Base cost of `start()`.
pub const START: u64 = 50_000;

/// Cost per swept table index when `start()` clears the previous round.
pub const DELETE: u64 = 1_000;

/// Base cost of `sponsor()`.
pub const SPONSOR: u64 = 10_000;

/// Base cost of `reward()`.
pub const REWARD: u64 = 5_000;

/// Base cost of `commit(bytes32)`.
pub const COMMIT: u64 = 10_000;

/// Base cost of `reveal(uint256,bytes32)`.
pub const REVEAL: u64 = 10_000;

/// Base cost of `compute()`.
pub const COMPUTE: u64 = 100_000;

/// Cost per revealed preimage folded into the round result.
pub const COMPUTE_ITEM: u64 = 1_000;

/// Additional cost per revealed preimage when a reward is being paid out.
pub const COMPUTE_REWARD: u64 = 1_000;

/// Base cost of `result(uint256)`.
pub const RESULT: u64 = 5_000;

/// Base cost of `next()`.
pub const NEXT: u64 = 5_000;

/// Deduct `cost` from `remaining_gas`.
///
/// Out of gas is fatal for the call: the failure reports zero remaining gas
/// and the host consumes everything that was supplied.
pub fn deduct(remaining_gas: u64, cost: u64) -> Result<u64, PrecompileFailure> {
    remaining_gas
        .checked_sub(cost)
        .ok_or_else(PrecompileFailure::out_of_gas)
}
