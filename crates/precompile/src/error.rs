//! Error types and call outcomes for the random party precompile.
//!
//! Errors are never recovered locally. Every failure propagates to the host
//! together with the gas still unspent; the host decides whether the
//! enclosing transaction reverts. Out-of-gas is special-cased by the host
//! (all remaining gas is consumed), so [`PrecompileFailure::out_of_gas`]
//! reports zero.

use alloy_primitives::{Bytes, B256, U256};

/// Outcome of a precompile call.
pub type PrecompileResult = Result<PrecompileOutput, PrecompileFailure>;

/// Successful call outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecompileOutput {
    /// ABI-encoded return data.
    pub output: Bytes,
    /// Gas left after the operation's deductions.
    pub remaining_gas: u64,
}

impl PrecompileOutput {
    /// Outcome with the given return data.
    pub fn new(output: Bytes, remaining_gas: u64) -> Self {
        Self {
            output,
            remaining_gas,
        }
    }

    /// Outcome with empty return data.
    pub fn empty(remaining_gas: u64) -> Self {
        Self::new(Bytes::new(), remaining_gas)
    }
}

/// Failed call outcome: the error plus the gas returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct PrecompileFailure {
    /// What went wrong.
    pub error: PrecompileError,
    /// Gas returned to the caller (zero when gas itself ran out).
    pub remaining_gas: u64,
}

impl PrecompileFailure {
    /// Failure reporting `remaining_gas` back to the caller.
    pub fn new(error: PrecompileError, remaining_gas: u64) -> Self {
        Self {
            error,
            remaining_gas,
        }
    }

    /// Gas exhaustion; all supplied gas is consumed.
    pub fn out_of_gas() -> Self {
        Self::new(PrecompileError::OutOfGas, 0)
    }
}

/// Errors reported by the random party precompile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrecompileError {
    /// A gas deduction underflowed the remaining gas.
    #[error("out of gas")]
    OutOfGas,

    /// A mutating operation was invoked inside a static call context.
    #[error("write protection")]
    WriteProtection,

    /// `start` was called while a round is still active.
    #[error("random party underway")]
    RandomPartyUnderway,

    /// A round-scoped operation was called with no round active.
    #[error("no random party started")]
    NoRandomPartyStarted,

    /// The operation's phase has not begun yet.
    #[error("too early")]
    TooEarly,

    /// The operation's phase has already passed.
    #[error("too late to interact")]
    TooLate,

    /// The commitment at this index was already revealed.
    #[error("duplicate reveal")]
    DuplicateReveal,

    /// `commit` carried less value than the configured stake.
    #[error("insufficient funds for commit stake")]
    InsufficientFunds,

    /// Input length does not match the selector's signature.
    #[error("invalid input length for {op}: {length}")]
    InvalidInputLength {
        /// Operation whose arguments failed to parse.
        op: &'static str,
        /// Observed argument length in bytes.
        length: usize,
    },

    /// `reveal` named an index beyond the commitment table.
    #[error("no hash with index {0}")]
    NoHashAtIndex(U256),

    /// The revealed preimage does not hash to the stored commitment.
    #[error("expected {expected} but got {got}")]
    HashMismatch {
        /// Commitment stored at the revealed index.
        expected: B256,
        /// Keccak-256 of the submitted preimage.
        got: B256,
    },

    /// Input shorter than a 4-byte function selector.
    #[error("missing function selector: input length {0}")]
    MissingSelector(usize),

    /// No operation registered for this selector.
    #[error("no such function: 0x{}", hex::encode(.0))]
    UnknownFunction([u8; 4]),
}
