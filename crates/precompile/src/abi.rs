//! Call encoding and decoding for the random party interface.
//!
//! The wire format is Solidity-compatible: a 4-byte function selector (the
//! low 32 bits of the keccak-256 of the canonical signature) followed by
//! 32-byte-aligned arguments. Return values are single 32-byte words, or
//! empty for operations that return nothing. Length validation is exact:
//! any surplus or missing byte fails the call.

use alloy_primitives::{Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};

use crate::error::PrecompileError;

sol! {
    /// Solidity-facing interface of the random party precompile.
    interface IRandomParty {
        /// Open a new round, fixing the commit and reveal deadlines.
        function start() external;
        /// Add the attached value to the current round's reward pool.
        function sponsor() external payable;
        /// Reward pool of the current round.
        function reward() external view returns (uint256);
        /// Stake the attached value on a hash commitment; returns its index.
        function commit(bytes32 encoded) external payable returns (uint256);
        /// Reveal the preimage for a commitment index, reclaiming the stake.
        function reveal(uint256 index, bytes32 preimage) external;
        /// Aggregate the revealed preimages into the round result.
        function compute() external;
        /// Result of a completed round, or zero if absent.
        function result(uint256 round) external view returns (bytes32);
        /// Round number the next completed round will occupy.
        function next() external view returns (uint256);
    }
}

/// Byte length of a function selector.
pub const SELECTOR_LEN: usize = 4;

/// Selector of `start()`.
pub const START_SELECTOR: [u8; 4] = IRandomParty::startCall::SELECTOR;
/// Selector of `sponsor()`.
pub const SPONSOR_SELECTOR: [u8; 4] = IRandomParty::sponsorCall::SELECTOR;
/// Selector of `reward()`.
pub const REWARD_SELECTOR: [u8; 4] = IRandomParty::rewardCall::SELECTOR;
/// Selector of `commit(bytes32)`.
pub const COMMIT_SELECTOR: [u8; 4] = IRandomParty::commitCall::SELECTOR;
/// Selector of `reveal(uint256,bytes32)`.
pub const REVEAL_SELECTOR: [u8; 4] = IRandomParty::revealCall::SELECTOR;
/// Selector of `compute()`.
pub const COMPUTE_SELECTOR: [u8; 4] = IRandomParty::computeCall::SELECTOR;
/// Selector of `result(uint256)`.
pub const RESULT_SELECTOR: [u8; 4] = IRandomParty::resultCall::SELECTOR;
/// Selector of `next()`.
pub const NEXT_SELECTOR: [u8; 4] = IRandomParty::nextCall::SELECTOR;

const WORD_LEN: usize = 32;

/// Build a `commit(bytes32)` call payload.
pub fn pack_commit(commitment: B256) -> Vec<u8> {
    let mut input = Vec::with_capacity(SELECTOR_LEN + WORD_LEN);
    input.extend_from_slice(&COMMIT_SELECTOR);
    input.extend_from_slice(commitment.as_slice());
    input
}

/// Parse the arguments of `commit(bytes32)`.
pub fn unpack_commit(args: &[u8]) -> Result<B256, PrecompileError> {
    if args.len() != WORD_LEN {
        return Err(PrecompileError::InvalidInputLength {
            op: "commit",
            length: args.len(),
        });
    }
    Ok(B256::from_slice(args))
}

/// Build a `reveal(uint256,bytes32)` call payload.
pub fn pack_reveal(index: U256, preimage: B256) -> Vec<u8> {
    let mut input = Vec::with_capacity(SELECTOR_LEN + 2 * WORD_LEN);
    input.extend_from_slice(&REVEAL_SELECTOR);
    input.extend_from_slice(&index.to_be_bytes::<WORD_LEN>());
    input.extend_from_slice(preimage.as_slice());
    input
}

/// Parse the arguments of `reveal(uint256,bytes32)`.
pub fn unpack_reveal(args: &[u8]) -> Result<(U256, B256), PrecompileError> {
    if args.len() != 2 * WORD_LEN {
        return Err(PrecompileError::InvalidInputLength {
            op: "reveal",
            length: args.len(),
        });
    }
    let index = U256::from_be_slice(&args[..WORD_LEN]);
    let preimage = B256::from_slice(&args[WORD_LEN..]);
    Ok((index, preimage))
}

/// Build a `result(uint256)` call payload.
pub fn pack_result(round: U256) -> Vec<u8> {
    let mut input = Vec::with_capacity(SELECTOR_LEN + WORD_LEN);
    input.extend_from_slice(&RESULT_SELECTOR);
    input.extend_from_slice(&round.to_be_bytes::<WORD_LEN>());
    input
}

/// Parse the argument of `result(uint256)`.
pub fn unpack_result(args: &[u8]) -> Result<U256, PrecompileError> {
    if args.len() != WORD_LEN {
        return Err(PrecompileError::InvalidInputLength {
            op: "result",
            length: args.len(),
        });
    }
    Ok(U256::from_be_slice(args))
}

/// Reject arguments on a zero-argument operation.
pub fn require_empty(op: &'static str, args: &[u8]) -> Result<(), PrecompileError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(PrecompileError::InvalidInputLength {
            op,
            length: args.len(),
        })
    }
}

/// Encode an unsigned integer as a left-zero-padded 32-byte word.
pub fn encode_uint256(value: U256) -> Bytes {
    Bytes::from(value.to_be_bytes::<WORD_LEN>().to_vec())
}

/// Encode a 32-byte word verbatim.
pub fn encode_word(value: B256) -> Bytes {
    Bytes::copy_from_slice(value.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn test_selectors_are_keccak_of_signature() {
        for (signature, selector) in [
            ("start()", START_SELECTOR),
            ("sponsor()", SPONSOR_SELECTOR),
            ("reward()", REWARD_SELECTOR),
            ("commit(bytes32)", COMMIT_SELECTOR),
            ("reveal(uint256,bytes32)", REVEAL_SELECTOR),
            ("compute()", COMPUTE_SELECTOR),
            ("result(uint256)", RESULT_SELECTOR),
            ("next()", NEXT_SELECTOR),
        ] {
            let hash = keccak256(signature.as_bytes());
            assert_eq!(&hash[..SELECTOR_LEN], &selector, "selector of {signature}");
        }
    }

    #[test]
    fn test_selectors_are_distinct() {
        let selectors = [
            START_SELECTOR,
            SPONSOR_SELECTOR,
            REWARD_SELECTOR,
            COMMIT_SELECTOR,
            REVEAL_SELECTOR,
            COMPUTE_SELECTOR,
            RESULT_SELECTOR,
            NEXT_SELECTOR,
        ];
        for (i, a) in selectors.iter().enumerate() {
            for b in &selectors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_commit_roundtrip() {
        let commitment = keccak256(b"preimage");
        let input = pack_commit(commitment);
        assert_eq!(&input[..SELECTOR_LEN], &COMMIT_SELECTOR);
        assert_eq!(unpack_commit(&input[SELECTOR_LEN..]).unwrap(), commitment);
    }

    #[test]
    fn test_commit_matches_sol_encoding() {
        let commitment = keccak256(b"preimage");
        let call = IRandomParty::commitCall {
            encoded: commitment,
        };
        assert_eq!(pack_commit(commitment), call.abi_encode());
    }

    #[test]
    fn test_reveal_roundtrip() {
        let index = U256::from(7);
        let preimage = B256::with_last_byte(0x42);
        let input = pack_reveal(index, preimage);
        assert_eq!(
            unpack_reveal(&input[SELECTOR_LEN..]).unwrap(),
            (index, preimage)
        );
    }

    #[test]
    fn test_reveal_matches_sol_encoding() {
        let index = U256::from(7);
        let preimage = B256::with_last_byte(0x42);
        let call = IRandomParty::revealCall { index, preimage };
        assert_eq!(pack_reveal(index, preimage), call.abi_encode());
    }

    #[test]
    fn test_result_roundtrip() {
        let round = U256::from(3);
        let input = pack_result(round);
        assert_eq!(unpack_result(&input[SELECTOR_LEN..]).unwrap(), round);
    }

    #[test]
    fn test_wrong_lengths_report_observed_length() {
        assert_eq!(
            unpack_commit(&[0u8; 31]).unwrap_err(),
            PrecompileError::InvalidInputLength {
                op: "commit",
                length: 31
            }
        );
        assert_eq!(
            unpack_reveal(&[0u8; 65]).unwrap_err(),
            PrecompileError::InvalidInputLength {
                op: "reveal",
                length: 65
            }
        );
        assert_eq!(
            unpack_result(&[]).unwrap_err(),
            PrecompileError::InvalidInputLength {
                op: "result",
                length: 0
            }
        );
        assert_eq!(
            require_empty("start", &[0u8; 1]).unwrap_err(),
            PrecompileError::InvalidInputLength {
                op: "start",
                length: 1
            }
        );
    }

    #[test]
    fn test_encode_uint256_is_big_endian() {
        let encoded = encode_uint256(U256::from(0x0102u64));
        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[30..], &[0x01, 0x02]);
        assert!(encoded[..30].iter().all(|b| *b == 0));
    }
}
