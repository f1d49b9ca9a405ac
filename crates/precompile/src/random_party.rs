//! The random party precompile: an incentivized commit-reveal randomness
//! beacon.
//!
//! A round moves through four phases driven by block time. `start` opens it
//! and fixes the commit and reveal deadlines. During the commit window
//! anyone may stake wei on a hash commitment and sponsors may grow the
//! reward pool. During the reveal window a committer reclaims the stake by
//! publishing the matching preimage. Once the reveal window closes,
//! `compute` folds every revealed preimage into the round result — the
//! keccak-256 of their concatenation — splits the reward pool equally among
//! revealers, and retires the round. `result` and `next` expose the result
//! table to contracts.
//!
//! Stake of a commitment that is never revealed is not returned: withholding
//! a preimage costs the withholder their stake.

use alloy_primitives::{keccak256, Address, B256, U256};
use randomparty_state::StateDB;

use crate::abi::{
    self, COMMIT_SELECTOR, COMPUTE_SELECTOR, NEXT_SELECTOR, RESULT_SELECTOR, REVEAL_SELECTOR,
    REWARD_SELECTOR, SELECTOR_LEN, SPONSOR_SELECTOR, START_SELECTOR,
};
use crate::error::{PrecompileError, PrecompileFailure, PrecompileOutput, PrecompileResult};
use crate::gas;
use crate::host::AccessibleState;
use crate::round::{self, Phase};
use crate::storage::{
    self, indexed_slot, slot, COMMIT_DEADLINE_SLOT, COMMIT_OWNER_SLOT, COMMIT_SLOT,
    COMMIT_STAKE_SLOT, PHASE_SECONDS_SLOT, RESULT_SLOT, REVEAL_DEADLINE_SLOT, REVEAL_SLOT,
    REWARD_SLOT,
};

/// The stateful precompiled contract.
///
/// Carries no state of its own: every mutable word lives in the host store
/// under the precompile address, so any number of instances behave
/// identically.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPartyPrecompile;

impl RandomPartyPrecompile {
    /// Execute a call to the precompile.
    ///
    /// `input` is a 4-byte function selector followed by 32-byte-aligned
    /// arguments. `value` has already been transferred to the precompile by
    /// the host, and `read_only` marks a static call context. Selector
    /// routing happens before any base-gas deduction, so selector errors
    /// return the supplied gas untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn run<A: AccessibleState>(
        &self,
        state: &mut A,
        caller: Address,
        _callee: Address,
        input: &[u8],
        supplied_gas: u64,
        value: U256,
        read_only: bool,
    ) -> PrecompileResult {
        if input.len() < SELECTOR_LEN {
            return Err(PrecompileFailure::new(
                PrecompileError::MissingSelector(input.len()),
                supplied_gas,
            ));
        }
        let selector = [input[0], input[1], input[2], input[3]];
        let args = &input[SELECTOR_LEN..];

        match selector {
            START_SELECTOR => self.start(state, args, supplied_gas, read_only),
            SPONSOR_SELECTOR => self.sponsor(state, args, supplied_gas, value, read_only),
            REWARD_SELECTOR => self.reward(state, args, supplied_gas),
            COMMIT_SELECTOR => self.commit(state, caller, args, supplied_gas, value, read_only),
            REVEAL_SELECTOR => self.reveal(state, args, supplied_gas, read_only),
            COMPUTE_SELECTOR => self.compute(state, args, supplied_gas, read_only),
            RESULT_SELECTOR => self.result(state, args, supplied_gas),
            NEXT_SELECTOR => self.next(state, args, supplied_gas),
            other => Err(PrecompileFailure::new(
                PrecompileError::UnknownFunction(other),
                supplied_gas,
            )),
        }
    }

    /// `start()`: open a round.
    ///
    /// Sweeps the previous round's tables (charged per index), resets the
    /// counters, and derives the two deadlines from block time and the
    /// configured phase duration.
    fn start<A: AccessibleState>(
        &self,
        state: &mut A,
        args: &[u8],
        supplied_gas: u64,
        read_only: bool,
    ) -> PrecompileResult {
        let mut remaining = gas::deduct(supplied_gas, gas::START)?;
        abi::require_empty("start", args).map_err(|e| PrecompileFailure::new(e, remaining))?;

        let now = state.block_time();
        let db = state.state_db();
        if !storage::load_u256(db, slot(COMMIT_DEADLINE_SLOT)).is_zero() {
            return Err(PrecompileFailure::new(
                PrecompileError::RandomPartyUnderway,
                remaining,
            ));
        }
        if read_only {
            return Err(PrecompileFailure::new(
                PrecompileError::WriteProtection,
                remaining,
            ));
        }

        // Sweep the previous round. One charge per index; each index clears
        // both of its slots.
        let commit_count = storage::counter(db, COMMIT_SLOT);
        for i in 0..commit_count {
            remaining = gas::deduct(remaining, gas::DELETE)?;
            storage::store(db, indexed_slot(COMMIT_SLOT, i), B256::ZERO);
            storage::store(db, indexed_slot(COMMIT_OWNER_SLOT, i), B256::ZERO);
        }
        storage::store_u256(db, slot(COMMIT_SLOT), U256::ZERO);

        let reveal_count = storage::counter(db, REVEAL_SLOT);
        for j in 0..reveal_count {
            remaining = gas::deduct(remaining, gas::DELETE)?;
            storage::store(db, indexed_slot(REVEAL_SLOT, j), B256::ZERO);
            storage::store(db, indexed_slot(REWARD_SLOT, j), B256::ZERO);
        }
        storage::store_u256(db, slot(REVEAL_SLOT), U256::ZERO);

        let phase_seconds = storage::load_u256(db, slot(PHASE_SECONDS_SLOT));
        let (commit_deadline, reveal_deadline) = round::deadlines(now, phase_seconds);
        storage::store_u256(db, slot(COMMIT_DEADLINE_SLOT), commit_deadline);
        storage::store_u256(db, slot(REVEAL_DEADLINE_SLOT), reveal_deadline);

        tracing::debug!(%commit_deadline, %reveal_deadline, "random party started");
        Ok(PrecompileOutput::empty(remaining))
    }

    /// `sponsor()`: add the attached value to the reward pool.
    ///
    /// Only valid while the commit window is open. Zero-value sponsorship is
    /// accepted.
    fn sponsor<A: AccessibleState>(
        &self,
        state: &mut A,
        args: &[u8],
        supplied_gas: u64,
        value: U256,
        read_only: bool,
    ) -> PrecompileResult {
        let remaining = gas::deduct(supplied_gas, gas::SPONSOR)?;
        abi::require_empty("sponsor", args).map_err(|e| PrecompileFailure::new(e, remaining))?;

        let now = state.block_time();
        let db = state.state_db();
        match self.phase(db, now) {
            Phase::Idle => {
                return Err(PrecompileFailure::new(
                    PrecompileError::NoRandomPartyStarted,
                    remaining,
                ))
            }
            Phase::Committing => {}
            Phase::Revealing | Phase::ReadyToAggregate => {
                return Err(PrecompileFailure::new(PrecompileError::TooLate, remaining))
            }
        }
        if read_only {
            return Err(PrecompileFailure::new(
                PrecompileError::WriteProtection,
                remaining,
            ));
        }

        let reward = storage::load_u256(db, slot(REWARD_SLOT));
        storage::store_u256(db, slot(REWARD_SLOT), reward.saturating_add(value));
        Ok(PrecompileOutput::empty(remaining))
    }

    /// `reward()`: the sponsor pool of the active round, big-endian.
    fn reward<A: AccessibleState>(
        &self,
        state: &mut A,
        args: &[u8],
        supplied_gas: u64,
    ) -> PrecompileResult {
        let remaining = gas::deduct(supplied_gas, gas::REWARD)?;
        abi::require_empty("reward", args).map_err(|e| PrecompileFailure::new(e, remaining))?;

        let db = state.state_db();
        if storage::load_u256(db, slot(COMMIT_DEADLINE_SLOT)).is_zero() {
            return Err(PrecompileFailure::new(
                PrecompileError::NoRandomPartyStarted,
                remaining,
            ));
        }
        let reward = storage::load_u256(db, slot(REWARD_SLOT));
        Ok(PrecompileOutput::new(abi::encode_uint256(reward), remaining))
    }

    /// `commit(bytes32)`: stake the attached value on a hash commitment.
    ///
    /// Returns the index of the appended commitment. The host has already
    /// transferred `value`; the stake is refunded only through `reveal`.
    fn commit<A: AccessibleState>(
        &self,
        state: &mut A,
        caller: Address,
        args: &[u8],
        supplied_gas: u64,
        value: U256,
        read_only: bool,
    ) -> PrecompileResult {
        let remaining = gas::deduct(supplied_gas, gas::COMMIT)?;

        let now = state.block_time();
        let db = state.state_db();
        match self.phase(db, now) {
            Phase::Idle => {
                return Err(PrecompileFailure::new(
                    PrecompileError::NoRandomPartyStarted,
                    remaining,
                ))
            }
            Phase::Committing => {}
            Phase::Revealing | Phase::ReadyToAggregate => {
                return Err(PrecompileFailure::new(PrecompileError::TooLate, remaining))
            }
        }

        let commitment =
            abi::unpack_commit(args).map_err(|e| PrecompileFailure::new(e, remaining))?;
        if value < storage::load_u256(db, slot(COMMIT_STAKE_SLOT)) {
            return Err(PrecompileFailure::new(
                PrecompileError::InsufficientFunds,
                remaining,
            ));
        }
        if read_only {
            return Err(PrecompileFailure::new(
                PrecompileError::WriteProtection,
                remaining,
            ));
        }

        let count = storage::load_u256(db, slot(COMMIT_SLOT));
        let index = count.saturating_to::<u64>();
        storage::store(db, indexed_slot(COMMIT_SLOT, index), commitment);
        storage::store(db, indexed_slot(COMMIT_OWNER_SLOT, index), caller.into_word());
        storage::store_u256(db, slot(COMMIT_SLOT), count.saturating_add(U256::from(1)));

        Ok(PrecompileOutput::new(abi::encode_uint256(count), remaining))
    }

    /// `reveal(uint256,bytes32)`: publish the preimage for a commitment.
    ///
    /// Refunds the stake to the original committer and enters the preimage
    /// into the randomness pool. The commitment slot is zeroed, which is
    /// what makes a second reveal of the same index detectable: an all-zero
    /// commitment can never be produced by keccak-256.
    fn reveal<A: AccessibleState>(
        &self,
        state: &mut A,
        args: &[u8],
        supplied_gas: u64,
        read_only: bool,
    ) -> PrecompileResult {
        let remaining = gas::deduct(supplied_gas, gas::REVEAL)?;

        let now = state.block_time();
        let db = state.state_db();
        match self.phase(db, now) {
            Phase::Idle => {
                return Err(PrecompileFailure::new(
                    PrecompileError::NoRandomPartyStarted,
                    remaining,
                ))
            }
            Phase::Committing => {
                return Err(PrecompileFailure::new(PrecompileError::TooEarly, remaining))
            }
            Phase::Revealing => {}
            Phase::ReadyToAggregate => {
                return Err(PrecompileFailure::new(PrecompileError::TooLate, remaining))
            }
        }

        let (index, preimage) =
            abi::unpack_reveal(args).map_err(|e| PrecompileFailure::new(e, remaining))?;
        if index >= storage::load_u256(db, slot(COMMIT_SLOT)) {
            return Err(PrecompileFailure::new(
                PrecompileError::NoHashAtIndex(index),
                remaining,
            ));
        }
        let idx = index.saturating_to::<u64>();
        let commitment = storage::load(db, indexed_slot(COMMIT_SLOT, idx));
        if commitment.is_zero() {
            return Err(PrecompileFailure::new(
                PrecompileError::DuplicateReveal,
                remaining,
            ));
        }
        let revealed = keccak256(preimage.as_slice());
        if revealed != commitment {
            return Err(PrecompileFailure::new(
                PrecompileError::HashMismatch {
                    expected: commitment,
                    got: revealed,
                },
                remaining,
            ));
        }
        let owner = Address::from_word(storage::load(db, indexed_slot(COMMIT_OWNER_SLOT, idx)));
        if read_only {
            return Err(PrecompileFailure::new(
                PrecompileError::WriteProtection,
                remaining,
            ));
        }

        let stake = storage::load_u256(db, slot(COMMIT_STAKE_SLOT));
        credit(db, owner, stake);
        storage::store(db, indexed_slot(COMMIT_SLOT, idx), B256::ZERO);
        storage::store(db, indexed_slot(COMMIT_OWNER_SLOT, idx), B256::ZERO);

        let reveal_count = storage::load_u256(db, slot(REVEAL_SLOT));
        let at = reveal_count.saturating_to::<u64>();
        storage::store(db, indexed_slot(REVEAL_SLOT, at), preimage);
        storage::store(db, indexed_slot(REWARD_SLOT, at), owner.into_word());
        storage::store_u256(db, slot(REVEAL_SLOT), reveal_count.saturating_add(U256::from(1)));

        Ok(PrecompileOutput::empty(remaining))
    }

    /// `compute()`: aggregate the round.
    ///
    /// Pays each revealer an equal share of the reward pool, writes
    /// `keccak256(preimage_0 || ... || preimage_{R-1})` into the result
    /// table (the keccak of the empty string when nothing was revealed), and
    /// zeroes the deadlines and the pool. The tables themselves are only
    /// swept by the next `start`.
    fn compute<A: AccessibleState>(
        &self,
        state: &mut A,
        args: &[u8],
        supplied_gas: u64,
        read_only: bool,
    ) -> PrecompileResult {
        let mut remaining = gas::deduct(supplied_gas, gas::COMPUTE)?;

        let now = state.block_time();
        let db = state.state_db();
        match self.phase(db, now) {
            Phase::Idle => {
                return Err(PrecompileFailure::new(
                    PrecompileError::NoRandomPartyStarted,
                    remaining,
                ))
            }
            Phase::Committing | Phase::Revealing => {
                return Err(PrecompileFailure::new(PrecompileError::TooEarly, remaining))
            }
            Phase::ReadyToAggregate => {}
        }
        abi::require_empty("compute", args).map_err(|e| PrecompileFailure::new(e, remaining))?;

        let reveal_count = storage::counter(db, REVEAL_SLOT);
        let reward = storage::load_u256(db, slot(REWARD_SLOT));
        let each_reward = if reveal_count > 0 {
            reward / U256::from(reveal_count)
        } else {
            U256::ZERO
        };
        let paying = !each_reward.is_zero();

        // Per-item gas is charged before the write-protection check, so a
        // static-context simulation pays the same gas as the real call.
        let mut preimages = Vec::with_capacity(32 * reveal_count as usize);
        let mut recipients = Vec::with_capacity(if paying { reveal_count as usize } else { 0 });
        for j in 0..reveal_count {
            remaining = gas::deduct(remaining, gas::COMPUTE_ITEM)?;
            if paying {
                remaining = gas::deduct(remaining, gas::COMPUTE_REWARD)?;
                recipients.push(Address::from_word(storage::load(
                    db,
                    indexed_slot(REWARD_SLOT, j),
                )));
            }
            preimages.extend_from_slice(storage::load(db, indexed_slot(REVEAL_SLOT, j)).as_slice());
        }

        if read_only {
            return Err(PrecompileFailure::new(
                PrecompileError::WriteProtection,
                remaining,
            ));
        }

        for recipient in &recipients {
            credit(db, *recipient, each_reward);
        }

        storage::store_u256(db, slot(COMMIT_DEADLINE_SLOT), U256::ZERO);
        storage::store_u256(db, slot(REVEAL_DEADLINE_SLOT), U256::ZERO);
        // The residual of the integer division stays unpaid; zeroing the
        // pool forfeits it.
        storage::store_u256(db, slot(REWARD_SLOT), U256::ZERO);

        let round_number = storage::load_u256(db, slot(RESULT_SLOT));
        let result = keccak256(&preimages);
        storage::store(
            db,
            indexed_slot(RESULT_SLOT, round_number.saturating_to::<u64>()),
            result,
        );
        storage::store_u256(db, slot(RESULT_SLOT), round_number.saturating_add(U256::from(1)));

        tracing::debug!(round = %round_number, reveals = reveal_count, %result, "random party aggregated");
        Ok(PrecompileOutput::empty(remaining))
    }

    /// `result(uint256)`: the stored result of a round, zero if absent.
    fn result<A: AccessibleState>(
        &self,
        state: &mut A,
        args: &[u8],
        supplied_gas: u64,
    ) -> PrecompileResult {
        let remaining = gas::deduct(supplied_gas, gas::RESULT)?;
        let round_number =
            abi::unpack_result(args).map_err(|e| PrecompileFailure::new(e, remaining))?;

        let db = state.state_db();
        let value = storage::load(
            db,
            indexed_slot(RESULT_SLOT, round_number.saturating_to::<u64>()),
        );
        Ok(PrecompileOutput::new(abi::encode_word(value), remaining))
    }

    /// `next()`: the round number the next completed round will occupy.
    fn next<A: AccessibleState>(
        &self,
        state: &mut A,
        args: &[u8],
        supplied_gas: u64,
    ) -> PrecompileResult {
        let remaining = gas::deduct(supplied_gas, gas::NEXT)?;
        abi::require_empty("next", args).map_err(|e| PrecompileFailure::new(e, remaining))?;

        let db = state.state_db();
        let count = storage::load_u256(db, slot(RESULT_SLOT));
        Ok(PrecompileOutput::new(abi::encode_uint256(count), remaining))
    }

    fn phase<S: StateDB>(&self, db: &S, now: U256) -> Phase {
        let commit_deadline = storage::load_u256(db, slot(COMMIT_DEADLINE_SLOT));
        let reveal_deadline = storage::load_u256(db, slot(REVEAL_DEADLINE_SLOT));
        round::classify(commit_deadline, reveal_deadline, now)
    }
}

/// Credit `amount` wei to `recipient`, creating the account if it does not
/// exist yet.
fn credit<S: StateDB>(db: &mut S, recipient: Address, amount: U256) {
    if !db.exists(recipient) {
        db.create_account(recipient);
    }
    db.add_balance(recipient, amount);
}
