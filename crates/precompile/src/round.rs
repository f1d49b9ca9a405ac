//! Round phases derived from block time and the stored deadlines.

use alloy_primitives::U256;

/// Where the active round, if any, stands relative to block time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No round is active; only `start` may mutate state.
    Idle,
    /// Before the commit deadline: commitments and sponsorships accepted.
    Committing,
    /// Between the deadlines: reveals accepted.
    Revealing,
    /// Past the reveal deadline: the round awaits aggregation.
    ReadyToAggregate,
}

/// Classify the current phase.
///
/// Both deadlines are zero exactly when no round is active. Boundaries are
/// half-open: the commit deadline itself already belongs to the reveal
/// window, and the reveal deadline to aggregation.
pub fn classify(commit_deadline: U256, reveal_deadline: U256, block_time: U256) -> Phase {
    if commit_deadline.is_zero() || reveal_deadline.is_zero() {
        Phase::Idle
    } else if block_time < commit_deadline {
        Phase::Committing
    } else if block_time < reveal_deadline {
        Phase::Revealing
    } else {
        Phase::ReadyToAggregate
    }
}

/// Deadlines for a round opened at `block_time`: the commit window and the
/// reveal window each last `phase_seconds`.
pub fn deadlines(block_time: U256, phase_seconds: U256) -> (U256, U256) {
    let commit_deadline = block_time.saturating_add(phase_seconds);
    let reveal_deadline = commit_deadline.saturating_add(phase_seconds);
    (commit_deadline, reveal_deadline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn test_idle_when_deadlines_unset() {
        assert_eq!(classify(U256::ZERO, U256::ZERO, u(100)), Phase::Idle);
        // Either deadline being zero means no round, regardless of the other.
        assert_eq!(classify(u(10), U256::ZERO, u(5)), Phase::Idle);
        assert_eq!(classify(U256::ZERO, u(20), u(5)), Phase::Idle);
    }

    #[test]
    fn test_phase_boundaries_are_half_open() {
        let (commit, reveal) = (u(13), u(16));
        assert_eq!(classify(commit, reveal, u(12)), Phase::Committing);
        assert_eq!(classify(commit, reveal, u(13)), Phase::Revealing);
        assert_eq!(classify(commit, reveal, u(15)), Phase::Revealing);
        assert_eq!(classify(commit, reveal, u(16)), Phase::ReadyToAggregate);
        assert_eq!(classify(commit, reveal, u(1000)), Phase::ReadyToAggregate);
    }

    #[test]
    fn test_deadlines_span_two_phase_windows() {
        let (commit, reveal) = deadlines(u(10), u(3));
        assert_eq!(commit, u(13));
        assert_eq!(reveal, u(16));
    }
}
