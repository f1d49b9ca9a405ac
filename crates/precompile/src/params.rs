//! Designated address of the random party precompile.

use alloy_primitives::{address, Address};

/// Address the random party precompile is reachable at.
///
/// The chain reserves 0x0200000000000000000000000000000000000000 and up for
/// its allow-list precompile family, incrementing by one per contract. The
/// random party starts a fresh range at 0x0300... so that future additions
/// to the reserved set cannot collide with it.
pub const RANDOM_PARTY_ADDRESS: Address = address!("0300000000000000000000000000000000000000");
