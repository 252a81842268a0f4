//! Well-known addresses and limits.

use alloy_primitives::{Address, B256, address, b256};

/// `address(uint160(uint256(keccak256('hevm cheat code'))))`
pub const CHEATCODE_ADDRESS: Address = address!("0x7109709ECfa91a80626fF3989D68f67F5b1DD12D");

/// System contract that records which bytecode hashes are known.
pub const KNOWN_CODES_STORAGE_ADDRESS: Address =
    address!("0x0000000000000000000000000000000000008004");

/// System contract holding base token balances.
pub const L2_BASE_TOKEN_ADDRESS: Address = address!("0x000000000000000000000000000000000000800a");

/// Pseudo-address of ETH in token queries.
pub const ETH_TOKEN_ADDRESS: Address = Address::ZERO;

/// `keccak256("MarkedAsKnown(bytes32,bool)")`
pub const MARKED_AS_KNOWN_TOPIC: B256 =
    b256!("0xc94722ff13eacf53547c4741dab5228353a05938ffcdd5d4a2d533ae0e618287");

/// Maximum depth of nested calls, the outermost frame being depth 0.
pub const MAX_CALL_DEPTH: usize = 1024;

/// Returns `true` for addresses in the reserved system range `0x0..=0xffff`.
pub fn is_system_address(address: &Address) -> bool {
    address[..18].iter().all(|byte| *byte == 0)
}
