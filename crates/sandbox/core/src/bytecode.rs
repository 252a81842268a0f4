//! Versioned bytecode hashing.
//!
//! Era addresses contract code by a versioned hash instead of `keccak256`:
//!
//! ```text
//! [0x01, 0x00, word_count as u16 (big endian), sha256(code)[4..32]]
//! ```
//!
//! The code must be made of 32 byte words, and the number of words must be odd and fit in a
//! `u16`.

use alloy_primitives::B256;
use sha2::{Digest, Sha256};

/// Version byte of the bytecode hash.
pub const BYTECODE_HASH_VERSION: u8 = 1;

/// Largest accepted number of 32 byte words.
pub const MAX_BYTECODE_WORDS: usize = (1 << 16) - 1;

/// Bytecode that cannot be hashed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBytecodeError {
    /// Length is not a multiple of 32.
    #[error("bytecode length {0} is not divisible by 32")]
    NotChunkable(usize),
    /// Word count is even.
    #[error("bytecode has an even number of words ({0})")]
    EvenWordCount(usize),
    /// Word count does not fit in a `u16`.
    #[error("bytecode is too long ({0} words)")]
    TooLong(usize),
}

/// Checks that `code` has the shape required for hashing.
pub fn validate_bytecode(code: &[u8]) -> Result<usize, InvalidBytecodeError> {
    if code.len() % 32 != 0 {
        return Err(InvalidBytecodeError::NotChunkable(code.len()));
    }
    let words = code.len() / 32;
    if words > MAX_BYTECODE_WORDS {
        return Err(InvalidBytecodeError::TooLong(words));
    }
    if words % 2 == 0 {
        return Err(InvalidBytecodeError::EvenWordCount(words));
    }
    Ok(words)
}

/// Computes the versioned hash of `code`.
pub fn hash_bytecode(code: &[u8]) -> Result<B256, InvalidBytecodeError> {
    let words = validate_bytecode(code)?;
    let digest = Sha256::digest(code);

    let mut hash = [0u8; 32];
    hash[0] = BYTECODE_HASH_VERSION;
    hash[2..4].copy_from_slice(&(words as u16).to_be_bytes());
    hash[4..].copy_from_slice(&digest[4..]);
    Ok(B256::from(hash))
}

/// Returns the length in words encoded in a versioned hash.
pub fn bytecode_len_in_words(hash: &B256) -> u16 {
    u16::from_be_bytes([hash[2], hash[3]])
}

/// Pads `data` with `filler` up to the nearest valid bytecode length.
pub fn pad_to_bytecode(data: &[u8], filler: u8) -> Vec<u8> {
    let mut words = data.len().div_ceil(32);
    if words % 2 == 0 {
        words += 1;
    }
    let mut code = data.to_vec();
    code.resize(words * 32, filler);
    code
}
