use alloy_primitives::{Address, U256};
use era_sandbox_core::{InvalidBytecodeError, StateError};

/// Reasons a request is rejected before it is executed.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("nonce too low: account {address} has nonce {expected}, got {actual}")]
    NonceTooLow { address: Address, expected: u64, actual: u64 },
    #[error("nonce too high: account {address} has nonce {expected}, got {actual}")]
    NonceTooHigh { address: Address, expected: u64, actual: u64 },
    #[error("insufficient funds for transfer: balance {balance}, value {value}")]
    InsufficientFunds { balance: U256, value: U256 },
    #[error("invalid factory dependency: {0}")]
    InvalidFactoryDep(#[from] InvalidBytecodeError),
    #[error("call request has no recipient")]
    MissingRecipient,
    #[error(transparent)]
    State(#[from] StateError),
}
