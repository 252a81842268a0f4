use alloy_primitives::{Selector, U256};
use alloy_sol_types::{Revert, SolError};
use era_sandbox_core::StateError;

/// Cheatcode result: ABI encoded output on success.
pub type Result<T = Vec<u8>, E = CheatcodeError> = std::result::Result<T, E>;

/// Reasons a cheatcode call reverts.
#[derive(Debug, thiserror::Error)]
pub enum CheatcodeError {
    #[error("cheatcode call is shorter than a selector")]
    MissingSelector,
    #[error("unknown cheatcode with selector {0}")]
    UnknownSelector(Selector),
    #[error("failed to decode cheatcode arguments: {0}")]
    Decode(#[from] alloy_sol_types::Error),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("{name} ({value}) does not fit in 64 bits")]
    ValueOutOfRange { name: &'static str, value: U256 },
    #[error(transparent)]
    State(#[from] StateError),
}

impl CheatcodeError {
    /// Encodes the error as `Error(string)` revert data.
    pub fn abi_encode(&self) -> Vec<u8> {
        Revert { reason: self.to_string() }.abi_encode()
    }
}
