//! Seam between the node and whatever executes account code.
//!
//! The node drives execution and owns all state. A [`CodeRunner`] interprets the code of one
//! frame and talks back to the node through the [`Host`] it is handed.

use alloy_primitives::{Address, B256, Bytes, U256, hex};
use alloy_sol_types::{Revert, SolError};
use std::fmt;

/// Reason a frame stopped without returning or reverting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HaltReason {
    #[error("max call depth exceeded")]
    CallDepthExceeded,
    #[error("state change during static call")]
    StaticStateChange,
    #[error("insufficient funds for value transfer")]
    OutOfFunds,
    #[error("invalid bytecode")]
    InvalidCode,
    #[error("internal error")]
    Internal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallStatus {
    Success,
    Revert,
    Halt(HaltReason),
}

/// Result of executing a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOutcome {
    pub status: CallStatus,
    pub output: Bytes,
}

impl CallOutcome {
    pub fn success(output: impl Into<Bytes>) -> Self {
        Self { status: CallStatus::Success, output: output.into() }
    }

    pub fn revert(output: impl Into<Bytes>) -> Self {
        Self { status: CallStatus::Revert, output: output.into() }
    }

    /// Reverts with an ABI encoded `Error(string)`.
    pub fn revert_with_reason(reason: impl Into<String>) -> Self {
        Self::revert(Revert { reason: reason.into() }.abi_encode())
    }

    pub fn halt(reason: HaltReason) -> Self {
        Self { status: CallStatus::Halt(reason), output: Bytes::new() }
    }

    pub fn is_success(&self) -> bool {
        self.status == CallStatus::Success
    }

    /// Human readable failure reason, `None` on success.
    ///
    /// `Error(string)` payloads are decoded, other revert data is shown as hex.
    pub fn revert_reason(&self) -> Option<String> {
        match self.status {
            CallStatus::Success => None,
            CallStatus::Revert => Some(
                Revert::abi_decode(&self.output)
                    .map(|revert| revert.reason)
                    .unwrap_or_else(|_| hex::encode_prefixed(&self.output)),
            ),
            CallStatus::Halt(reason) => Some(reason.to_string()),
        }
    }
}

/// Node services available to running code.
pub trait Host {
    /// Address of the executing account.
    fn address(&self) -> Address;
    /// `msg.sender`, after the call-context override.
    fn msg_sender(&self) -> Address;
    /// `tx.origin`, after the call-context override.
    fn tx_origin(&self) -> Address;
    fn call_value(&self) -> U256;
    fn block_number(&self) -> u64;
    fn block_timestamp(&self) -> u64;
    fn chain_id(&self) -> u64;
    fn balance(&self, address: &Address) -> U256;
    fn sload(&self, slot: B256) -> B256;
    fn sstore(&mut self, slot: B256, value: B256) -> Result<(), HaltReason>;
    fn emit_log(&mut self, topics: Vec<B256>, data: Bytes) -> Result<(), HaltReason>;
    /// Calls `to`. A failed call reverts its own writes only.
    fn call(&mut self, to: Address, input: Bytes, value: U256) -> CallOutcome;
    fn static_call(&mut self, to: Address, input: Bytes) -> CallOutcome;
}

/// Executes account code.
pub trait CodeRunner: Send + Sync + fmt::Debug {
    fn run(&self, code: &Bytes, input: &Bytes, host: &mut dyn Host) -> CallOutcome;
}
