//! JSON scripted contracts.
//!
//! A [`Script`] is serialized to JSON and padded with spaces into valid bytecode, so it can be
//! deployed and etched like any other code. [`ScriptRunner`] executes it against a [`Host`].

use alloy_primitives::{Address, B256, Bytes, U256};
use era_sandbox_core::{CallOutcome, CodeRunner, HaltReason, Host, bytecode::pad_to_bytecode};
use serde::{Deserialize, Serialize};

/// A single scripted instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Sstore {
        slot: B256,
        value: B256,
    },
    /// Reads `slot` of the executing contract into the output.
    Sload {
        slot: B256,
    },
    /// Stores `msg.sender`.
    StoreSender {
        slot: B256,
    },
    /// Stores `tx.origin`.
    StoreOrigin {
        slot: B256,
    },
    StoreBlockNumber {
        slot: B256,
    },
    StoreTimestamp {
        slot: B256,
    },
    StoreCallValue {
        slot: B256,
    },
    Log {
        topics: Vec<B256>,
        #[serde(default)]
        data: Bytes,
    },
    /// Calls `to`, reverting with the callee's output if it fails.
    Call {
        to: Address,
        #[serde(default)]
        input: Bytes,
        #[serde(default)]
        value: U256,
    },
    /// Calls `to` and stores 1 in `slot` on success, 0 otherwise.
    TryCall {
        to: Address,
        #[serde(default)]
        input: Bytes,
        #[serde(default)]
        value: U256,
        slot: B256,
    },
    StaticCall {
        to: Address,
        #[serde(default)]
        input: Bytes,
    },
    Revert {
        reason: String,
    },
    Return {
        data: Bytes,
    },
}

/// A list of [`Op`]s. Without an explicit `return`, the output of the last call or storage read
/// is returned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script(pub Vec<Op>);

impl Script {
    pub fn new(ops: impl IntoIterator<Item = Op>) -> Self {
        Self(ops.into_iter().collect())
    }

    /// Encodes the script as deployable bytecode.
    pub fn into_code(self) -> Bytes {
        let json = serde_json::to_vec(&self.0).unwrap_or_default();
        pad_to_bytecode(&json, b' ').into()
    }

    /// Parses bytecode produced by [`Self::into_code`].
    pub fn from_code(code: &[u8]) -> Option<Self> {
        serde_json::from_slice(code).ok()
    }
}

/// [`CodeRunner`] interpreting [`Script`] bytecode.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptRunner;

impl ScriptRunner {
    fn word(value: U256) -> B256 {
        B256::from(value)
    }
}

impl CodeRunner for ScriptRunner {
    fn run(&self, code: &Bytes, _input: &Bytes, host: &mut dyn Host) -> CallOutcome {
        let Some(Script(ops)) = Script::from_code(code) else {
            trace!(address = ?host.address(), "code is not a script");
            return CallOutcome::halt(HaltReason::InvalidCode);
        };

        let mut last_output = Bytes::new();
        for op in ops {
            let stored = match op {
                Op::Sstore { slot, value } => host.sstore(slot, value),
                Op::Sload { slot } => {
                    last_output = Bytes::copy_from_slice(host.sload(slot).as_slice());
                    Ok(())
                }
                Op::StoreSender { slot } => {
                    let sender = host.msg_sender();
                    host.sstore(slot, sender.into_word())
                }
                Op::StoreOrigin { slot } => {
                    let origin = host.tx_origin();
                    host.sstore(slot, origin.into_word())
                }
                Op::StoreBlockNumber { slot } => {
                    let number = U256::from(host.block_number());
                    host.sstore(slot, Self::word(number))
                }
                Op::StoreTimestamp { slot } => {
                    let timestamp = U256::from(host.block_timestamp());
                    host.sstore(slot, Self::word(timestamp))
                }
                Op::StoreCallValue { slot } => {
                    let value = host.call_value();
                    host.sstore(slot, Self::word(value))
                }
                Op::Log { topics, data } => host.emit_log(topics, data),
                Op::Call { to, input, value } => {
                    let outcome = host.call(to, input, value);
                    if !outcome.is_success() {
                        return CallOutcome::revert(outcome.output);
                    }
                    last_output = outcome.output;
                    Ok(())
                }
                Op::TryCall { to, input, value, slot } => {
                    let outcome = host.call(to, input, value);
                    let flag = U256::from(outcome.is_success() as u8);
                    last_output = outcome.output;
                    host.sstore(slot, Self::word(flag))
                }
                Op::StaticCall { to, input } => {
                    let outcome = host.static_call(to, input);
                    if !outcome.is_success() {
                        return CallOutcome::revert(outcome.output);
                    }
                    last_output = outcome.output;
                    Ok(())
                }
                Op::Revert { reason } => return CallOutcome::revert_with_reason(reason),
                Op::Return { data } => return CallOutcome::success(data),
            };
            if let Err(reason) = stored {
                return CallOutcome::halt(reason);
            }
        }
        CallOutcome::success(last_output)
    }
}
