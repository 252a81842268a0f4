//! Test helpers for node integration tests.

use alloy_primitives::{Address, B256};
use era_sandbox_config::SandboxConfig;
use era_sandbox_node::{InMemoryNode, TransactionRecord, TransactionRequest};
use era_sandbox_test_utils::{Script, ScriptRunner, init_tracing, rich_wallet};
use std::sync::Arc;

pub fn node() -> InMemoryNode {
    node_with_config(SandboxConfig::default())
}

pub fn node_with_config(config: SandboxConfig) -> InMemoryNode {
    init_tracing();
    InMemoryNode::new(config, Arc::new(ScriptRunner))
}

/// The sender used by the helpers below.
pub fn wallet() -> Address {
    rich_wallet(0).0
}

/// Deploys `script` from [`wallet`] and returns its address.
pub fn deploy(node: &InMemoryNode, script: Script) -> Address {
    let hash = node
        .submit_transaction(TransactionRequest {
            from: wallet(),
            input: script.into_code(),
            ..Default::default()
        })
        .unwrap();
    node.transaction(&hash).unwrap().contract_address.unwrap()
}

/// Calls `to` from [`wallet`] and returns the finalized record.
pub fn send(node: &InMemoryNode, to: Address) -> TransactionRecord {
    let hash = node
        .submit_transaction(TransactionRequest { from: wallet(), to: Some(to), ..Default::default() })
        .unwrap();
    node.transaction(&hash).unwrap()
}

pub fn slot(n: u8) -> B256 {
    B256::with_last_byte(n)
}
