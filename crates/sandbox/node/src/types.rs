use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use era_sandbox_core::Log;
use serde::{Deserialize, Serialize};

/// A transaction or call submitted to the node.
///
/// A request without `to` deploys `input` as runtime code at the `CREATE` address of the sender.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(default)]
    pub value: U256,
    #[serde(default)]
    pub input: Bytes,
    /// Expected sender nonce. The current nonce is used when absent.
    #[serde(default)]
    pub nonce: Option<u64>,
    /// Bytecodes registered as known codes before execution.
    #[serde(default)]
    pub factory_deps: Vec<Bytes>,
}

impl TransactionRequest {
    /// Hash of the request executed with the given sender nonce.
    ///
    /// `sequence` is the position of the submission on the node. Nonces can be moved backwards,
    /// so the nonce alone does not make two submissions of the same request distinct.
    pub fn hash(&self, nonce: u64, chain_id: u64, sequence: u64) -> B256 {
        let mut preimage = Vec::with_capacity(136 + self.input.len());
        preimage.extend_from_slice(&chain_id.to_be_bytes());
        preimage.extend_from_slice(&sequence.to_be_bytes());
        preimage.extend_from_slice(self.from.as_slice());
        preimage.extend_from_slice(self.to.unwrap_or_default().as_slice());
        preimage.extend_from_slice(&self.value.to_be_bytes::<32>());
        preimage.extend_from_slice(&nonce.to_be_bytes());
        preimage.extend_from_slice(&self.input);
        for dep in &self.factory_deps {
            preimage.extend_from_slice(keccak256(dep).as_slice());
        }
        keccak256(preimage)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Included,
    Failed,
}

/// A transaction known to the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub nonce: u64,
    pub factory_deps: Vec<Bytes>,
    pub status: TransactionStatus,
    pub block_number: Option<u64>,
    /// Timestamp of the block the transaction was received in.
    pub received_at: u64,
    pub gas_used: u64,
    pub fee: U256,
    pub output: Bytes,
    pub revert_reason: Option<String>,
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
}

impl TransactionRecord {
    pub(crate) fn pending(
        hash: B256,
        request: &TransactionRequest,
        nonce: u64,
        received_at: u64,
    ) -> Self {
        Self {
            hash,
            from: request.from,
            to: request.to,
            value: request.value,
            input: request.input.clone(),
            nonce,
            factory_deps: request.factory_deps.clone(),
            status: TransactionStatus::Pending,
            block_number: None,
            received_at,
            gas_used: 0,
            fee: U256::ZERO,
            output: Bytes::new(),
            revert_reason: None,
            contract_address: None,
            logs: Vec::new(),
        }
    }
}

/// A sealed block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub number: u64,
    pub timestamp: u64,
    pub hash: B256,
    pub parent_hash: B256,
    pub transactions: Vec<B256>,
}

impl BlockInfo {
    pub(crate) fn new(
        number: u64,
        timestamp: u64,
        parent_hash: B256,
        transactions: Vec<B256>,
    ) -> Self {
        let mut preimage = Vec::with_capacity(48 + 32 * transactions.len());
        preimage.extend_from_slice(&number.to_be_bytes());
        preimage.extend_from_slice(&timestamp.to_be_bytes());
        preimage.extend_from_slice(parent_hash.as_slice());
        for tx in &transactions {
            preimage.extend_from_slice(tx.as_slice());
        }
        Self { number, timestamp, hash: keccak256(preimage), parent_hash, transactions }
    }
}
