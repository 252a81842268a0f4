use alloy_primitives::{Address, B256, Bytes};
use serde::{Deserialize, Serialize};

/// Event emitted during execution, before it is attached to a transaction.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

impl LogEntry {
    pub fn new(address: Address, topics: Vec<B256>, data: Bytes) -> Self {
        Self { address, topics, data }
    }
}

/// Event included in a sealed block.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(flatten)]
    pub entry: LogEntry,
    pub block_number: u64,
    pub transaction_hash: B256,
    pub log_index: u64,
}

/// Selects logs by block range, emitter and first topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub address: Option<Address>,
    pub topic0: Option<B256>,
}

impl LogFilter {
    pub fn matches(&self, log: &Log) -> bool {
        if self.from_block.is_some_and(|from| log.block_number < from) {
            return false;
        }
        if self.to_block.is_some_and(|to| log.block_number > to) {
            return false;
        }
        if self.address.is_some_and(|address| log.entry.address != address) {
            return false;
        }
        match self.topic0 {
            Some(topic) => log.entry.topics.first() == Some(&topic),
            None => true,
        }
    }
}
