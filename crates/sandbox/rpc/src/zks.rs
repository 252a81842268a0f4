use crate::{
    error::{RpcError, RpcResult},
    types::{CallRequest, TransactionDetails},
};
use alloy_primitives::{Address, B256, Bytes};
use async_trait::async_trait;
use era_sandbox_core::Fee;
use era_sandbox_node::{InMemoryNodeInner, TransactionRecord, TransactionRequest};
use parking_lot::RwLock;
use std::sync::Arc;

/// zkSync specific methods of the `zks` namespace.
#[async_trait]
pub trait ZksNamespaceT {
    async fn estimate_fee(&self, req: CallRequest) -> RpcResult<Fee>;

    /// Returns the USD price of `token_address` as a decimal string.
    async fn get_token_price(&self, token_address: Address) -> RpcResult<String>;

    /// `None` when no transaction with `hash` was submitted.
    async fn get_transaction_details(&self, hash: B256) -> RpcResult<Option<TransactionDetails>>;

    /// Looks up the known-code index. `None` when the hash was never registered.
    async fn get_bytecode_by_hash(&self, hash: B256) -> RpcResult<Option<Bytes>>;

    async fn get_raw_block_transactions(&self, number: u64) -> RpcResult<Vec<TransactionRecord>>;
}

#[derive(Clone, Debug)]
pub struct ZksNamespace {
    node: Arc<RwLock<InMemoryNodeInner>>,
}

impl ZksNamespace {
    pub fn new(node: Arc<RwLock<InMemoryNodeInner>>) -> Self {
        Self { node }
    }
}

#[async_trait]
impl ZksNamespaceT for ZksNamespace {
    async fn estimate_fee(&self, req: CallRequest) -> RpcResult<Fee> {
        let request = TransactionRequest::from(req);
        let fee = self.node.read().estimate_fee(&request);
        trace!(gas_limit = %fee.gas_limit, max_fee_per_gas = %fee.max_fee_per_gas, "estimated fee");
        Ok(fee)
    }

    async fn get_token_price(&self, token_address: Address) -> RpcResult<String> {
        let node = self.node.read();
        match node.config.token_price(&token_address) {
            Some(price) => Ok(price.to_string()),
            None => {
                debug!(?token_address, "token price requested for an unknown token");
                Err(RpcError::resource_not_found(format!(
                    "token price not found for {token_address}"
                )))
            }
        }
    }

    async fn get_transaction_details(&self, hash: B256) -> RpcResult<Option<TransactionDetails>> {
        let node = self.node.read();
        let gas_per_pubdata = node.config.gas_per_pubdata_limit;
        Ok(node.transaction(&hash).map(|record| TransactionDetails::new(record, gas_per_pubdata)))
    }

    async fn get_bytecode_by_hash(&self, hash: B256) -> RpcResult<Option<Bytes>> {
        Ok(self.node.read().state.bytecode_by_hash(&hash).cloned())
    }

    async fn get_raw_block_transactions(&self, number: u64) -> RpcResult<Vec<TransactionRecord>> {
        self.node
            .read()
            .block_transactions(number)
            .ok_or_else(|| RpcError::resource_not_found(format!("block {number} not found")))
    }
}
