use crate::error::{RpcError, RpcResult};
use alloy_primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;
use era_sandbox_node::InMemoryNodeInner;
use parking_lot::RwLock;
use std::sync::Arc;

/// Node management methods of the `hardhat` namespace.
#[async_trait]
pub trait HardhatNamespaceT {
    /// Sets the balance of `address` to `balance` wei.
    async fn set_balance(&self, address: Address, balance: U256) -> RpcResult<bool>;

    /// Overwrites the nonce of `address`. The nonce may move backwards but must fit in 64 bits.
    async fn set_nonce(&self, address: Address, nonce: U256) -> RpcResult<bool>;

    /// Replaces the code of `address`. Empty code clears it.
    async fn set_code(&self, address: Address, code: Bytes) -> RpcResult<bool>;

    /// Writes one storage slot of `address`.
    async fn set_storage_at(&self, address: Address, slot: U256, value: U256) -> RpcResult<bool>;
}

#[derive(Clone, Debug)]
pub struct HardhatNamespace {
    node: Arc<RwLock<InMemoryNodeInner>>,
}

impl HardhatNamespace {
    pub fn new(node: Arc<RwLock<InMemoryNodeInner>>) -> Self {
        Self { node }
    }
}

#[async_trait]
impl HardhatNamespaceT for HardhatNamespace {
    async fn set_balance(&self, address: Address, balance: U256) -> RpcResult<bool> {
        self.node.write().set_balance(address, balance);
        info!("👷 Balance for address {address:?} has been manually set to {balance} Wei");
        Ok(true)
    }

    async fn set_nonce(&self, address: Address, nonce: U256) -> RpcResult<bool> {
        let Ok(nonce) = u64::try_from(nonce) else {
            warn!(?address, %nonce, "rejected nonce override");
            return Err(RpcError::invalid_params(format!("nonce {nonce} does not fit in 64 bits")));
        };
        self.node.write().set_nonce(address, nonce);
        info!("👷 Nonce for address {address:?} has been manually set to {nonce}");
        Ok(true)
    }

    async fn set_code(&self, address: Address, code: Bytes) -> RpcResult<bool> {
        let hash = self.node.write().set_code(address, &code)?;
        info!("👷 Code for address {address:?} has been manually set ({hash:?})");
        Ok(true)
    }

    async fn set_storage_at(&self, address: Address, slot: U256, value: U256) -> RpcResult<bool> {
        self.node.write().set_storage(address, B256::from(slot), B256::from(value));
        info!("👷 Storage slot {slot} for address {address:?} has been manually set to {value}");
        Ok(true)
    }
}
