use crate::error::RpcResult;
use async_trait::async_trait;
use era_sandbox_node::InMemoryNodeInner;
use parking_lot::RwLock;
use std::sync::Arc;

/// Block and time management methods of the `evm` namespace.
#[async_trait]
pub trait EvmNamespaceT {
    /// Mines an empty block. Always returns `"0x0"`.
    async fn evm_mine(&self) -> RpcResult<String>;

    /// Moves the timestamp of the next block forward by `time_delta_seconds`, saturating at
    /// `u64::MAX`. Returns the delta.
    async fn increase_time(&self, time_delta_seconds: u64) -> RpcResult<u64>;

    /// Sets the timestamp of the next block. Returns the difference to the previous timestamp.
    async fn set_time(&self, time: u64) -> RpcResult<i64>;
}

#[derive(Clone, Debug)]
pub struct EvmNamespace {
    node: Arc<RwLock<InMemoryNodeInner>>,
}

impl EvmNamespace {
    pub fn new(node: Arc<RwLock<InMemoryNodeInner>>) -> Self {
        Self { node }
    }
}

#[async_trait]
impl EvmNamespaceT for EvmNamespace {
    async fn evm_mine(&self) -> RpcResult<String> {
        let block = self.node.write().mine_block();
        info!("👷 Mined block #{}", block.number);
        Ok("0x0".to_string())
    }

    async fn increase_time(&self, time_delta_seconds: u64) -> RpcResult<u64> {
        if time_delta_seconds == 0 {
            return Ok(time_delta_seconds);
        }
        Ok(self.node.write().increase_time(time_delta_seconds))
    }

    async fn set_time(&self, time: u64) -> RpcResult<i64> {
        Ok(self.node.write().set_time(time))
    }
}
