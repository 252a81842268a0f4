use crate::{
    error::RpcError,
    evm::{EvmNamespace, EvmNamespaceT},
    hardhat::{HardhatNamespace, HardhatNamespaceT},
    response::{Id, ResponseResult, RpcResponse, Version},
    serde_helpers::{empty_params, sequence},
    types::CallRequest,
    zks::{ZksNamespace, ZksNamespaceT},
};
use alloy_primitives::{Address, B256, Bytes, U256};
use era_sandbox_node::InMemoryNode;
use serde::{Deserialize, Serialize};

/// Every method served by the sandbox, keyed by its JSON-RPC name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum EraRequest {
    #[serde(rename = "zks_estimateFee", with = "sequence")]
    EstimateFee(CallRequest),

    #[serde(rename = "zks_getTokenPrice", with = "sequence")]
    GetTokenPrice(Address),

    #[serde(rename = "zks_getTransactionDetails", with = "sequence")]
    GetTransactionDetails(B256),

    #[serde(rename = "zks_getBytecodeByHash", with = "sequence")]
    GetBytecodeByHash(B256),

    #[serde(rename = "zks_getRawBlockTransactions", with = "sequence")]
    GetRawBlockTransactions(u64),

    #[serde(rename = "hardhat_setBalance")]
    SetBalance(Address, U256),

    #[serde(rename = "hardhat_setNonce")]
    SetNonce(Address, U256),

    #[serde(rename = "hardhat_setCode")]
    SetCode(Address, Bytes),

    #[serde(rename = "hardhat_setStorageAt")]
    SetStorageAt(Address, U256, U256),

    #[serde(rename = "evm_mine", with = "empty_params")]
    Mine(()),

    #[serde(rename = "evm_increaseTime", with = "sequence")]
    IncreaseTime(u64),

    #[serde(rename = "evm_setTime", with = "sequence")]
    SetTime(u64),
}

/// A JSON-RPC method call as received on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcMethodCall {
    pub jsonrpc: Version,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Id,
}

/// Routes [`EraRequest`]s to the `zks`, `hardhat` and `evm` namespaces of one node.
#[derive(Clone, Debug)]
pub struct EraApi {
    zks: ZksNamespace,
    hardhat: HardhatNamespace,
    evm: EvmNamespace,
}

impl EraApi {
    pub fn new(node: &InMemoryNode) -> Self {
        Self {
            zks: ZksNamespace::new(node.get_inner()),
            hardhat: HardhatNamespace::new(node.get_inner()),
            evm: EvmNamespace::new(node.get_inner()),
        }
    }

    /// Executes the [`EraRequest`] and returns its result.
    pub async fn execute(&self, request: EraRequest) -> ResponseResult {
        trace!(target: "rpc::api", "executing era request {request:?}");
        match request {
            EraRequest::EstimateFee(req) => self.zks.estimate_fee(req).await.into(),
            EraRequest::GetTokenPrice(token) => self.zks.get_token_price(token).await.into(),
            EraRequest::GetTransactionDetails(hash) => {
                self.zks.get_transaction_details(hash).await.into()
            }
            EraRequest::GetBytecodeByHash(hash) => self.zks.get_bytecode_by_hash(hash).await.into(),
            EraRequest::GetRawBlockTransactions(number) => {
                self.zks.get_raw_block_transactions(number).await.into()
            }
            EraRequest::SetBalance(address, balance) => {
                self.hardhat.set_balance(address, balance).await.into()
            }
            EraRequest::SetNonce(address, nonce) => {
                self.hardhat.set_nonce(address, nonce).await.into()
            }
            EraRequest::SetCode(address, code) => self.hardhat.set_code(address, code).await.into(),
            EraRequest::SetStorageAt(address, slot, value) => {
                self.hardhat.set_storage_at(address, slot, value).await.into()
            }
            EraRequest::Mine(()) => self.evm.evm_mine().await.into(),
            EraRequest::IncreaseTime(seconds) => self.evm.increase_time(seconds).await.into(),
            EraRequest::SetTime(time) => self.evm.set_time(time).await.into(),
        }
    }

    /// Parses `method` and `params` into an [`EraRequest`] and executes it.
    ///
    /// Unknown methods yield a method-not-found error, params that do not match the method an
    /// invalid-params error.
    pub async fn handle(&self, method: &str, params: serde_json::Value) -> ResponseResult {
        let call = serde_json::json!({
            "method": method,
            "params": params
        });

        match serde_json::from_value::<EraRequest>(call) {
            Ok(request) => self.execute(request).await,
            Err(err) => {
                let msg = err.to_string();
                warn!(target: "rpc::api", "failed to deserialize method `{method}`: {msg}");
                if msg.contains("unknown variant") {
                    RpcError::method_not_found().into()
                } else {
                    RpcError::invalid_params(msg).into()
                }
            }
        }
    }

    /// Executes a complete method call, echoing its id in the response.
    pub async fn handle_call(&self, call: RpcMethodCall) -> RpcResponse {
        let RpcMethodCall { method, params, id, .. } = call;
        let result = self.handle(&method, params).await;
        RpcResponse::new(id, result)
    }
}
