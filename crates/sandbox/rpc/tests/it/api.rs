//! JSON routing through [`EraApi`].

use alloy_primitives::{Address, U256};
use era_sandbox_config::SandboxConfig;
use era_sandbox_node::InMemoryNode;
use era_sandbox_rpc::{
    EraApi, ErrorCode, ResponseResult, RpcMethodCall,
    response::{Id, RpcResponse},
};
use era_sandbox_test_utils::{ScriptRunner, init_tracing};
use serde_json::json;
use similar_asserts::assert_eq;
use std::sync::Arc;

fn setup() -> (InMemoryNode, EraApi) {
    init_tracing();
    let node = InMemoryNode::new(SandboxConfig::default(), Arc::new(ScriptRunner));
    let api = EraApi::new(&node);
    (node, api)
}

fn error_code(result: &ResponseResult) -> ErrorCode {
    match result {
        ResponseResult::Error(err) => err.code,
        ResponseResult::Success(value) => panic!("expected an error, got {value}"),
    }
}

#[tokio::test]
async fn routes_hardhat_and_evm_methods() {
    let (node, api) = setup();
    let target = Address::repeat_byte(0x42);

    let result = api.handle("hardhat_setBalance", json!([target, "0x539"])).await;
    assert_eq!(result, ResponseResult::Success(json!(true)));
    assert_eq!(node.balance(&target), U256::from(1337));

    let result = api.handle("hardhat_setNonce", json!([target, "0x2a"])).await;
    assert_eq!(result, ResponseResult::Success(json!(true)));
    assert_eq!(node.nonce(&target), 42);

    let before = node.latest_block().unwrap();
    let result = api.handle("evm_mine", serde_json::Value::Null).await;
    assert_eq!(result, ResponseResult::Success(json!("0x0")));
    assert_eq!(node.latest_block().unwrap().number, before.number + 1);

    let next = node.block_context().timestamp;
    let result = api.handle("evm_setTime", json!([next + 100])).await;
    assert_eq!(result, ResponseResult::Success(json!(100)));
    let result = api.handle("evm_increaseTime", json!([25])).await;
    assert_eq!(result, ResponseResult::Success(json!(25)));
    assert_eq!(node.block_context().timestamp, next + 125);
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let (_node, api) = setup();
    let result = api.handle("eth_notAMethod", json!([])).await;
    assert_eq!(error_code(&result), ErrorCode::MethodNotFound);
}

#[tokio::test]
async fn malformed_params_are_invalid_params() {
    let (_node, api) = setup();

    let result = api.handle("zks_getTokenPrice", json!(["not an address"])).await;
    assert_eq!(error_code(&result), ErrorCode::InvalidParams);

    let result = api.handle("evm_setTime", json!([1, 2])).await;
    assert_eq!(error_code(&result), ErrorCode::InvalidParams);

    let result = api.handle("hardhat_setNonce", json!([Address::ZERO, U256::MAX])).await;
    assert_eq!(error_code(&result), ErrorCode::InvalidParams);
}

#[tokio::test]
async fn method_call_echoes_id() {
    let (_node, api) = setup();
    let call: RpcMethodCall = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "zks_getTokenPrice",
        "params": ["0x0000000000000000000000000000000000000000"]
    }))
    .unwrap();

    let response = api.handle_call(call).await;
    assert_eq!(response, RpcResponse::new(Id::Number(7), ResponseResult::Success(json!("1500"))));
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({ "jsonrpc": "2.0", "id": 7, "result": "1500" })
    );
}
