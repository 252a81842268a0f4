//! `zks` lookups after transactions went through the node.

use alloy_primitives::{Address, B256, Bytes, U256};
use era_sandbox_config::SandboxConfig;
use era_sandbox_core::hash_bytecode;
use era_sandbox_node::{InMemoryNode, TransactionRequest};
use era_sandbox_rpc::{
    EraApi, ErrorCode, ResponseResult, ZksNamespace, ZksNamespaceT, types::CallRequest,
};
use era_sandbox_test_utils::{Op, Script, ScriptRunner, init_tracing, rich_wallet};
use serde_json::json;
use similar_asserts::assert_eq;
use std::sync::Arc;

fn node() -> InMemoryNode {
    init_tracing();
    InMemoryNode::new(SandboxConfig::default(), Arc::new(ScriptRunner))
}

#[tokio::test]
async fn transaction_details_follow_the_record() {
    let node = node();
    let api = EraApi::new(&node);
    let (from, _) = rich_wallet(1);
    let failing = Script::new([Op::Revert { reason: "nope".to_string() }]).into_code();
    let hash = node
        .submit_transaction(TransactionRequest { from, input: failing, ..Default::default() })
        .unwrap();
    let contract = node.transaction(&hash).unwrap().contract_address.unwrap();
    let hash = node
        .submit_transaction(TransactionRequest { from, to: Some(contract), ..Default::default() })
        .unwrap();
    let record = node.transaction(&hash).unwrap();

    let ResponseResult::Success(details) =
        api.handle("zks_getTransactionDetails", json!([hash])).await
    else {
        panic!("expected transaction details");
    };
    assert_eq!(details["status"], json!("failed"));
    assert_eq!(details["initiatorAddress"], json!(from));
    assert_eq!(details["isL1Originated"], json!(false));
    assert_eq!(details["fee"], json!(record.fee));
    assert_eq!(details["ethCommitTxHash"], serde_json::Value::Null);

    let unknown = api.handle("zks_getTransactionDetails", json!([B256::repeat_byte(0xee)])).await;
    assert_eq!(unknown, ResponseResult::Success(serde_json::Value::Null));
}

#[tokio::test]
async fn deployed_code_is_served_by_hash() {
    let node = node();
    let zks = ZksNamespace::new(node.get_inner());
    let (from, _) = rich_wallet(2);
    let code = Script::new([Op::Return { data: Bytes::from_static(b"hi") }]).into_code();
    let code_hash = hash_bytecode(&code).unwrap();

    assert_eq!(zks.get_bytecode_by_hash(code_hash).await.unwrap(), None);
    node.submit_transaction(TransactionRequest { from, input: code.clone(), ..Default::default() })
        .unwrap();
    assert_eq!(zks.get_bytecode_by_hash(code_hash).await.unwrap(), Some(code));
}

#[tokio::test]
async fn factory_deps_are_served_by_hash() {
    let node = node();
    let api = EraApi::new(&node);
    let (from, _) = rich_wallet(3);
    let dep = Bytes::from(vec![0x07; 96]);
    let dep_hash = hash_bytecode(&dep).unwrap();

    node.submit_transaction(TransactionRequest {
        from,
        to: Some(Address::repeat_byte(0x01)),
        factory_deps: vec![dep.clone()],
        ..Default::default()
    })
    .unwrap();

    let result = api.handle("zks_getBytecodeByHash", json!([dep_hash])).await;
    assert_eq!(result, ResponseResult::Success(json!(dep)));
}

#[tokio::test]
async fn estimate_fee_grows_with_calldata() {
    let node = node();
    let zks = ZksNamespace::new(node.get_inner());
    let (from, _) = rich_wallet(0);
    let request = |len: usize| CallRequest {
        from: Some(from),
        to: Some(Address::repeat_byte(0x01)),
        data: Some(Bytes::from(vec![0x01; len])),
        ..Default::default()
    };

    let small = zks.estimate_fee(request(1)).await.unwrap();
    let large = zks.estimate_fee(request(1_000)).await.unwrap();
    assert!(large.gas_limit > small.gas_limit);
    assert_eq!(large.max_fee_per_gas, small.max_fee_per_gas);
    assert!(small.max_fee_per_gas > U256::ZERO);
}

#[tokio::test]
async fn raw_block_transactions_over_json() {
    let node = node();
    let api = EraApi::new(&node);
    let (from, _) = rich_wallet(4);
    let hash = node
        .submit_transaction(TransactionRequest {
            from,
            to: Some(Address::repeat_byte(0x01)),
            value: U256::from(5),
            ..Default::default()
        })
        .unwrap();
    let number = node.transaction(&hash).unwrap().block_number.unwrap();

    let ResponseResult::Success(txs) =
        api.handle("zks_getRawBlockTransactions", json!([number])).await
    else {
        panic!("expected block transactions");
    };
    assert_eq!(txs.as_array().map(Vec::len), Some(1));
    assert_eq!(txs[0]["hash"], json!(hash));

    let missing = api.handle("zks_getRawBlockTransactions", json!([9_999])).await;
    let ResponseResult::Error(err) = missing else { panic!("expected an error") };
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
