use crate::test_helpers::*;
use alloy_primitives::{Address, B256, Bytes, U256};
use era_sandbox_core::{
    LogFilter,
    constants::{KNOWN_CODES_STORAGE_ADDRESS, MARKED_AS_KNOWN_TOPIC},
    hash_bytecode,
};
use era_sandbox_node::{NodeError, TransactionRequest, TransactionStatus};
use era_sandbox_test_utils::{Op, Script, address_word, u64_word};
use similar_asserts::assert_eq;

#[test]
fn value_transfer_to_account_without_code() {
    let node = node();
    let to = Address::repeat_byte(0x42);
    let before = node.balance(&wallet());
    let value = U256::from(1_000);

    let hash = node
        .submit_transaction(TransactionRequest {
            from: wallet(),
            to: Some(to),
            value,
            nonce: Some(0),
            ..Default::default()
        })
        .unwrap();

    let record = node.transaction(&hash).unwrap();
    assert_eq!(record.status, TransactionStatus::Included);
    assert_eq!(record.nonce, 0);
    assert_eq!(record.block_number, Some(1));
    assert_eq!(record.received_at, 1001);
    assert_eq!(record.gas_used, 21_000);
    assert!(record.output.is_empty());
    assert_eq!(node.balance(&to), value);
    assert_eq!(node.balance(&wallet()), before - value);
    assert_eq!(node.nonce(&wallet()), 1);
    assert_eq!(node.block(1).unwrap().transactions, vec![hash]);
}

#[test]
fn deployment_registers_known_code() {
    let node = node();
    let script = Script::new([Op::Sstore { slot: slot(1), value: slot(2) }]);
    let code = script.clone().into_code();
    let code_hash = hash_bytecode(&code).unwrap();

    let hash = node
        .submit_transaction(TransactionRequest {
            from: wallet(),
            input: code.clone(),
            ..Default::default()
        })
        .unwrap();
    let record = node.transaction(&hash).unwrap();
    let address = wallet().create(0);
    assert_eq!(record.status, TransactionStatus::Included);
    assert_eq!(record.contract_address, Some(address));
    assert_eq!(record.output, Bytes::copy_from_slice(address_word(address).as_slice()));
    assert_eq!(node.code(&address), Some(code.clone()));
    assert_eq!(node.bytecode_by_hash(&code_hash), Some(code));

    assert_eq!(record.logs.len(), 1);
    let log = &record.logs[0];
    assert_eq!(log.entry.address, KNOWN_CODES_STORAGE_ADDRESS);
    assert_eq!(log.entry.topics, vec![MARKED_AS_KNOWN_TOPIC, code_hash, B256::ZERO]);
    assert_eq!(log.transaction_hash, hash);

    // same bytes deployed again: no new registration log
    let second = deploy(&node, script);
    assert_eq!(second, wallet().create(1));
    let logs = node.get_logs(&LogFilter {
        address: Some(KNOWN_CODES_STORAGE_ADDRESS),
        ..Default::default()
    });
    assert_eq!(logs.len(), 1);
}

#[test]
fn failed_transaction_keeps_nonce_and_discards_writes() {
    let node = node();
    let target = deploy(
        &node,
        Script::new([
            Op::Sstore { slot: slot(1), value: slot(1) },
            Op::Log { topics: vec![slot(9)], data: Bytes::new() },
            Op::Revert { reason: "boom".to_string() },
        ]),
    );
    let nonce = node.nonce(&wallet());

    let record = send(&node, target);
    assert_eq!(record.status, TransactionStatus::Failed);
    assert_eq!(record.revert_reason.as_deref(), Some("boom"));
    assert!(record.logs.is_empty());
    assert_eq!(node.storage(&target, slot(1)), B256::ZERO);
    assert_eq!(node.nonce(&wallet()), nonce + 1);
}

#[test]
fn invalid_requests_are_rejected_before_execution() {
    let node = node();
    let latest = node.latest_block().unwrap();

    let err = node
        .submit_transaction(TransactionRequest {
            from: wallet(),
            to: Some(Address::repeat_byte(1)),
            factory_deps: vec![Bytes::from(vec![0u8; 64])],
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, NodeError::InvalidFactoryDep(_)));

    let err = node
        .submit_transaction(TransactionRequest {
            from: Address::repeat_byte(0x77),
            to: Some(Address::repeat_byte(1)),
            value: U256::from(1),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, NodeError::InsufficientFunds { .. }));

    assert_eq!(node.nonce(&wallet()), 0);
    assert_eq!(node.latest_block(), Some(latest));
}

#[test]
fn factory_deps_become_known_codes() {
    let node = node();
    let dep = Script::new([Op::Return { data: Bytes::from_static(b"dep") }]).into_code();
    let dep_hash = hash_bytecode(&dep).unwrap();
    assert_eq!(node.bytecode_by_hash(&dep_hash), None);

    node.submit_transaction(TransactionRequest {
        from: wallet(),
        to: Some(Address::repeat_byte(1)),
        factory_deps: vec![dep.clone()],
        ..Default::default()
    })
    .unwrap();
    assert_eq!(node.bytecode_by_hash(&dep_hash), Some(dep));
}

#[test]
fn call_discards_changes() {
    let node = node();
    let target = deploy(
        &node,
        Script::new([
            Op::StoreSender { slot: slot(1) },
            Op::Return { data: Bytes::from_static(b"ok") },
        ]),
    );
    let block = node.block_context();

    let outcome = node
        .call(&TransactionRequest { from: wallet(), to: Some(target), ..Default::default() })
        .unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.output, Bytes::from_static(b"ok"));
    assert_eq!(node.storage(&target, slot(1)), B256::ZERO);
    assert_eq!(node.block_context(), block);

    let err = node.call(&TransactionRequest { from: wallet(), ..Default::default() }).unwrap_err();
    assert!(matches!(err, NodeError::MissingRecipient));
}

#[test]
fn contract_reads_frame_context() {
    let node = node();
    let target = deploy(
        &node,
        Script::new([
            Op::StoreSender { slot: slot(1) },
            Op::StoreOrigin { slot: slot(2) },
            Op::StoreBlockNumber { slot: slot(3) },
            Op::StoreTimestamp { slot: slot(4) },
            Op::StoreCallValue { slot: slot(5) },
        ]),
    );
    let block = node.block_context();

    node.submit_transaction(TransactionRequest {
        from: wallet(),
        to: Some(target),
        value: U256::from(5),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(node.storage(&target, slot(1)), address_word(wallet()));
    assert_eq!(node.storage(&target, slot(2)), address_word(wallet()));
    assert_eq!(node.storage(&target, slot(3)), u64_word(block.number));
    assert_eq!(node.storage(&target, slot(4)), u64_word(block.timestamp));
    assert_eq!(node.storage(&target, slot(5)), u64_word(5));
    assert_eq!(node.balance(&target), U256::from(5));
}

#[test]
fn logs_are_filtered() {
    let node = node();
    let (first, second) = (slot(0xa1), slot(0xa2));
    let emitter = deploy(&node, Script::new([Op::Log { topics: vec![first], data: Bytes::new() }]));
    let other = deploy(&node, Script::new([Op::Log { topics: vec![second], data: Bytes::new() }]));

    let emitted = send(&node, emitter).block_number.unwrap();
    send(&node, other);
    send(&node, emitter);

    let by_address = node.get_logs(&LogFilter { address: Some(emitter), ..Default::default() });
    assert_eq!(by_address.len(), 2);
    assert!(by_address.iter().all(|log| log.entry.topics == vec![first]));

    let by_topic = node.get_logs(&LogFilter { topic0: Some(second), ..Default::default() });
    assert_eq!(by_topic.len(), 1);

    let in_range = node.get_logs(&LogFilter {
        address: Some(emitter),
        from_block: Some(emitted),
        to_block: Some(emitted),
        ..Default::default()
    });
    assert_eq!(in_range.len(), 1);
    assert_eq!(in_range[0].block_number, emitted);
}

#[test]
fn mine_block_advances_by_one() {
    let node = node();
    let start = node.block_context();
    let mined = node.mine_block();
    assert_eq!((mined.number, mined.timestamp), (start.number, start.timestamp));
    let next = node.block_context();
    assert_eq!(next.number, start.number + 1);
    assert!(next.timestamp > start.timestamp);
    assert!(mined.transactions.is_empty());
}

#[test]
fn resubmission_after_nonce_reset_keeps_finalized_record() {
    let node = node();
    let request = TransactionRequest {
        from: wallet(),
        to: Some(Address::repeat_byte(0x42)),
        value: U256::from(1),
        ..Default::default()
    };

    let first_hash = node.submit_transaction(request.clone()).unwrap();
    let first = node.transaction(&first_hash).unwrap();
    node.get_inner().write().set_nonce(wallet(), 0);
    let second_hash = node.submit_transaction(request).unwrap();

    assert_ne!(first_hash, second_hash);
    assert_eq!(node.transaction(&first_hash).unwrap(), first);
    assert_eq!(node.transaction(&second_hash).unwrap().nonce, 0);
    assert_eq!(node.block(first.block_number.unwrap()).unwrap().transactions, vec![first_hash]);
}

#[test]
fn managed_code_registration_is_logged_with_next_transaction() {
    let node = node();
    let script = Script::new([Op::Return { data: Bytes::from_static(b"managed") }]);
    let code = script.clone().into_code();
    let code_hash = hash_bytecode(&code).unwrap();

    node.get_inner().write().set_code(Address::repeat_byte(0x77), &code).unwrap();
    assert_eq!(node.bytecode_by_hash(&code_hash), Some(code));

    // already known, so the deployment itself registers nothing new
    let hash = node
        .submit_transaction(TransactionRequest {
            from: wallet(),
            input: script.into_code(),
            ..Default::default()
        })
        .unwrap();
    let record = node.transaction(&hash).unwrap();
    let marked: Vec<_> = record
        .logs
        .iter()
        .filter(|log| log.entry.topics.first() == Some(&MARKED_AS_KNOWN_TOPIC))
        .collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].entry.topics[1], code_hash);
    assert_eq!(marked[0].transaction_hash, hash);

    let logs = node.get_logs(&LogFilter {
        address: Some(KNOWN_CODES_STORAGE_ADDRESS),
        ..Default::default()
    });
    assert_eq!(logs.len(), 1);
}
