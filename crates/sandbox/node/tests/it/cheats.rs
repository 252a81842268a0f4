//! Cheatcodes called from deployed contracts.

use crate::test_helpers::*;
use alloy_primitives::{Address, B256, Bytes, U256, address};
use alloy_sol_types::SolCall;
use era_cheatcodes::{CHEATCODE_ADDRESS, Vm, utils::decode_trimmed_return_data};
use era_sandbox_config::SandboxConfig;
use era_sandbox_core::{
    BlockContext, Prank, constants::KNOWN_CODES_STORAGE_ADDRESS, hash_bytecode,
};
use era_sandbox_node::{TransactionRequest, TransactionStatus};
use era_sandbox_test_utils::{Op, Script, address_word, u64_word};
use similar_asserts::assert_eq;

fn cheat(call: impl SolCall) -> Op {
    Op::Call { to: CHEATCODE_ADDRESS, input: call.abi_encode().into(), value: U256::ZERO }
}

/// Contract recording `msg.sender` in slot 1 and `tx.origin` in slot 2.
fn recorder_script() -> Script {
    Script::new([Op::StoreSender { slot: slot(1) }, Op::StoreOrigin { slot: slot(2) }])
}

#[test]
fn prank_persists_until_stopped() {
    let node = node();
    let pranker = Address::repeat_byte(0x99);
    let recorder = deploy(&node, recorder_script());
    let untouched = deploy(&node, recorder_script());
    let starter = deploy(
        &node,
        Script::new([
            cheat(Vm::startPrank_0Call { msgSender: pranker }),
            Op::StoreSender { slot: slot(1) },
            Op::Call { to: recorder, input: Bytes::new(), value: U256::ZERO },
        ]),
    );
    let stopper = deploy(&node, Script::new([cheat(Vm::stopPrankCall {})]));

    assert_eq!(send(&node, starter).status, TransactionStatus::Included);
    assert_eq!(node.prank(), Some(Prank { sender: pranker, origin: None }));
    // the frame that started the prank is pranked as well
    assert_eq!(node.storage(&starter, slot(1)), address_word(pranker));
    assert_eq!(node.storage(&recorder, slot(1)), address_word(pranker));
    assert_eq!(node.storage(&recorder, slot(2)), address_word(wallet()));

    // still active in the next transaction
    send(&node, untouched);
    assert_eq!(node.storage(&untouched, slot(1)), address_word(pranker));

    send(&node, stopper);
    assert_eq!(node.prank(), None);
    send(&node, untouched);
    assert_eq!(node.storage(&untouched, slot(1)), address_word(wallet()));

    // stopping again is a no-op
    assert_eq!(send(&node, stopper).status, TransactionStatus::Included);
    assert_eq!(node.prank(), None);
}

#[test]
fn prank_with_origin() {
    let node = node();
    let (sender, origin) = (Address::repeat_byte(0x11), Address::repeat_byte(0x22));
    let recorder = deploy(&node, recorder_script());
    let starter = deploy(
        &node,
        Script::new([
            cheat(Vm::startPrank_1Call { msgSender: sender, txOrigin: origin }),
            Op::Call { to: recorder, input: Bytes::new(), value: U256::ZERO },
        ]),
    );

    send(&node, starter);
    assert_eq!(node.storage(&recorder, slot(1)), address_word(sender));
    assert_eq!(node.storage(&recorder, slot(2)), address_word(origin));
    assert_eq!(node.prank(), Some(Prank { sender, origin: Some(origin) }));
}

#[test]
fn roll_and_warp_are_observed_by_the_caller() {
    let node = node();
    let target = deploy(
        &node,
        Script::new([
            cheat(Vm::rollCall { newHeight: U256::from(50) }),
            cheat(Vm::warpCall { newTimestamp: U256::from(10) }),
            Op::StoreBlockNumber { slot: slot(1) },
            Op::StoreTimestamp { slot: slot(2) },
        ]),
    );
    let sealed = node.block_context();

    let record = send(&node, target);
    assert_eq!(record.status, TransactionStatus::Included);
    assert_eq!(record.block_number, Some(sealed.number));
    assert_eq!(node.storage(&target, slot(1)), u64_word(50));
    assert_eq!(node.storage(&target, slot(2)), u64_word(10));
    assert_eq!(node.block_context(), BlockContext::new(51, 11));
}

#[test]
fn deal_etch_and_nonce() {
    let node = node();
    let account = Address::repeat_byte(0x55);
    let etched = Script::new([Op::Return { data: Bytes::from_static(b"etched") }]).into_code();
    let etch = || cheat(Vm::etchCall { target: account, newRuntimeBytecode: etched.clone() });
    let target = deploy(
        &node,
        Script::new([
            cheat(Vm::dealCall { account, newBalance: U256::from(123) }),
            cheat(Vm::setNonceCall { account, newNonce: 7 }),
            etch(),
            etch(),
            cheat(Vm::setNonceCall { account, newNonce: 3 }),
        ]),
    );

    let record = send(&node, target);
    assert_eq!(record.status, TransactionStatus::Included);
    assert_eq!(node.balance(&account), U256::from(123));
    assert_eq!(node.nonce(&account), 3);
    assert_eq!(node.code(&account), Some(etched.clone()));

    let code_hash = hash_bytecode(&etched).unwrap();
    assert_eq!(node.bytecode_by_hash(&code_hash), Some(etched));
    let registrations = record
        .logs
        .iter()
        .filter(|log| log.entry.address == KNOWN_CODES_STORAGE_ADDRESS)
        .count();
    assert_eq!(registrations, 1);

    let outcome = node
        .call(&TransactionRequest { from: wallet(), to: Some(account), ..Default::default() })
        .unwrap();
    assert_eq!(outcome.output, Bytes::from_static(b"etched"));
}

#[test]
fn get_nonce_and_load_read_state() {
    let node = node();
    let account = Address::repeat_byte(0x56);
    let nonce_reader =
        deploy(&node, Script::new([cheat(Vm::getNonceCall { account: wallet() })]));
    let slot_reader = deploy(
        &node,
        Script::new([
            cheat(Vm::storeCall { target: account, slot: slot(4), value: slot(8) }),
            cheat(Vm::loadCall { target: account, slot: slot(4) }),
        ]),
    );

    let request =
        TransactionRequest { from: wallet(), to: Some(nonce_reader), ..Default::default() };
    let outcome = node.call(&request).unwrap();
    assert_eq!(U256::from_be_slice(&outcome.output), U256::from(node.nonce(&wallet())));

    let record = send(&node, slot_reader);
    assert_eq!(record.output.as_ref(), slot(8).as_slice());
    assert_eq!(node.storage(&account, slot(4)), slot(8));
}

#[test]
fn to_string_returns_trimmed_data() {
    let node = node();
    let alice = address!("0x413D15117be7a498e68A64FcfdB22C6e2AaE1808");
    let target = deploy(&node, Script::new([cheat(Vm::toString_0Call { value: alice })]));

    let record = send(&node, target);
    let text = decode_trimmed_return_data(&record.output).unwrap();
    assert_eq!(text, "0x413D15117be7a498e68A64FcfdB22C6e2AaE1808".as_bytes());
}

#[test]
fn cheatcode_errors_revert_the_transaction() {
    let node = node();
    let unknown = deploy(
        &node,
        Script::new([Op::Call {
            to: CHEATCODE_ADDRESS,
            input: Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
            value: U256::ZERO,
        }]),
    );
    let record = send(&node, unknown);
    assert_eq!(record.status, TransactionStatus::Failed);
    assert_eq!(
        record.revert_reason.as_deref(),
        Some("unknown cheatcode with selector 0xdeadbeef")
    );

    let out_of_range =
        deploy(&node, Script::new([cheat(Vm::rollCall { newHeight: U256::MAX })]));
    let before = node.block_context();
    let record = send(&node, out_of_range);
    assert_eq!(record.status, TransactionStatus::Failed);
    assert!(record.revert_reason.unwrap().contains("does not fit in 64 bits"));
    assert_eq!(node.block_context().number, before.number + 1);
}

#[test]
fn reverted_frame_discards_state_but_not_block_context() {
    let node = node();
    let account = Address::repeat_byte(0x57);
    let target = deploy(
        &node,
        Script::new([
            cheat(Vm::dealCall { account, newBalance: U256::from(1) }),
            cheat(Vm::rollCall { newHeight: U256::from(77) }),
            Op::Revert { reason: "after cheats".to_string() },
        ]),
    );

    let record = send(&node, target);
    assert_eq!(record.status, TransactionStatus::Failed);
    assert_eq!(node.balance(&account), U256::ZERO);
    assert_eq!(node.block_context().number, 78);
}

#[test]
fn disabled_cheatcodes_are_plain_calls() {
    let mut config = SandboxConfig::default();
    config.cheatcodes = false;
    let node = node_with_config(config);
    let account = Address::repeat_byte(0x58);
    let target =
        deploy(&node, Script::new([cheat(Vm::dealCall { account, newBalance: U256::from(1) })]));

    let record = send(&node, target);
    assert_eq!(record.status, TransactionStatus::Included);
    assert_eq!(node.balance(&account), U256::ZERO);
}

#[test]
fn stored_slot_is_read_by_the_contract() {
    let node = node();
    let value = u64_word(1234);
    let reader = deploy(&node, Script::new([Op::Sload { slot: slot(0) }]));
    let request = TransactionRequest { from: wallet(), to: Some(reader), ..Default::default() };
    assert_eq!(node.call(&request).unwrap().output.as_ref(), B256::ZERO.as_slice());

    let writer = deploy(
        &node,
        Script::new([cheat(Vm::storeCall { target: reader, slot: slot(0), value })]),
    );
    assert_eq!(send(&node, writer).status, TransactionStatus::Included);

    assert_eq!(node.call(&request).unwrap().output.as_ref(), value.as_slice());
    let record = send(&node, reader);
    assert_eq!(record.output.as_ref(), value.as_slice());
}
