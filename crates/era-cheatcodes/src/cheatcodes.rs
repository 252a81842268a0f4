use crate::{
    Vm,
    error::{CheatcodeError, Result},
    utils::trimmed_return_data,
};
use alloy_primitives::{Address, B256, U256, hex, uint};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{SolCall, SolInterface, SolValue};
use era_sandbox_core::{BlockContext, CallContext, CallOutcome, StateStore};
use std::fmt::Debug;

/// Order of the secp256k1 curve.
const SECP256K1_ORDER: U256 =
    uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// Node state a cheatcode may read and mutate.
#[derive(Debug)]
pub struct CheatcodeContext<'a> {
    pub state: &'a mut StateStore,
    pub block: &'a mut BlockContext,
    pub call_context: &'a mut CallContext,
    /// Address of the frame calling the cheatcode address.
    pub caller: Address,
}

/// Implemented by every [`Vm`] call.
pub(crate) trait Cheatcode: SolCall + Debug {
    /// Applies this cheatcode, returning its ABI encoded output.
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result;
}

/// Decodes `calldata` as a [`Vm`] call and applies it.
///
/// Nothing is written unless the call decodes and validates.
pub fn apply_cheatcode(calldata: &[u8], ccx: &mut CheatcodeContext<'_>) -> Result {
    let selector: [u8; 4] = calldata
        .get(..4)
        .and_then(|selector| selector.try_into().ok())
        .ok_or(CheatcodeError::MissingSelector)?;
    if !Vm::VmCalls::valid_selector(selector) {
        return Err(CheatcodeError::UnknownSelector(selector.into()));
    }

    let call = Vm::VmCalls::abi_decode_validate(calldata)?;
    tracing::trace!(?call, caller = ?ccx.caller, "applying cheatcode");

    use Vm::VmCalls::*;
    match &call {
        addr(call) => call.apply(ccx),
        deal(call) => call.apply(ccx),
        etch(call) => call.apply(ccx),
        getNonce(call) => call.apply(ccx),
        load(call) => call.apply(ccx),
        roll(call) => call.apply(ccx),
        setNonce(call) => call.apply(ccx),
        startPrank_0(call) => call.apply(ccx),
        startPrank_1(call) => call.apply(ccx),
        stopPrank(call) => call.apply(ccx),
        store(call) => call.apply(ccx),
        toString_0(call) => call.apply(ccx),
        toString_1(call) => call.apply(ccx),
        toString_2(call) => call.apply(ccx),
        toString_3(call) => call.apply(ccx),
        toString_4(call) => call.apply(ccx),
        toString_5(call) => call.apply(ccx),
        warp(call) => call.apply(ccx),
    }
}

/// Same as [`apply_cheatcode`], with failures turned into a revert carrying `Error(string)`.
pub fn dispatch_cheatcode(calldata: &[u8], ccx: &mut CheatcodeContext<'_>) -> CallOutcome {
    match apply_cheatcode(calldata, ccx) {
        Ok(output) => CallOutcome::success(output),
        Err(err) => {
            tracing::warn!(%err, "cheatcode reverted");
            CallOutcome::revert(err.abi_encode())
        }
    }
}

fn to_u64(name: &'static str, value: U256) -> Result<u64> {
    u64::try_from(value).map_err(|_| CheatcodeError::ValueOutOfRange { name, value })
}

impl Cheatcode for Vm::addrCall {
    fn apply(&self, _ccx: &mut CheatcodeContext<'_>) -> Result {
        tracing::info!("👷 Getting address for private key");
        let Self { privateKey: private_key } = *self;
        if private_key.is_zero() {
            return Err(CheatcodeError::InvalidPrivateKey("private key cannot be 0".to_string()));
        }
        if private_key >= SECP256K1_ORDER {
            return Err(CheatcodeError::InvalidPrivateKey(
                "private key must be less than the secp256k1 curve order".to_string(),
            ));
        }
        let signer = PrivateKeySigner::from_bytes(&B256::from(private_key))
            .map_err(|err| CheatcodeError::InvalidPrivateKey(err.to_string()))?;
        Ok(signer.address().abi_encode())
    }
}

impl Cheatcode for Vm::dealCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { account, newBalance: new_balance } = *self;
        tracing::info!("👷 Setting balance for {account:?} to {new_balance}");
        ccx.state.force_set_balance(account, new_balance);
        Ok(Default::default())
    }
}

impl Cheatcode for Vm::etchCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { target, newRuntimeBytecode: new_runtime_bytecode } = self;
        tracing::info!("👷 Setting address code for {target:?}");
        let hash = ccx.state.force_set_code(*target, new_runtime_bytecode)?;
        tracing::debug!(?hash, len = new_runtime_bytecode.len(), "etched code");
        Ok(Default::default())
    }
}

impl Cheatcode for Vm::getNonceCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { account } = *self;
        tracing::info!("👷 Getting nonce for {account:?}");
        Ok(ccx.state.nonce(&account).abi_encode())
    }
}

impl Cheatcode for Vm::loadCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { target, slot } = *self;
        tracing::info!("👷 Getting storage slot {slot:?} for account {target:?}");
        Ok(ccx.state.storage(&target, slot).abi_encode())
    }
}

impl Cheatcode for Vm::rollCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { newHeight: new_height } = *self;
        tracing::info!("👷 Setting block number to {new_height}");
        ccx.block.set_number(to_u64("newHeight", new_height)?);
        Ok(Default::default())
    }
}

impl Cheatcode for Vm::setNonceCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { account, newNonce: new_nonce } = *self;
        let current = ccx.state.nonce(&account);
        tracing::info!("👷 Setting nonce for {account:?} to {new_nonce} (was {current})");
        ccx.state.force_set_nonce(account, new_nonce);
        Ok(Default::default())
    }
}

impl Cheatcode for Vm::startPrank_0Call {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { msgSender: msg_sender } = *self;
        tracing::info!("👷 Starting prank to {msg_sender:?}");
        ccx.call_context.start_prank(msg_sender, None);
        Ok(Default::default())
    }
}

impl Cheatcode for Vm::startPrank_1Call {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { msgSender: msg_sender, txOrigin: tx_origin } = *self;
        tracing::info!("👷 Starting prank to {msg_sender:?} with origin {tx_origin:?}");
        ccx.call_context.start_prank(msg_sender, Some(tx_origin));
        Ok(Default::default())
    }
}

impl Cheatcode for Vm::stopPrankCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self {} = self;
        tracing::info!("👷 Stopping prank");
        ccx.call_context.stop_prank();
        Ok(Default::default())
    }
}

impl Cheatcode for Vm::storeCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { target, slot, value } = *self;
        tracing::info!("👷 Setting storage slot {slot:?} for account {target:?} to {value:?}");
        ccx.state.force_set_storage(target, slot, value);
        Ok(Default::default())
    }
}

impl Cheatcode for Vm::toString_0Call {
    fn apply(&self, _ccx: &mut CheatcodeContext<'_>) -> Result {
        tracing::info!("👷 Converting address into string");
        Ok(trimmed_return_data(self.value.to_checksum(None).as_bytes()))
    }
}

impl Cheatcode for Vm::toString_1Call {
    fn apply(&self, _ccx: &mut CheatcodeContext<'_>) -> Result {
        tracing::info!("👷 Converting bytes into string");
        Ok(trimmed_return_data(hex::encode_prefixed(&self.value).as_bytes()))
    }
}

impl Cheatcode for Vm::toString_2Call {
    fn apply(&self, _ccx: &mut CheatcodeContext<'_>) -> Result {
        tracing::info!("👷 Converting bytes32 into string");
        Ok(trimmed_return_data(hex::encode_prefixed(self.value).as_bytes()))
    }
}

impl Cheatcode for Vm::toString_3Call {
    fn apply(&self, _ccx: &mut CheatcodeContext<'_>) -> Result {
        tracing::info!("👷 Converting bool into string");
        Ok(trimmed_return_data(self.value.to_string().as_bytes()))
    }
}

impl Cheatcode for Vm::toString_4Call {
    fn apply(&self, _ccx: &mut CheatcodeContext<'_>) -> Result {
        tracing::info!("👷 Converting uint256 into string");
        Ok(trimmed_return_data(self.value.to_string().as_bytes()))
    }
}

impl Cheatcode for Vm::toString_5Call {
    fn apply(&self, _ccx: &mut CheatcodeContext<'_>) -> Result {
        tracing::info!("👷 Converting int256 into string");
        Ok(trimmed_return_data(self.value.to_string().as_bytes()))
    }
}

impl Cheatcode for Vm::warpCall {
    fn apply(&self, ccx: &mut CheatcodeContext<'_>) -> Result {
        let Self { newTimestamp: new_timestamp } = *self;
        tracing::info!("👷 Setting block timestamp {new_timestamp}");
        ccx.block.set_timestamp(to_u64("newTimestamp", new_timestamp)?);
        Ok(Default::default())
    }
}
