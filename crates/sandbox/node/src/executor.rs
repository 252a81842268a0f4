use alloy_primitives::{Address, B256, Bytes, U256};
use era_cheatcodes::{CHEATCODE_ADDRESS, CheatcodeContext, dispatch_cheatcode};
use era_sandbox_core::{
    BlockContext, CallContext, CallFrame, CallOutcome, CodeRunner, HaltReason, Host, LogEntry,
    StateStore, constants::MAX_CALL_DEPTH,
};

/// Executes frames against borrowed node state.
///
/// Every frame snapshots the state store on entry and restores it when it does not succeed, so a
/// failing nested call only discards its own writes. The block and call contexts are not rolled
/// back.
#[derive(Debug)]
pub(crate) struct Executor<'a> {
    pub state: &'a mut StateStore,
    pub block: &'a mut BlockContext,
    pub call_context: &'a mut CallContext,
    pub runner: &'a dyn CodeRunner,
    pub chain_id: u64,
    pub cheatcodes: bool,
}

impl Executor<'_> {
    /// Executes `frame` with `input`.
    pub fn execute(&mut self, frame: CallFrame, input: Bytes) -> CallOutcome {
        if frame.depth >= MAX_CALL_DEPTH {
            debug!(depth = frame.depth, address = ?frame.address, "max call depth exceeded");
            return CallOutcome::halt(HaltReason::CallDepthExceeded);
        }

        if self.cheatcodes && frame.address == CHEATCODE_ADDRESS {
            trace!(caller = ?frame.caller, depth = frame.depth, "routing call to cheatcodes");
            let mut ccx = CheatcodeContext {
                state: &mut *self.state,
                block: &mut *self.block,
                call_context: &mut *self.call_context,
                caller: frame.caller,
            };
            return dispatch_cheatcode(&input, &mut ccx);
        }

        let snapshot = self.state.snapshot();
        let outcome = self.execute_frame(&frame, &input);
        if !outcome.is_success() {
            trace!(address = ?frame.address, status = ?outcome.status, "discarding frame writes");
            self.state.restore(snapshot);
        }
        outcome
    }

    fn execute_frame(&mut self, frame: &CallFrame, input: &Bytes) -> CallOutcome {
        if !frame.value.is_zero() {
            if frame.is_static {
                return CallOutcome::halt(HaltReason::StaticStateChange);
            }
            if let Err(err) = self.state.transfer(frame.caller, frame.address, frame.value) {
                debug!(%err, "value transfer failed");
                return CallOutcome::halt(HaltReason::OutOfFunds);
            }
        }

        let Some(code) = self.state.code(&frame.address) else {
            trace!(address = ?frame.address, "no code at address");
            return CallOutcome::success(Bytes::new());
        };

        let runner = self.runner;
        let mut host = FrameHost { executor: self, frame };
        runner.run(&code, input, &mut host)
    }

    /// Deploys `code` at the `CREATE` address of `caller` for `nonce`.
    ///
    /// On success the output holds the new address as a 32 byte word.
    pub fn create(
        &mut self,
        caller: Address,
        nonce: u64,
        code: &Bytes,
        value: U256,
    ) -> (CallOutcome, Address) {
        let address = caller.create(nonce);
        let snapshot = self.state.snapshot();

        if let Err(err) = self.state.transfer(caller, address, value) {
            debug!(%err, "value transfer failed");
            self.state.restore(snapshot);
            return (CallOutcome::halt(HaltReason::OutOfFunds), address);
        }

        match self.state.deploy_code(address, code) {
            Ok(hash) => {
                debug!(?address, ?hash, "deployed contract");
                let output = Bytes::copy_from_slice(address.into_word().as_slice());
                (CallOutcome::success(output), address)
            }
            Err(err) => {
                self.state.restore(snapshot);
                (CallOutcome::revert_with_reason(err.to_string()), address)
            }
        }
    }
}

/// [`Host`] view of one executing frame.
struct FrameHost<'e, 'a> {
    executor: &'e mut Executor<'a>,
    frame: &'e CallFrame,
}

impl Host for FrameHost<'_, '_> {
    fn address(&self) -> Address {
        self.frame.address
    }

    fn msg_sender(&self) -> Address {
        self.executor.call_context.resolve_sender(self.frame)
    }

    fn tx_origin(&self) -> Address {
        self.executor.call_context.resolve_origin(self.frame)
    }

    fn call_value(&self) -> U256 {
        self.frame.value
    }

    fn block_number(&self) -> u64 {
        self.executor.block.number
    }

    fn block_timestamp(&self) -> u64 {
        self.executor.block.timestamp
    }

    fn chain_id(&self) -> u64 {
        self.executor.chain_id
    }

    fn balance(&self, address: &Address) -> U256 {
        self.executor.state.balance(address)
    }

    fn sload(&self, slot: B256) -> B256 {
        self.executor.state.storage(&self.frame.address, slot)
    }

    fn sstore(&mut self, slot: B256, value: B256) -> Result<(), HaltReason> {
        if self.frame.is_static {
            return Err(HaltReason::StaticStateChange);
        }
        self.executor.state.sstore(self.frame.address, slot, value);
        Ok(())
    }

    fn emit_log(&mut self, topics: Vec<B256>, data: Bytes) -> Result<(), HaltReason> {
        if self.frame.is_static {
            return Err(HaltReason::StaticStateChange);
        }
        self.executor.state.emit_log(LogEntry::new(self.frame.address, topics, data));
        Ok(())
    }

    fn call(&mut self, to: Address, input: Bytes, value: U256) -> CallOutcome {
        let child = self.frame.child(to, value, false);
        self.executor.execute(child, input)
    }

    fn static_call(&mut self, to: Address, input: Bytes) -> CallOutcome {
        let child = self.frame.child(to, U256::ZERO, true);
        self.executor.execute(child, input)
    }
}
