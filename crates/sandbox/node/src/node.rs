use crate::{
    error::NodeError,
    executor::Executor,
    types::{BlockInfo, TransactionRecord, TransactionRequest, TransactionStatus},
};
use alloy_primitives::{Address, B256, Bytes, U256, map::B256HashMap};
use era_sandbox_config::{RICH_WALLETS, SandboxConfig};
use era_sandbox_core::{
    BlockContext, CallContext, CallFrame, CallOutcome, CodeRunner, Fee, FeeModel, Log, LogFilter,
    Prank, StateError, StateStore, hash_bytecode,
};
use parking_lot::RwLock;
use std::{collections::BTreeMap, sync::Arc};

/// Everything the node owns. Guarded by the lock in [`InMemoryNode`].
#[derive(Debug)]
pub struct InMemoryNodeInner {
    pub config: SandboxConfig,
    pub state: StateStore,
    /// Context of the block currently being built.
    pub block: BlockContext,
    pub call_context: CallContext,
    pub fee_model: FeeModel,
    blocks: BTreeMap<u64, BlockInfo>,
    latest_block: u64,
    transactions: B256HashMap<TransactionRecord>,
    /// Number of accepted submissions, mixed into transaction hashes.
    submitted: u64,
    logs: Vec<Log>,
    runner: Arc<dyn CodeRunner>,
}

impl InMemoryNodeInner {
    /// Creates the genesis state described by `config` and seals the genesis block.
    pub fn new(config: SandboxConfig, runner: Arc<dyn CodeRunner>) -> Self {
        let mut state = StateStore::new();
        if config.genesis.seed_rich_wallets {
            for (address, _) in RICH_WALLETS {
                state.force_set_balance(address, config.genesis.rich_wallet_balance);
            }
        }

        let fee_model = FeeModel {
            base_tx_gas: config.fee.base_tx_gas,
            gas_per_calldata_byte: config.fee.gas_per_calldata_byte,
            gas_per_factory_dep_byte: config.fee.gas_per_factory_dep_byte,
            estimate_scale_percent: config.fee.estimate_scale_percent,
            l2_gas_price: config.l2_gas_price,
            gas_per_pubdata_limit: config.gas_per_pubdata_limit,
        };
        let genesis = BlockContext::new(config.genesis.block_number, config.genesis.timestamp);

        let mut inner = Self {
            config,
            state,
            block: genesis,
            call_context: CallContext::new(),
            fee_model,
            blocks: BTreeMap::new(),
            latest_block: genesis.number,
            transactions: B256HashMap::default(),
            submitted: 0,
            logs: Vec::new(),
            runner,
        };
        inner.seal_block(genesis, Vec::new());
        inner
    }

    fn executor<'a>(
        state: &'a mut StateStore,
        block: &'a mut BlockContext,
        call_context: &'a mut CallContext,
        runner: &'a dyn CodeRunner,
        config: &SandboxConfig,
    ) -> Executor<'a> {
        Executor {
            state,
            block,
            call_context,
            runner,
            chain_id: config.chain_id,
            cheatcodes: config.cheatcodes,
        }
    }

    /// Validates, executes and seals `request` in its own block.
    ///
    /// A request that passes validation always produces a record, with status
    /// [`TransactionStatus::Failed`] if execution did not succeed. The sender nonce is
    /// incremented in both cases.
    pub fn submit_transaction(&mut self, request: TransactionRequest) -> Result<B256, NodeError> {
        let from = request.from;
        let nonce = self.state.nonce(&from);
        match request.nonce {
            Some(actual) if actual < nonce => {
                return Err(NodeError::NonceTooLow { address: from, expected: nonce, actual });
            }
            Some(actual) if actual > nonce => {
                return Err(NodeError::NonceTooHigh { address: from, expected: nonce, actual });
            }
            _ => {}
        }
        let balance = self.state.balance(&from);
        if balance < request.value {
            return Err(NodeError::InsufficientFunds { balance, value: request.value });
        }
        for dep in &request.factory_deps {
            hash_bytecode(dep)?;
        }

        let hash = request.hash(nonce, self.config.chain_id, self.submitted);
        let sealed = self.block;
        self.state.increment_nonce(from)?;
        self.submitted += 1;
        let mut record = TransactionRecord::pending(hash, &request, nonce, sealed.timestamp);
        self.transactions.insert(hash, record.clone());
        debug!(?hash, ?from, nonce, "accepted transaction");

        let snapshot = self.state.snapshot();
        let (outcome, contract_address) = self.execute_transaction(&request, nonce);
        if !outcome.is_success() {
            self.state.restore(snapshot);
        }

        let gas_used = self.fee_model.intrinsic_gas(&request.input, &request.factory_deps);
        let logs: Vec<Log> = self
            .state
            .take_logs()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Log {
                entry,
                block_number: sealed.number,
                transaction_hash: hash,
                log_index: index as u64,
            })
            .collect();

        let success = outcome.is_success();
        record.status = if success {
            TransactionStatus::Included
        } else {
            TransactionStatus::Failed
        };
        record.block_number = Some(sealed.number);
        record.gas_used = gas_used;
        record.fee = self.fee_model.fee_for(gas_used);
        record.revert_reason = outcome.revert_reason();
        record.output = outcome.output;
        record.contract_address = contract_address.filter(|_| success);
        record.logs = logs.clone();

        info!(
            ?hash,
            status = ?record.status,
            block = sealed.number,
            logs = logs.len(),
            "executed transaction"
        );
        if let Some(reason) = &record.revert_reason {
            debug!(?hash, %reason, "transaction failed");
        }

        self.logs.extend(logs);
        self.transactions.insert(hash, record);
        self.seal_block(sealed, vec![hash]);
        Ok(hash)
    }

    fn execute_transaction(
        &mut self,
        request: &TransactionRequest,
        nonce: u64,
    ) -> (CallOutcome, Option<Address>) {
        let mut executor = Self::executor(
            &mut self.state,
            &mut self.block,
            &mut self.call_context,
            self.runner.as_ref(),
            &self.config,
        );
        for dep in &request.factory_deps {
            if let Err(err) = executor.state.register_code(dep) {
                return (CallOutcome::revert_with_reason(err.to_string()), None);
            }
        }

        match request.to {
            Some(to) => {
                let frame = CallFrame::root(request.from, to, request.value);
                (executor.execute(frame, request.input.clone()), None)
            }
            None => {
                let (outcome, address) =
                    executor.create(request.from, nonce, &request.input, request.value);
                (outcome, Some(address))
            }
        }
    }

    /// Executes `request` on a copy of the state and discards every change.
    pub fn call(&self, request: &TransactionRequest) -> Result<CallOutcome, NodeError> {
        let to = request.to.ok_or(NodeError::MissingRecipient)?;
        let mut state = self.state.clone();
        let mut block = self.block;
        let mut call_context = self.call_context.clone();
        let mut executor = Self::executor(
            &mut state,
            &mut block,
            &mut call_context,
            self.runner.as_ref(),
            &self.config,
        );
        let frame = CallFrame::root(request.from, to, request.value);
        Ok(executor.execute(frame, request.input.clone()))
    }

    /// Quotes `request` with the deterministic fee model.
    pub fn estimate_fee(&self, request: &TransactionRequest) -> Fee {
        let balance = self.state.balance(&request.from);
        self.fee_model.estimate(&request.input, &request.factory_deps, request.value, balance)
    }

    /// Seals an empty block.
    pub fn mine_block(&mut self) -> BlockInfo {
        let sealed = self.block;
        let block = self.seal_block(sealed, Vec::new());
        debug!(number = block.number, timestamp = block.timestamp, "mined empty block");
        block
    }

    fn seal_block(&mut self, sealed: BlockContext, transactions: Vec<B256>) -> BlockInfo {
        let parent_hash = self.latest_block().map(|block| block.hash).unwrap_or_default();
        let block = BlockInfo::new(sealed.number, sealed.timestamp, parent_hash, transactions);
        if self.blocks.insert(block.number, block.clone()).is_some() {
            warn!(number = block.number, "replacing a sealed block with the same number");
        }
        self.latest_block = block.number;
        self.block.advance();
        block
    }

    pub fn latest_block(&self) -> Option<&BlockInfo> {
        self.blocks.get(&self.latest_block)
    }

    pub fn block_by_number(&self, number: u64) -> Option<&BlockInfo> {
        self.blocks.get(&number)
    }

    pub fn transaction(&self, hash: &B256) -> Option<&TransactionRecord> {
        self.transactions.get(hash)
    }

    /// Records of the transactions sealed in block `number`, in order.
    pub fn block_transactions(&self, number: u64) -> Option<Vec<TransactionRecord>> {
        let block = self.blocks.get(&number)?;
        Some(
            block
                .transactions
                .iter()
                .filter_map(|hash| self.transactions.get(hash))
                .cloned()
                .collect(),
        )
    }

    pub fn logs(&self, filter: &LogFilter) -> Vec<Log> {
        self.logs.iter().filter(|log| filter.matches(log)).cloned().collect()
    }

    pub fn set_balance(&mut self, address: Address, balance: U256) {
        self.state.force_set_balance(address, balance);
    }

    pub fn set_nonce(&mut self, address: Address, nonce: u64) {
        self.state.force_set_nonce(address, nonce);
    }

    /// Replaces the code of `address`.
    ///
    /// A new registration stays pending in the state and is carried by the logs of the next
    /// submitted transaction.
    pub fn set_code(
        &mut self,
        address: Address,
        code: &Bytes,
    ) -> Result<Option<B256>, StateError> {
        self.state.force_set_code(address, code)
    }

    pub fn set_storage(&mut self, address: Address, slot: B256, value: B256) {
        self.state.force_set_storage(address, slot, value);
    }

    /// Sets the timestamp of the next block, returning `timestamp - previous`.
    pub fn set_time(&mut self, timestamp: u64) -> i64 {
        let previous = self.block.timestamp;
        self.block.set_timestamp(timestamp);
        let diff = i128::from(timestamp).saturating_sub(i128::from(previous));
        diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    /// Moves the timestamp of the next block forward by `seconds`.
    pub fn increase_time(&mut self, seconds: u64) -> u64 {
        self.block.increase_time(seconds);
        seconds
    }

    pub fn prank(&self) -> Option<Prank> {
        self.call_context.prank().copied()
    }
}

/// In-memory node. Cheap to clone, every clone shares the same state.
///
/// Transactions hold the write lock for their whole execution, reads take the read lock.
#[derive(Clone, Debug)]
pub struct InMemoryNode {
    inner: Arc<RwLock<InMemoryNodeInner>>,
}

impl InMemoryNode {
    pub fn new(config: SandboxConfig, runner: Arc<dyn CodeRunner>) -> Self {
        Self { inner: Arc::new(RwLock::new(InMemoryNodeInner::new(config, runner))) }
    }

    pub fn get_inner(&self) -> Arc<RwLock<InMemoryNodeInner>> {
        self.inner.clone()
    }

    pub fn submit_transaction(&self, request: TransactionRequest) -> Result<B256, NodeError> {
        self.inner.write().submit_transaction(request)
    }

    pub fn call(&self, request: &TransactionRequest) -> Result<CallOutcome, NodeError> {
        self.inner.read().call(request)
    }

    pub fn estimate_fee(&self, request: &TransactionRequest) -> Fee {
        self.inner.read().estimate_fee(request)
    }

    pub fn mine_block(&self) -> BlockInfo {
        self.inner.write().mine_block()
    }

    pub fn get_logs(&self, filter: &LogFilter) -> Vec<Log> {
        self.inner.read().logs(filter)
    }

    pub fn transaction(&self, hash: &B256) -> Option<TransactionRecord> {
        self.inner.read().transaction(hash).cloned()
    }

    pub fn block(&self, number: u64) -> Option<BlockInfo> {
        self.inner.read().block_by_number(number).cloned()
    }

    pub fn latest_block(&self) -> Option<BlockInfo> {
        self.inner.read().latest_block().cloned()
    }

    pub fn block_context(&self) -> BlockContext {
        self.inner.read().block
    }

    pub fn balance(&self, address: &Address) -> U256 {
        self.inner.read().state.balance(address)
    }

    pub fn nonce(&self, address: &Address) -> u64 {
        self.inner.read().state.nonce(address)
    }

    pub fn code(&self, address: &Address) -> Option<Bytes> {
        self.inner.read().state.code(address)
    }

    pub fn storage(&self, address: &Address, slot: B256) -> B256 {
        self.inner.read().state.storage(address, slot)
    }

    pub fn bytecode_by_hash(&self, hash: &B256) -> Option<Bytes> {
        self.inner.read().state.bytecode_by_hash(hash).cloned()
    }

    pub fn prank(&self) -> Option<Prank> {
        self.inner.read().prank()
    }
}
