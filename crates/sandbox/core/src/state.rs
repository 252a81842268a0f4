//! Account state and the known-code index.
//!
//! Mutations come in two families. The delta family (`credit`, `debit`, `increment_nonce`,
//! `sstore`, `deploy_code`) is what regular execution uses and enforces the usual balance and
//! nonce rules. The force family (`force_set_*`) overwrites values unconditionally and is only
//! reachable from cheatcodes and node management calls.

use crate::{
    bytecode::{InvalidBytecodeError, hash_bytecode},
    constants::{KNOWN_CODES_STORAGE_ADDRESS, MARKED_AS_KNOWN_TOPIC},
    log::LogEntry,
};
use alloy_primitives::{
    Address, B256, Bytes, U256,
    map::{AddressHashMap, B256HashMap},
};

/// Errors returned by [`StateStore`] mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("insufficient balance for {address}: have {balance}, need {required}")]
    InsufficientBalance { address: Address, balance: U256, required: U256 },
    #[error("balance overflow for {0}")]
    BalanceOverflow(Address),
    #[error("nonce overflow for {0}")]
    NonceOverflow(Address),
    #[error(transparent)]
    InvalidBytecode(#[from] InvalidBytecodeError),
    #[error("known code {0} is already registered with different bytes")]
    KnownCodeMismatch(B256),
}

/// State of a single address. The default value is what an untouched address reads as.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub balance: U256,
    pub nonce: u64,
    /// Versioned hash into the known-code index.
    pub code_hash: Option<B256>,
    /// Non-zero storage slots.
    pub storage: B256HashMap<B256>,
}

impl Account {
    pub fn is_empty(&self) -> bool {
        self.balance.is_zero() &&
            self.nonce == 0 &&
            self.code_hash.is_none() &&
            self.storage.is_empty()
    }
}

/// Outcome of registering bytecode in the [`KnownCodes`] index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    New,
    Existing,
}

/// Known-code index: bytecode hash to bytecode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownCodes {
    codes: B256HashMap<Bytes>,
}

impl KnownCodes {
    pub fn get(&self, hash: &B256) -> Option<&Bytes> {
        self.codes.get(hash)
    }

    pub fn contains(&self, hash: &B256) -> bool {
        self.codes.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&B256, &Bytes)> {
        self.codes.iter()
    }

    fn register(&mut self, code: &Bytes) -> Result<(B256, Registration), StateError> {
        let hash = hash_bytecode(code)?;
        match self.codes.get(&hash) {
            Some(known) if known == code => Ok((hash, Registration::Existing)),
            Some(_) => {
                tracing::error!(%hash, "known code index maps hash to different bytecode");
                Err(StateError::KnownCodeMismatch(hash))
            }
            None => {
                self.codes.insert(hash, code.clone());
                Ok((hash, Registration::New))
            }
        }
    }
}

/// Accounts, known codes and the logs emitted since the last drain.
#[derive(Clone, Debug, Default)]
pub struct StateStore {
    accounts: AddressHashMap<Account>,
    known_codes: KnownCodes,
    pending_logs: Vec<LogEntry>,
}

/// Copy of a [`StateStore`] taken with [`StateStore::snapshot`].
#[derive(Clone, Debug)]
pub struct StateSnapshot(StateStore);

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn balance(&self, address: &Address) -> U256 {
        self.account(address).map(|account| account.balance).unwrap_or_default()
    }

    pub fn nonce(&self, address: &Address) -> u64 {
        self.account(address).map(|account| account.nonce).unwrap_or_default()
    }

    pub fn code_hash(&self, address: &Address) -> Option<B256> {
        self.account(address).and_then(|account| account.code_hash)
    }

    /// Returns the code deployed at `address`, if any.
    pub fn code(&self, address: &Address) -> Option<Bytes> {
        self.code_hash(address).and_then(|hash| self.known_codes.get(&hash).cloned())
    }

    pub fn storage(&self, address: &Address, slot: B256) -> B256 {
        self.account(address)
            .and_then(|account| account.storage.get(&slot).copied())
            .unwrap_or_default()
    }

    pub fn known_codes(&self) -> &KnownCodes {
        &self.known_codes
    }

    pub fn bytecode_by_hash(&self, hash: &B256) -> Option<&Bytes> {
        self.known_codes.get(hash)
    }

    fn account_mut(&mut self, address: Address) -> &mut Account {
        self.accounts.entry(address).or_default()
    }

    fn write_slot(&mut self, address: Address, slot: B256, value: B256) {
        let storage = &mut self.account_mut(address).storage;
        if value.is_zero() {
            storage.remove(&slot);
        } else {
            storage.insert(slot, value);
        }
    }

    // Delta family

    pub fn credit(&mut self, address: Address, amount: U256) -> Result<U256, StateError> {
        let balance = self
            .balance(&address)
            .checked_add(amount)
            .ok_or(StateError::BalanceOverflow(address))?;
        self.account_mut(address).balance = balance;
        Ok(balance)
    }

    pub fn debit(&mut self, address: Address, amount: U256) -> Result<U256, StateError> {
        let balance = self.balance(&address);
        let remaining = balance.checked_sub(amount).ok_or(StateError::InsufficientBalance {
            address,
            balance,
            required: amount,
        })?;
        self.account_mut(address).balance = remaining;
        Ok(remaining)
    }

    /// Moves `value` from `from` to `to`. Either both balances change or neither does.
    pub fn transfer(&mut self, from: Address, to: Address, value: U256) -> Result<(), StateError> {
        let balance = self.balance(&from);
        if balance < value {
            return Err(StateError::InsufficientBalance { address: from, balance, required: value });
        }
        if value.is_zero() || from == to {
            return Ok(());
        }
        self.balance(&to).checked_add(value).ok_or(StateError::BalanceOverflow(to))?;

        self.debit(from, value)?;
        self.credit(to, value)?;
        Ok(())
    }

    /// Bumps the nonce of `address` by one and returns the previous value.
    pub fn increment_nonce(&mut self, address: Address) -> Result<u64, StateError> {
        let nonce = self.nonce(&address);
        let next = nonce.checked_add(1).ok_or(StateError::NonceOverflow(address))?;
        self.account_mut(address).nonce = next;
        Ok(nonce)
    }

    pub fn sstore(&mut self, address: Address, slot: B256, value: B256) {
        self.write_slot(address, slot, value);
    }

    /// Adds `code` to the known-code index, emitting `MarkedAsKnown` the first time it is seen.
    pub fn register_code(&mut self, code: &Bytes) -> Result<B256, StateError> {
        let (hash, registration) = self.known_codes.register(code)?;
        if registration == Registration::New {
            tracing::debug!(%hash, len = code.len(), "marked bytecode as known");
            self.emit_log(LogEntry::new(
                KNOWN_CODES_STORAGE_ADDRESS,
                vec![MARKED_AS_KNOWN_TOPIC, hash, B256::ZERO],
                Bytes::new(),
            ));
        }
        Ok(hash)
    }

    /// Registers `code` and points `address` at it.
    pub fn deploy_code(&mut self, address: Address, code: &Bytes) -> Result<B256, StateError> {
        let hash = self.register_code(code)?;
        self.account_mut(address).code_hash = Some(hash);
        Ok(hash)
    }

    // Force family

    pub fn force_set_balance(&mut self, address: Address, balance: U256) {
        self.account_mut(address).balance = balance;
    }

    pub fn force_set_nonce(&mut self, address: Address, nonce: u64) {
        self.account_mut(address).nonce = nonce;
    }

    /// Replaces the code of `address`. Empty code clears it and returns `None`.
    pub fn force_set_code(
        &mut self,
        address: Address,
        code: &Bytes,
    ) -> Result<Option<B256>, StateError> {
        if code.is_empty() {
            self.account_mut(address).code_hash = None;
            return Ok(None);
        }
        self.deploy_code(address, code).map(Some)
    }

    pub fn force_set_storage(&mut self, address: Address, slot: B256, value: B256) {
        self.write_slot(address, slot, value);
    }

    // Logs

    pub fn emit_log(&mut self, log: LogEntry) {
        self.pending_logs.push(log);
    }

    pub fn pending_logs(&self) -> &[LogEntry] {
        &self.pending_logs
    }

    pub fn take_logs(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.pending_logs)
    }

    // Rollback

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot(self.clone())
    }

    pub fn restore(&mut self, snapshot: StateSnapshot) {
        *self = snapshot.0;
    }
}
