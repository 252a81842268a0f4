//! # era-sandbox-core
//!
//! State model of the era sandbox: accounts and the known-code index, the block context, the
//! call-context override, and the [`Host`]/[`CodeRunner`] seam used to execute account code.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod block;
pub mod bytecode;
pub mod constants;
pub mod context;
pub mod fee;
pub mod host;
pub mod log;
pub mod state;
pub mod utils;

pub use block::BlockContext;
pub use bytecode::{InvalidBytecodeError, hash_bytecode};
pub use context::{CallContext, CallFrame, Prank, PrankState};
pub use fee::{Fee, FeeModel};
pub use host::{CallOutcome, CallStatus, CodeRunner, HaltReason, Host};
pub use log::{Log, LogEntry, LogFilter};
pub use state::{Account, KnownCodes, StateError, StateSnapshot, StateStore};
