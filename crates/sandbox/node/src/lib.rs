//! # era-sandbox-node
//!
//! In-memory node of the era sandbox. Owns the state store, the block context and the call
//! context, executes transactions through a [`CodeRunner`](era_sandbox_core::CodeRunner) and
//! intercepts calls to the cheatcode address.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod error;
pub use error::NodeError;

mod executor;

mod node;
pub use node::{InMemoryNode, InMemoryNodeInner};

mod types;
pub use types::{BlockInfo, TransactionRecord, TransactionRequest, TransactionStatus};
