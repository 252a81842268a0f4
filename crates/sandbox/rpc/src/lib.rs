//! # era-sandbox-rpc
//!
//! The `zks`, `hardhat` and `evm` JSON-RPC namespaces of the era sandbox, the request enum they
//! are routed from and the JSON-RPC error and response types.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod api;
pub use api::{EraApi, EraRequest, RpcMethodCall};

pub mod error;
pub use error::{ErrorCode, RpcError, RpcResult};

mod evm;
pub use evm::{EvmNamespace, EvmNamespaceT};

mod hardhat;
pub use hardhat::{HardhatNamespace, HardhatNamespaceT};

pub mod response;
pub use response::{ResponseResult, RpcResponse};

mod serde_helpers;

pub mod types;

mod zks;
pub use zks::{ZksNamespace, ZksNamespaceT};
