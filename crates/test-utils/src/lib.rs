//! # era-sandbox-test-utils
//!
//! Utilities shared by the era sandbox tests.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod script;
pub use script::{Op, Script, ScriptRunner};

use alloy_primitives::{Address, B256};
use era_sandbox_config::{RICH_WALLETS, SandboxConfig};
use tracing_subscriber::EnvFilter;

/// Initializes tracing for tests.
///
/// `RUST_LOG` takes precedence over the default [`SandboxConfig::log_filter`].
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(SandboxConfig::default().log_filter));
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Returns the `index`th rich wallet as `(address, private key)`.
///
/// # Panics
///
/// Panics if `index` is out of range.
pub fn rich_wallet(index: usize) -> (Address, B256) {
    RICH_WALLETS[index]
}

/// Left pads `address` into a storage word.
pub fn address_word(address: Address) -> B256 {
    address.into_word()
}

/// Storage word holding `value`.
pub fn u64_word(value: u64) -> B256 {
    B256::left_padding_from(&value.to_be_bytes())
}
