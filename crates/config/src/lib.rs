//! # era-sandbox-config
//!
//! Typed configuration for the era sandbox node.
//!
//! Values are resolved in order: built-in defaults, an optional `era-sandbox.toml` in the working
//! directory, then `ERA_SANDBOX_` prefixed environment variables. Nested keys use `__` as the
//! separator in the environment, e.g. `ERA_SANDBOX_FEE__BASE_TX_GAS=30000`.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use alloy_primitives::{Address, U256};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod tokens;
pub use tokens::{TokenPrice, default_token_prices};

mod wallets;
pub use wallets::{RICH_WALLETS, rich_wallet_addresses};

/// Era sandbox configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Chain id reported to contracts and clients.
    pub chain_id: u64,

    /// Genesis block settings.
    pub genesis: GenesisConfig,

    /// Price of L1 gas in wei.
    pub l1_gas_price: u64,

    /// Price of L2 gas in wei, before the minimum price is applied.
    pub l2_gas_price: u64,

    /// Gas per pubdata byte limit quoted by fee estimation.
    pub gas_per_pubdata_limit: u64,

    /// Deterministic fee model constants.
    pub fee: FeeConfig,

    /// Token prices served by `zks_getTokenPrice`.
    pub token_prices: Vec<TokenPrice>,

    /// Whether calls to the cheatcode address are intercepted.
    pub cheatcodes: bool,

    /// Default `tracing` filter directive.
    pub log_filter: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            chain_id: 260,
            genesis: GenesisConfig::default(),
            l1_gas_price: 50_000_000_000,
            l2_gas_price: 250_000_000,
            gas_per_pubdata_limit: 50_000,
            fee: FeeConfig::default(),
            token_prices: default_token_prices(),
            cheatcodes: true,
            log_filter: "era_sandbox=info,era_cheatcodes=info".to_string(),
        }
    }
}

impl SandboxConfig {
    /// Name of the configuration file looked up in the working directory.
    pub const FILE_NAME: &'static str = "era-sandbox.toml";

    /// Prefix of the environment variables overriding configuration values.
    pub const ENV_PREFIX: &'static str = "ERA_SANDBOX_";

    /// Returns the default figment: defaults, then [`Self::FILE_NAME`], then the environment.
    pub fn figment() -> Figment {
        Self::figment_with_file(Self::FILE_NAME)
    }

    /// Same as [`Self::figment`] but reads the given TOML file instead.
    ///
    /// A missing file is not an error.
    pub fn figment_with_file(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
    }

    /// Loads the configuration from the default figment.
    pub fn load() -> eyre::Result<Self> {
        Self::from_figment(Self::figment())
    }

    /// Extracts the configuration from the given figment.
    pub fn from_figment(figment: Figment) -> eyre::Result<Self> {
        let config: Self = figment.extract()?;
        tracing::debug!(chain_id = config.chain_id, "loaded sandbox configuration");
        Ok(config)
    }

    /// Returns the configured price of `token`, if any.
    pub fn token_price(&self, token: &Address) -> Option<&str> {
        self.token_prices
            .iter()
            .find(|entry| entry.address == *token)
            .map(|entry| entry.price.as_str())
    }
}

/// Genesis state settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    /// Number of the genesis block.
    pub block_number: u64,

    /// Timestamp of the genesis block, in seconds.
    pub timestamp: u64,

    /// Seed [`RICH_WALLETS`] with [`Self::rich_wallet_balance`] at genesis.
    pub seed_rich_wallets: bool,

    /// Balance given to each rich wallet, in wei.
    pub rich_wallet_balance: U256,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            block_number: 0,
            timestamp: 1000,
            seed_rich_wallets: true,
            // 1000 ETH
            rich_wallet_balance: U256::from(1000u128 * 10u128.pow(18)),
        }
    }
}

/// Constants of the deterministic fee model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Fixed gas charged for every transaction.
    pub base_tx_gas: u64,

    /// Gas charged per byte of calldata.
    pub gas_per_calldata_byte: u64,

    /// Gas charged per byte of factory dependency bytecode.
    pub gas_per_factory_dep_byte: u64,

    /// Scale applied to the raw gas estimate, in percent.
    pub estimate_scale_percent: u64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            base_tx_gas: 21_000,
            gas_per_calldata_byte: 16,
            gas_per_factory_dep_byte: 10,
            estimate_scale_percent: 130,
        }
    }
}
