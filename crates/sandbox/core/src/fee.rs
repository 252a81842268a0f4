//! Deterministic fee model.
//!
//! The sandbox does not meter execution. Gas is a pure function of the request size, which keeps
//! quotes stable across runs.

use crate::utils::{fix_l2_gas_limit, fix_l2_gas_price};
use alloy_primitives::{Bytes, U256};
use serde::{Deserialize, Serialize};

/// Fee quote returned by `zks_estimateFee`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Fee {
    pub gas_limit: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub gas_per_pubdata_limit: U256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeModel {
    pub base_tx_gas: u64,
    pub gas_per_calldata_byte: u64,
    pub gas_per_factory_dep_byte: u64,
    pub estimate_scale_percent: u64,
    pub l2_gas_price: u64,
    pub gas_per_pubdata_limit: u64,
}

impl FeeModel {
    /// Effective L2 gas price.
    pub fn gas_price(&self) -> U256 {
        fix_l2_gas_price(U256::from(self.l2_gas_price))
    }

    /// Gas attributed to a transaction with the given payload.
    pub fn intrinsic_gas(&self, calldata: &[u8], factory_deps: &[Bytes]) -> u64 {
        let dep_bytes = factory_deps.iter().map(|dep| dep.len() as u64).sum::<u64>();
        self.base_tx_gas
            .saturating_add(self.gas_per_calldata_byte.saturating_mul(calldata.len() as u64))
            .saturating_add(self.gas_per_factory_dep_byte.saturating_mul(dep_bytes))
    }

    /// Quotes a transaction. `balance` is the sender's balance, zero when unknown.
    pub fn estimate(
        &self,
        calldata: &[u8],
        factory_deps: &[Bytes],
        value: U256,
        balance: U256,
    ) -> Fee {
        let raw = U256::from(self.intrinsic_gas(calldata, factory_deps));
        let scaled = raw.saturating_mul(U256::from(self.estimate_scale_percent)) / U256::from(100);
        let gas_price = self.gas_price();

        Fee {
            gas_limit: fix_l2_gas_limit(scaled, gas_price, value, balance),
            max_fee_per_gas: gas_price,
            max_priority_fee_per_gas: U256::ZERO,
            gas_per_pubdata_limit: U256::from(self.gas_per_pubdata_limit),
        }
    }

    /// Amount charged for `gas_used`.
    pub fn fee_for(&self, gas_used: u64) -> U256 {
        U256::from(gas_used).saturating_mul(self.gas_price())
    }
}
