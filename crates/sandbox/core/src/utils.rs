use alloy_primitives::U256;

/// Lowest L2 gas price accepted by the sandbox.
pub const MIN_L2_GAS_PRICE: u64 = 260_000_000;

/// Bumps the gas price to [`MIN_L2_GAS_PRICE`] if it is lower.
pub fn fix_l2_gas_price(gas_price: U256) -> U256 {
    U256::max(gas_price, U256::from(MIN_L2_GAS_PRICE))
}

/// Limits the gas_limit proportional to a user's available balance given the gas_price.
///
/// Additionally, fixes the gas limit to be maximum of 2^31, which is below the VM gas limit of
/// 2^32.
pub fn fix_l2_gas_limit(
    proposed_gas_limit: U256,
    gas_price: U256,
    value: U256,
    balance: U256,
) -> U256 {
    let gas_limit = if gas_price.is_zero() || balance <= value {
        proposed_gas_limit
    } else {
        let max_gas_limit = balance.saturating_sub(value).div_rem(gas_price).0;
        U256::min(proposed_gas_limit, max_gas_limit)
    };

    U256::min(gas_limit, U256::from(u32::MAX >> 1))
}
