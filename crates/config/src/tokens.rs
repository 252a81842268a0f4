use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};

/// Price of a token in USD, as a decimal string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPrice {
    /// L2 address of the token. ETH uses the zero address.
    pub address: Address,
    /// Decimal price.
    pub price: String,
}

impl TokenPrice {
    /// Creates a new token price entry.
    pub fn new(address: Address, price: impl Into<String>) -> Self {
        Self { address, price: price.into() }
    }
}

/// ETH plus the stablecoins known on the Era testnets.
pub fn default_token_prices() -> Vec<TokenPrice> {
    vec![
        TokenPrice::new(Address::ZERO, "1500"),
        // LINK
        TokenPrice::new(address!("0x40609141Db628BeEE3BfAB8034Fc2D8278D0Cc78"), "1"),
        // wBTC
        TokenPrice::new(address!("0x0BfcE1D53451B4a8175DD94e6e029F7d8a701e9c"), "1"),
        // USDC
        TokenPrice::new(address!("0x0faF6df7054946141266420b43783387A78d82A9"), "1"),
        // DAI
        TokenPrice::new(address!("0x3e7676937A7E96CFB7616f255b9AD9FF47363D4b"), "1"),
    ]
}
