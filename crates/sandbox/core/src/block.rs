use serde::{Deserialize, Serialize};

/// Number and timestamp of the block currently being built.
///
/// [`BlockContext::advance`] is what regular block production uses. The setters are reserved for
/// cheatcodes and time management calls and may move either value backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    pub number: u64,
    /// Seconds.
    pub timestamp: u64,
}

impl BlockContext {
    pub const fn new(number: u64, timestamp: u64) -> Self {
        Self { number, timestamp }
    }

    /// Moves to the next block, one second later.
    pub fn advance(&mut self) -> Self {
        self.number = self.number.saturating_add(1);
        self.timestamp = self.timestamp.saturating_add(1);
        *self
    }

    pub fn set_number(&mut self, number: u64) {
        self.number = number;
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    /// Adds `seconds` to the timestamp, saturating at `u64::MAX`.
    pub fn increase_time(&mut self, seconds: u64) -> u64 {
        self.timestamp = self.timestamp.saturating_add(seconds);
        self.timestamp
    }
}
