//! Call-context override ("prank").
//!
//! While a prank is active every frame that is not a system contract sees the pranked sender as
//! `msg.sender`, and the pranked origin (when given) as `tx.origin`. This includes the frame that
//! started the prank. The override lives until `stopPrank`, across transaction boundaries.

use crate::constants::{CHEATCODE_ADDRESS, is_system_address};
use alloy_primitives::{Address, U256};

/// Identity installed by `startPrank`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prank {
    pub sender: Address,
    pub origin: Option<Address>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrankState {
    #[default]
    Unpranked,
    Pranked(Prank),
}

/// The true identity of an executing frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    pub caller: Address,
    pub address: Address,
    pub origin: Address,
    pub value: U256,
    pub depth: usize,
    pub is_static: bool,
}

impl CallFrame {
    /// Outermost frame of a transaction sent by `origin` to `address`.
    pub fn root(origin: Address, address: Address, value: U256) -> Self {
        Self { caller: origin, address, origin, value, depth: 0, is_static: false }
    }

    /// Frame for a call made by this frame.
    pub fn child(&self, address: Address, value: U256, is_static: bool) -> Self {
        Self {
            caller: self.address,
            address,
            origin: self.origin,
            value,
            depth: self.depth + 1,
            is_static: self.is_static || is_static,
        }
    }
}

/// Per-node sender/origin resolution.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
    state: PrankState,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PrankState {
        self.state
    }

    pub fn prank(&self) -> Option<&Prank> {
        match &self.state {
            PrankState::Pranked(prank) => Some(prank),
            PrankState::Unpranked => None,
        }
    }

    /// Installs a prank, replacing any active one. Returns the replaced prank.
    pub fn start_prank(&mut self, sender: Address, origin: Option<Address>) -> Option<Prank> {
        let previous = self.prank().copied();
        self.state = PrankState::Pranked(Prank { sender, origin });
        previous
    }

    /// Clears the prank, returning it. Does nothing when no prank is active.
    pub fn stop_prank(&mut self) -> Option<Prank> {
        let previous = self.prank().copied();
        self.state = PrankState::Unpranked;
        previous
    }

    fn applies_to(frame: &CallFrame) -> bool {
        !is_system_address(&frame.address) && frame.address != CHEATCODE_ADDRESS
    }

    /// `msg.sender` as observed by `frame`.
    pub fn resolve_sender(&self, frame: &CallFrame) -> Address {
        match self.prank() {
            Some(prank) if Self::applies_to(frame) => prank.sender,
            _ => frame.caller,
        }
    }

    /// `tx.origin` as observed by `frame`.
    pub fn resolve_origin(&self, frame: &CallFrame) -> Address {
        match self.prank() {
            Some(Prank { origin: Some(origin), .. }) if Self::applies_to(frame) => *origin,
            _ => frame.origin,
        }
    }
}
